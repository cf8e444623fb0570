//! Generationszähler für Objekte im Mehr-Objekt-Betrieb.
//!
//! Jede eigene Anwendung stempelt das Zielobjekt mit `counter + 1`. Weicht
//! die höchste Marke im Dokument vom Zähler ab, wurde das Dokument ohne
//! Wissen der Sitzung rückgängig gemacht oder wiederhergestellt; die
//! Differenz wird auf Parametern und Cache nachgespielt.

use super::synchronizer::{step_own_redo, step_own_undo};
use super::{ParameterStore, SnapshotCache};
use crate::core::{ObjectRef, SegmentationDocument};
use std::cmp::Ordering;

/// Zähler der zuletzt vergebenen Generation.
#[derive(Debug, Clone)]
pub struct IdentityTracker {
    counter: u64,
    enabled: bool,
}

impl IdentityTracker {
    /// Neuer Tracker; `enabled = false` schaltet Stempeln und Abgleich ab.
    pub fn new(enabled: bool) -> Self {
        Self { counter: 0, enabled }
    }

    /// Zuletzt vergebene Generation.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Gibt `true` zurück, wenn der Tracker aktiv ist.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Gleicht Parameter und Cache mit den Marken im Dokument ab.
    ///
    /// Gibt die Anzahl nachgespielter Schritte zurück.
    pub fn reconcile(
        &mut self,
        doc: &SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
    ) -> usize {
        if !self.enabled {
            return 0;
        }
        let current = doc.current_generation();
        let target = current.unwrap_or(0);

        let replayed = match target.cmp(&self.counter) {
            Ordering::Equal => 0,
            Ordering::Less => {
                let mut steps = 0;
                for _ in 0..(self.counter - target) {
                    if store.undo_levels() == 0 {
                        break;
                    }
                    step_own_undo(store, cache);
                    steps += 1;
                }
                steps
            }
            Ordering::Greater => {
                let mut steps = 0;
                for _ in 0..(target - self.counter) {
                    if store.redo_levels() == 0 {
                        break;
                    }
                    step_own_redo(store, cache);
                    steps += 1;
                }
                steps
            }
        };
        if replayed > 0 {
            log::info!(
                "Generation {} -> {:?}: {} Schritt(e) der eigenen Historie nachgespielt",
                self.counter,
                current,
                replayed
            );
        }

        if current.is_none() && store.peek().is_some() {
            store.get().clear_points();
        }
        self.counter = target;
        replayed
    }

    /// Stempelt das Zielobjekt einer erfolgreichen Anwendung.
    pub fn stamp(&mut self, doc: &mut SegmentationDocument, object: &ObjectRef) {
        if !self.enabled {
            return;
        }
        let stripped = doc.strip_generations_above(self.counter);
        if stripped > 0 {
            log::debug!("{} veraltete Generationsmarke(n) entfernt", stripped);
        }
        self.counter += 1;
        doc.set_generation(object, self.counter);
    }

    /// Setzt den Zähler zurück und entfernt alle Marken.
    pub fn reset(&mut self, doc: &mut SegmentationDocument) {
        self.counter = 0;
        if self.enabled {
            doc.clear_generations();
        }
    }
}
