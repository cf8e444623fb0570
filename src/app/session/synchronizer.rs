//! Synchronisation zwischen Dokument-Historie, Parameter-Historie und Snapshot-Cache.
//!
//! Die Dokument-Historie wird von allen Werkzeugen geteilt. Eigene Undo/Redo-
//! Schritte bewegen Parameter und Cache im Gleichschritt mit dem Dokument;
//! Schritte fremder Werkzeuge werden im Defizit-Zähler aufgefangen.
//!
//! Mit Generationsmarken entscheidet die Marke im Dokument, ob ein Schritt
//! eigener oder fremder Art war; ohne Marken gilt die Ebenen-/Defizit-Regel.

use super::{IdentityTracker, ParameterStore, SnapshotCache};
use crate::core::SegmentationDocument;

/// Ergebnis eines Undo/Redo über den Synchronizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Eigener Schritt: Dokument, Parameter und Cache bewegt
    Own,
    /// Fremder Schritt: nur das Dokument bewegt
    Foreign,
    /// Dokument-Historie in dieser Richtung leer
    Nothing,
}

/// Defizit-Zähler plus zuletzt gesehene Historien-Epoche des Dokuments.
#[derive(Debug, Clone, Default)]
pub struct HistorySynchronizer {
    deficit: usize,
    observed_epoch: u64,
}

impl HistorySynchronizer {
    /// Neuer Synchronizer für ein Dokument.
    pub fn new(doc: &SegmentationDocument) -> Self {
        Self {
            deficit: 0,
            observed_epoch: doc.history_epoch(),
        }
    }

    /// Anzahl offener fremder Undo-Schritte.
    pub fn deficit(&self) -> usize {
        self.deficit
    }

    /// Setzt den Synchronizer auf den aktuellen Dokumentzustand zurück.
    pub fn reset(&mut self, doc: &SegmentationDocument) {
        self.deficit = 0;
        self.observed_epoch = doc.history_epoch();
    }

    /// Prüft, ob das Dokument seit dem letzten Blick Redo-Einträge verworfen hat.
    ///
    /// In dem Fall sind auch eigene Redo-Einträge ungültig und das Defizit
    /// ist hinfällig.
    pub fn observe_document(
        &mut self,
        doc: &SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
    ) {
        let epoch = doc.history_epoch();
        if epoch == self.observed_epoch {
            return;
        }
        log::debug!(
            "Dokument-Redo verworfen (Epoche {} -> {}), eigene Redo-Historie geleert",
            self.observed_epoch,
            epoch
        );
        store.clear_redo();
        cache.clear_redo();
        self.deficit = 0;
        self.observed_epoch = epoch;
    }

    /// Quittiert eine eigene Anwendung.
    pub fn commit_apply(&mut self, doc: &SegmentationDocument) {
        self.deficit = 0;
        self.observed_epoch = doc.history_epoch();
    }

    /// Undo über die gemeinsame Dokument-Historie.
    pub fn undo(
        &mut self,
        doc: &mut SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
    ) -> anyhow::Result<SyncOutcome> {
        self.observe_document(doc, store, cache);
        if doc.undo_level_count() == 0 {
            log::debug!("Undo: Dokument-Historie leer");
            return Ok(SyncOutcome::Nothing);
        }

        if store.undo_levels() > 0 {
            doc.undo()?;
            step_own_undo(store, cache);
            Ok(SyncOutcome::Own)
        } else {
            doc.undo()?;
            self.deficit += 1;
            log::debug!("Fremdes Undo, Defizit jetzt {}", self.deficit);
            Ok(SyncOutcome::Foreign)
        }
    }

    /// Redo über die gemeinsame Dokument-Historie.
    pub fn redo(
        &mut self,
        doc: &mut SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
    ) -> anyhow::Result<SyncOutcome> {
        self.observe_document(doc, store, cache);
        if doc.redo_level_count() == 0 {
            log::debug!("Redo: Dokument-Historie leer");
            return Ok(SyncOutcome::Nothing);
        }

        if self.deficit > 0 {
            doc.redo()?;
            self.deficit -= 1;
            log::debug!("Fremdes Redo, Defizit jetzt {}", self.deficit);
            return Ok(SyncOutcome::Foreign);
        }

        doc.redo()?;
        if store.redo_levels() > 0 {
            step_own_redo(store, cache);
            Ok(SyncOutcome::Own)
        } else {
            log::debug!("Redo ohne eigene Redo-Historie, nur Dokument bewegt");
            Ok(SyncOutcome::Foreign)
        }
    }

    /// Undo mit Generationsmarken: erst das Dokument, dann so viele eigene
    /// Schritte, wie die höchste Marke gesunken ist.
    pub fn undo_tracked(
        &mut self,
        doc: &mut SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
        tracker: &mut IdentityTracker,
    ) -> anyhow::Result<SyncOutcome> {
        self.observe_document(doc, store, cache);
        if doc.undo_level_count() == 0 {
            log::debug!("Undo: Dokument-Historie leer");
            return Ok(SyncOutcome::Nothing);
        }

        doc.undo()?;
        if tracker.reconcile(doc, store, cache) > 0 {
            return Ok(SyncOutcome::Own);
        }
        self.deficit += 1;
        log::debug!("Fremdes Undo (Generation unverändert), Defizit jetzt {}", self.deficit);
        Ok(SyncOutcome::Foreign)
    }

    /// Redo mit Generationsmarken, Gegenstück zu [`HistorySynchronizer::undo_tracked`].
    pub fn redo_tracked(
        &mut self,
        doc: &mut SegmentationDocument,
        store: &mut ParameterStore,
        cache: &mut SnapshotCache,
        tracker: &mut IdentityTracker,
    ) -> anyhow::Result<SyncOutcome> {
        self.observe_document(doc, store, cache);
        if doc.redo_level_count() == 0 {
            log::debug!("Redo: Dokument-Historie leer");
            return Ok(SyncOutcome::Nothing);
        }

        doc.redo()?;
        if tracker.reconcile(doc, store, cache) > 0 {
            return Ok(SyncOutcome::Own);
        }
        self.deficit = self.deficit.saturating_sub(1);
        log::debug!("Fremdes Redo (Generation unverändert), Defizit jetzt {}", self.deficit);
        Ok(SyncOutcome::Foreign)
    }
}

/// Ein eigener Undo-Schritt auf Parametern und Cache (ohne Dokument).
///
/// # Panics
/// Wenn Parameter-Historie und Cache nicht im Gleichschritt sind.
pub fn step_own_undo(store: &mut ParameterStore, cache: &mut SnapshotCache) {
    assert!(store.undo(), "Parameter-Historie leer beim eigenen Undo");
    cache.move_undo_to_redo();
    assert_lock_step(store, cache);
}

/// Ein eigener Redo-Schritt auf Parametern und Cache (ohne Dokument).
///
/// # Panics
/// Wenn Parameter-Historie und Cache nicht im Gleichschritt sind.
pub fn step_own_redo(store: &mut ParameterStore, cache: &mut SnapshotCache) {
    assert!(store.redo(), "Parameter-Redo-Historie leer beim eigenen Redo");
    cache.move_redo_to_undo();
    assert_lock_step(store, cache);
}

fn assert_lock_step(store: &ParameterStore, cache: &SnapshotCache) {
    assert_eq!(
        (store.undo_levels(), store.redo_levels()),
        (cache.undo_len(), cache.redo_len()),
        "Parameter-Historie und Snapshot-Cache laufen auseinander"
    );
}
