//! Generationsmarken pro Objekt.
//!
//! Jede eigene Anwendung stempelt das Zielobjekt mit einer fortlaufenden
//! Generation. Die Marken sind Teil des Dokuments und laufen daher mit dessen
//! Undo/Redo mit; die Sitzung erkennt daran fremde Undo/Redo-Schritte.

use super::ObjectRef;
use std::collections::{BTreeMap, HashMap};

/// Bidirektionale Zuordnung Objekt ↔ Generation.
///
/// Eine Generation ist höchstens einem Objekt zugeordnet, ein Objekt trägt
/// höchstens eine Generation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationTags {
    by_object: HashMap<ObjectRef, u64>,
    by_generation: BTreeMap<u64, ObjectRef>,
}

impl GenerationTags {
    /// Leere Zuordnung.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation eines Objekts.
    pub fn get(&self, object: &ObjectRef) -> Option<u64> {
        self.by_object.get(object).copied()
    }

    /// Stempelt ein Objekt mit einer Generation.
    ///
    /// Eine vorherige Marke des Objekts und ein anderer Träger derselben
    /// Generation werden entfernt.
    pub fn set(&mut self, object: &ObjectRef, generation: u64) {
        self.remove(object);
        if let Some(previous) = self.by_generation.remove(&generation) {
            self.by_object.remove(&previous);
        }
        self.by_object.insert(object.clone(), generation);
        self.by_generation.insert(generation, object.clone());
    }

    fn remove(&mut self, object: &ObjectRef) {
        if let Some(generation) = self.by_object.remove(object) {
            self.by_generation.remove(&generation);
        }
    }

    /// Höchste vergebene Generation.
    pub fn max(&self) -> Option<u64> {
        self.by_generation.keys().next_back().copied()
    }

    /// Entfernt alle Marken mit Generation größer `limit`.
    pub fn strip_above(&mut self, limit: u64) -> usize {
        let Some(first_above) = limit.checked_add(1) else {
            return 0;
        };
        let stripped = self.by_generation.split_off(&first_above);
        for object in stripped.values() {
            self.by_object.remove(object);
        }
        stripped.len()
    }

    /// Entfernt alle Marken.
    pub fn clear(&mut self) {
        self.by_object.clear();
        self.by_generation.clear();
    }

    /// Anzahl gestempelter Objekte.
    pub fn len(&self) -> usize {
        self.by_object.len()
    }

    /// Gibt `true` zurück, wenn kein Objekt gestempelt ist.
    pub fn is_empty(&self) -> bool {
        self.by_object.is_empty()
    }
}
