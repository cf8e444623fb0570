//! Generischer Undo/Redo-Stapel mit begrenzter Tiefe.
//!
//! Wird für die Dokument-Checkpoints und für die Sitzungsparameter
//! verwendet. Die Einträge sind "Vorher"-Zustände: Undo liefert den
//! wiederherzustellenden Zustand und legt den aktuellen auf den Redo-Stapel.

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Debug, Clone)]
pub struct EditHistory<T> {
    undo_stack: Vec<T>,
    redo_stack: Vec<T>,
    max_depth: usize,
}

impl<T> EditHistory<T> {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: Vec::with_capacity(max_depth.min(64)),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Record a pre-built snapshot.
    ///
    /// Gibt `true` zurück, wenn dabei Redo-Einträge verworfen wurden
    /// (die Historie hat sich verzweigt).
    pub fn record_snapshot(&mut self, snap: T) -> bool {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        let discarded = !self.redo_stack.is_empty();
        self.redo_stack.clear();
        discarded
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl verfügbarer Undo-Schritte.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Anzahl verfügbarer Redo-Schritte.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Oberster Undo-Eintrag ohne ihn zu entfernen.
    pub fn peek_undo(&self) -> Option<&T> {
        self.undo_stack.last()
    }

    /// Oberster Redo-Eintrag ohne ihn zu entfernen.
    pub fn peek_redo(&self) -> Option<&T> {
        self.redo_stack.last()
    }

    /// Pop undo stack and push `current` onto redo stack; returns the snapshot to apply.
    pub fn pop_undo_with_current(&mut self, current: T) -> Option<T> {
        let prev = self.undo_stack.pop()?;
        if self.redo_stack.len() >= self.max_depth {
            self.redo_stack.remove(0);
        }
        self.redo_stack.push(current);
        Some(prev)
    }

    /// Pop redo stack and push `current` onto undo stack; returns the snapshot to apply.
    pub fn pop_redo_with_current(&mut self, current: T) -> Option<T> {
        let next = self.redo_stack.pop()?;
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(current);
        Some(next)
    }

    /// Verwirft alle Redo-Einträge. Gibt `true` zurück, wenn welche vorhanden waren.
    pub fn clear_redo(&mut self) -> bool {
        let had_entries = !self.redo_stack.is_empty();
        self.redo_stack.clear();
        had_entries
    }

    /// Verwirft alle Undo-Einträge.
    pub fn clear_undo(&mut self) {
        self.undo_stack.clear();
    }

    /// Verwirft die gesamte Historie.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
