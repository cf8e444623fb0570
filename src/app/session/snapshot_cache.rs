//! Undo/Redo-Queues der Basis-Snapshots eigener Anwendungen.

use crate::core::SnapshotRef;

/// Zwei Stapel von Snapshot-Referenzen, parallel zur Parameter-Historie.
///
/// Der oberste Undo-Eintrag ist das Basisbild der letzten Anwendung und dient
/// Verfeinerungen als Ausgangsbild.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    undo_queue: Vec<SnapshotRef>,
    redo_queue: Vec<SnapshotRef>,
    max_depth: usize,
}

impl SnapshotCache {
    /// Leerer Cache mit maximaler Tiefe.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_queue: Vec::new(),
            redo_queue: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Legt einen Snapshot auf die Undo-Queue.
    pub fn push_undo(&mut self, snapshot: SnapshotRef) {
        if self.undo_queue.len() >= self.max_depth {
            self.undo_queue.remove(0);
        }
        self.undo_queue.push(snapshot);
    }

    /// Legt einen Snapshot auf die Redo-Queue.
    pub fn push_redo(&mut self, snapshot: SnapshotRef) {
        if self.redo_queue.len() >= self.max_depth {
            self.redo_queue.remove(0);
        }
        self.redo_queue.push(snapshot);
    }

    /// Oberster Undo-Eintrag (Basis für Verfeinerungen).
    pub fn top_undo(&self) -> Option<&SnapshotRef> {
        self.undo_queue.last()
    }

    /// Oberster Redo-Eintrag.
    pub fn top_redo(&self) -> Option<&SnapshotRef> {
        self.redo_queue.last()
    }

    /// Verschiebt den obersten Undo-Eintrag auf die Redo-Queue.
    ///
    /// # Panics
    /// Wenn die Undo-Queue leer ist (Buchführung verletzt).
    pub fn move_undo_to_redo(&mut self) {
        let snapshot = self
            .undo_queue
            .pop()
            .unwrap_or_else(|| panic!("Snapshot-Cache: Undo-Queue leer beim Undo"));
        self.push_redo(snapshot);
    }

    /// Verschiebt den obersten Redo-Eintrag auf die Undo-Queue.
    ///
    /// # Panics
    /// Wenn die Redo-Queue leer ist (Buchführung verletzt).
    pub fn move_redo_to_undo(&mut self) {
        let snapshot = self
            .redo_queue
            .pop()
            .unwrap_or_else(|| panic!("Snapshot-Cache: Redo-Queue leer beim Redo"));
        self.push_undo(snapshot);
    }

    /// Verwirft die Redo-Queue.
    pub fn clear_redo(&mut self) {
        self.redo_queue.clear();
    }

    /// Verwirft beide Queues.
    pub fn clear(&mut self) {
        self.undo_queue.clear();
        self.redo_queue.clear();
    }

    /// Länge der Undo-Queue.
    pub fn undo_len(&self) -> usize {
        self.undo_queue.len()
    }

    /// Länge der Redo-Queue.
    pub fn redo_len(&self) -> usize {
        self.redo_queue.len()
    }
}
