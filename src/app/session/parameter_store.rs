//! Sitzungsparameter mit eigener Checkpoint-Historie.

use crate::core::{EditHistory, SegmentationSettings, SessionParameters};

/// Hält den (höchstens einen) Parameter-Datensatz der Sitzung.
///
/// Vor jeder Anwendung wird der Datensatz gesichert, damit Undo/Redo den
/// passenden Zustand wiederherstellen kann.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    record: Option<SessionParameters>,
    history: EditHistory<SessionParameters>,
    defaults: SegmentationSettings,
}

impl ParameterStore {
    /// Leerer Store; der Datensatz entsteht erst beim ersten Zugriff.
    pub fn new(history_depth: usize, defaults: SegmentationSettings) -> Self {
        Self {
            record: None,
            history: EditHistory::new_with_capacity(history_depth),
            defaults,
        }
    }

    fn fresh(&self) -> SessionParameters {
        let mut params = SessionParameters::new();
        params.apply_settings(&self.defaults);
        params
    }

    /// Liefert den Datensatz und legt ihn bei Bedarf an.
    pub fn get(&mut self) -> &mut SessionParameters {
        let fresh = self.fresh();
        self.record.get_or_insert(fresh)
    }

    /// Datensatz ohne Anlegen.
    pub fn peek(&self) -> Option<&SessionParameters> {
        self.record.as_ref()
    }

    /// Setzt den Datensatz auf Standardwerte zurück und leert die Historie.
    pub fn reset(&mut self) {
        if let Some(record) = self.record.as_mut() {
            record.clear();
            record.apply_settings(&self.defaults);
        }
        self.history.clear();
    }

    /// Sichert den aktuellen Datensatz für Undo.
    pub fn save_checkpoint(&mut self) {
        let snapshot = self.get().clone();
        self.history.record_snapshot(snapshot);
    }

    /// Ersetzt den Datensatz (nach erfolgreicher Anwendung).
    pub fn replace(&mut self, params: SessionParameters) {
        self.record = Some(params);
    }

    /// Stellt den vorherigen Datensatz wieder her.
    pub fn undo(&mut self) -> bool {
        let current = self.get().clone();
        match self.history.pop_undo_with_current(current) {
            Some(previous) => {
                self.record = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Stellt den zuletzt rückgängig gemachten Datensatz wieder her.
    pub fn redo(&mut self) -> bool {
        let current = self.get().clone();
        match self.history.pop_redo_with_current(current) {
            Some(next) => {
                self.record = Some(next);
                true
            }
            None => false,
        }
    }

    /// Anzahl eigener Undo-Schritte.
    pub fn undo_levels(&self) -> usize {
        self.history.undo_len()
    }

    /// Anzahl eigener Redo-Schritte.
    pub fn redo_levels(&self) -> usize {
        self.history.redo_len()
    }

    /// Verwirft die eigene Redo-Historie.
    pub fn clear_redo(&mut self) {
        self.history.clear_redo();
    }
}
