//! Sitzungskontext: Parameter, Snapshot-Cache, Synchronizer und Generationszähler.
//!
//! Ein Kontext gehört zu genau einem Dokument. Alle Teile werden nur über
//! `&mut SessionContext` verändert.

mod identity;
mod parameter_store;
mod snapshot_cache;
mod synchronizer;

pub use identity::IdentityTracker;
pub use parameter_store::ParameterStore;
pub use snapshot_cache::SnapshotCache;
pub use synchronizer::{step_own_redo, step_own_undo, HistorySynchronizer, SyncOutcome};

use crate::core::SegmentationDocument;
use crate::shared::SessionOptions;

/// Gesamter veränderlicher Zustand einer Klick-Segmentierungssitzung.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Parameter-Datensatz mit Historie
    pub store: ParameterStore,
    /// Basis-Snapshots eigener Anwendungen
    pub cache: SnapshotCache,
    /// Abgleich mit der Dokument-Historie
    pub sync: HistorySynchronizer,
    /// Generationszähler (Mehr-Objekt-Betrieb)
    pub tracker: IdentityTracker,
    /// Werkzeug aktiv (Klicks gehen an diese Sitzung)
    pub active: bool,
    in_flight: bool,
}

impl SessionContext {
    /// Erstellt einen frischen Kontext für ein Dokument.
    pub fn new(doc: &SegmentationDocument, options: &SessionOptions) -> Self {
        Self {
            store: ParameterStore::new(options.history_depth, options.default_settings()),
            cache: SnapshotCache::new(options.history_depth),
            sync: HistorySynchronizer::new(doc),
            tracker: IdentityTracker::new(options.generation_tracking),
            active: false,
            in_flight: false,
        }
    }

    /// Setzt Parameter, Cache, Defizit und Generationen zurück.
    pub fn reset(&mut self, doc: &mut SegmentationDocument) {
        self.store.reset();
        self.cache.clear();
        self.sync.reset(doc);
        self.tracker.reset(doc);
    }

    /// Gibt `true` zurück, wenn gerade eine Anwendung läuft.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Markiert den Beginn einer Anwendung oder eines Historien-Schritts.
    ///
    /// # Panics
    /// Wenn bereits eine Anwendung läuft.
    pub fn begin_operation(&mut self, what: &str) {
        assert!(
            !self.in_flight,
            "{} während einer laufenden Anwendung nicht erlaubt",
            what
        );
        self.in_flight = true;
    }

    /// Markiert das Ende einer Anwendung.
    pub fn end_operation(&mut self) {
        self.in_flight = false;
    }
}
