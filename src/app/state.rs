//! Application State: Dokument, Sitzungskontext und Panel-Einstellungen.

use super::session::SessionContext;
use super::CommandLog;
use crate::core::{
    ObjectRef, SegmentationDocument, SegmentationSettings, SessionParameters, VolumeGeometry,
    VolumeRef,
};
use crate::shared::SessionOptions;

/// Hauptzustand einer Segmentierungssitzung
pub struct SessionState {
    /// Das bearbeitete Dokument (Historie wird mit anderen Werkzeugen geteilt)
    pub document: SegmentationDocument,
    /// Parameter, Snapshot-Cache, Synchronizer, Generationszähler
    pub session: SessionContext,
    /// Aktuelle Werte des Options-Panels
    pub settings: SegmentationSettings,
    /// In der Objektliste gewähltes Objekt
    pub selected_object: Option<ObjectRef>,
    /// Laufzeit-Optionen
    pub options: SessionOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
}

impl SessionState {
    /// Erstellt einen State für ein bestehendes Dokument.
    pub fn new(document: SegmentationDocument, options: SessionOptions) -> Self {
        let session = SessionContext::new(&document, &options);
        Self {
            document,
            session,
            settings: options.default_settings(),
            selected_object: None,
            options,
            command_log: CommandLog::new(),
        }
    }

    /// Erstellt ein leeres Dokument gemäß den Optionen und den State dazu.
    pub fn with_volume(volume: VolumeRef, geometry: VolumeGeometry, options: SessionOptions) -> Self {
        let document = SegmentationDocument::new(volume, geometry)
            .with_history_depth(options.history_depth)
            .with_snapshot_settings(
                options.snapshot_compression_level,
                options.snapshot_wait_timeout(),
            );
        Self::new(document, options)
    }

    /// Aktueller Parameter-Datensatz (falls schon angelegt).
    pub fn params(&self) -> Option<&SessionParameters> {
        self.session.store.peek()
    }

    /// Gibt `true` zurück, wenn das Werkzeug aktiv ist.
    pub fn is_active(&self) -> bool {
        self.session.active
    }
}
