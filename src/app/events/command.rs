use crate::core::{ObjectRef, Point3, RefinementMode, SegmentationFlag, VolumeRef};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Klick auswerten: neues Objekt oder Verfeinerung
    ApplyClick {
        world_pos: Point3,
        volume: VolumeRef,
        object: ObjectRef,
    },
    /// Letzte Operation mit aktuellen Panel-Werten wiederholen
    ApplyParameters,
    /// Undo über die gemeinsame Dokument-Historie
    Undo,
    /// Redo über die gemeinsame Dokument-Historie
    Redo,
    /// Sitzung zurücksetzen
    ResetSession,
    /// Werkzeug aktivieren (inkl. Reset)
    ActivateTool,
    /// Werkzeug deaktivieren (inkl. Reset)
    DeactivateTool,
    /// Fremde Dokumentänderung verarbeiten
    HandleDocumentModified,
    /// Verfeinerungsmodus im Panel setzen
    SetRefinementMode { mode: RefinementMode },
    /// Einzelnes Flag im Panel setzen
    SetFlag {
        flag: SegmentationFlag,
        enabled: bool,
    },
    /// Zielobjekt wählen
    SelectObject { object: ObjectRef },
    /// Neues Objekt im Dokument anlegen und wählen
    AddObject { name: String },
    /// Parameter-Zusammenfassung loggen
    LogDebugInfo,
}
