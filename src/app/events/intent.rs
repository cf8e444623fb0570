use crate::core::{ObjectRef, Point3, RefinementMode, SegmentationFlag, VolumeRef};

/// Session-Intents.
/// Intents sind Eingaben aus View/Panel/Host ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum SessionIntent {
    /// Linksklick in eine Schichtansicht (bereits in Weltkoordinaten)
    ViewClicked {
        world_pos: Point3,
        volume: VolumeRef,
    },
    /// "Parameter anwenden" im Options-Panel
    ApplyParametersClicked,
    /// Undo (Ctrl+Z)
    UndoRequested,
    /// Redo (Ctrl+Y)
    RedoRequested,
    /// Sitzung explizit zurücksetzen
    ResetRequested,
    /// Werkzeug wurde aktiviert
    ToolActivated,
    /// Werkzeug wurde deaktiviert
    ToolDeactivated,
    /// Das Dokument wurde von außen verändert (Objekt hinzugefügt/entfernt/geändert)
    DocumentModified,
    /// Verfeinerungsmodus im Panel gewählt
    RefinementModeSelected { mode: RefinementMode },
    /// Checkbox im Panel umgeschaltet
    FlagToggled {
        flag: SegmentationFlag,
        enabled: bool,
    },
    /// Objekt in der Objektliste gewählt
    ObjectSelected { object: ObjectRef },
    /// "Objekt hinzufügen" in der Objektliste
    AddObjectRequested { name: String },
}
