//! Sitzungsparameter: Modus, Flags, Referenzen und Punktlisten.
//!
//! `SessionParameters` ist der eine veränderliche Datensatz einer Sitzung.
//! Er wird bei jeder Anwendung vorher gesichert und nimmt so an Undo/Redo teil.

use super::PointList;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verfeinerungsmodus für Klicks auf ein bestehendes Objekt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RefinementMode {
    /// Jeder Klick startet ein neues Objekt
    NoRefinement,
    /// Ein einzelner Punkt verschiebt die Objektgrenze global
    #[default]
    GlobalRefinement,
    /// Jeder Klick fügt einen lokalen Verfeinerungspunkt hinzu
    LocalRefinement,
}

/// Art einer Engine-Anwendung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    /// Neues Objekt um einen Zentrumspunkt
    New,
    /// Globale Verfeinerung des bestehenden Objekts
    GlobalRefinement,
    /// Lokale Verfeinerung des bestehenden Objekts
    LocalRefinement,
}

/// Einzelnes Segmentierungs-Flag (für generische Setter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentationFlag {
    AssistCentering,
    AllowOverwriting,
    Splitting,
    Sealing,
    DenoiseThreshold,
    LinearCost,
    NecroticRegion,
}

/// Die sieben booleschen Segmentierungs-Optionen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationFlags {
    /// Zentrumspunkt für die Segmentierung nachjustieren
    pub assist_centering: bool,
    /// Bestehende Labels anderer Objekte überschreiben
    pub allow_overwriting: bool,
    /// Modifizierte Trennungskosten anwenden
    pub splitting: bool,
    /// Segmentierung nach der Voxelisierung versiegeln
    pub sealing: bool,
    /// Schwellwert auf median-gefiltertem Bild bestimmen
    pub denoise_threshold: bool,
    /// Kostenfunktion am unteren Ende linear setzen
    pub linear_cost: bool,
    /// Nekrotischer Modus (hohler Kern)
    pub necrotic_region: bool,
}

impl Default for SegmentationFlags {
    fn default() -> Self {
        Self {
            assist_centering: true,
            allow_overwriting: false,
            splitting: false,
            sealing: false,
            denoise_threshold: false,
            linear_cost: false,
            necrotic_region: false,
        }
    }
}

impl SegmentationFlags {
    /// Liest ein einzelnes Flag.
    pub fn get(&self, flag: SegmentationFlag) -> bool {
        match flag {
            SegmentationFlag::AssistCentering => self.assist_centering,
            SegmentationFlag::AllowOverwriting => self.allow_overwriting,
            SegmentationFlag::Splitting => self.splitting,
            SegmentationFlag::Sealing => self.sealing,
            SegmentationFlag::DenoiseThreshold => self.denoise_threshold,
            SegmentationFlag::LinearCost => self.linear_cost,
            SegmentationFlag::NecroticRegion => self.necrotic_region,
        }
    }

    /// Setzt ein einzelnes Flag.
    pub fn set(&mut self, flag: SegmentationFlag, enabled: bool) {
        let slot = match flag {
            SegmentationFlag::AssistCentering => &mut self.assist_centering,
            SegmentationFlag::AllowOverwriting => &mut self.allow_overwriting,
            SegmentationFlag::Splitting => &mut self.splitting,
            SegmentationFlag::Sealing => &mut self.sealing,
            SegmentationFlag::DenoiseThreshold => &mut self.denoise_threshold,
            SegmentationFlag::LinearCost => &mut self.linear_cost,
            SegmentationFlag::NecroticRegion => &mut self.necrotic_region,
        };
        *slot = enabled;
    }
}

/// Einstellungen aus dem Options-Panel (Modus + Flags).
///
/// Wird vor jeder Anwendung in die Parameter übernommen und nach
/// Undo/Redo aus den wiederhergestellten Parametern zurückgelesen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentationSettings {
    /// Verfeinerungsmodus
    pub mode: RefinementMode,
    /// Segmentierungs-Flags
    pub flags: SegmentationFlags,
}

/// Opake Referenz auf das Quellvolumen (z.B. PET-Serie).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VolumeRef(pub String);

/// Opake Referenz auf ein Objekt (Segment) im Dokument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectRef(pub String);

impl From<&str> for VolumeRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ObjectRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for VolumeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Der Sitzungsdatensatz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParameters {
    /// Aktiver Verfeinerungsmodus
    pub mode: RefinementMode,
    /// Segmentierungs-Flags
    pub flags: SegmentationFlags,
    /// Quellvolumen der letzten Anwendung
    pub target_volume: Option<VolumeRef>,
    /// Zielobjekt der letzten Anwendung
    pub target_object: Option<ObjectRef>,
    /// Label-Wert des Zielobjekts
    pub label: i16,
    /// Zentrumspunkte (genau einer pro begonnenem Objekt)
    pub center_points: PointList,
    /// Globaler Verfeinerungspunkt (höchstens einer)
    pub global_refinement_points: PointList,
    /// Lokale Verfeinerungspunkte (wachsen bis zum nächsten Neustart)
    pub local_refinement_points: PointList,
    /// Art der letzten Anwendung (für erneutes Anwenden mit neuen Flags)
    pub last_operation: Option<OperationKind>,
}

impl Default for SessionParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionParameters {
    /// Erstellt einen frischen Datensatz mit drei leeren Punktlisten.
    pub fn new() -> Self {
        Self {
            mode: RefinementMode::default(),
            flags: SegmentationFlags::default(),
            target_volume: None,
            target_object: None,
            label: 0,
            center_points: PointList::new(),
            global_refinement_points: PointList::with_limit(1),
            local_refinement_points: PointList::new(),
            last_operation: None,
        }
    }

    /// Setzt alle Werte auf Standard zurück und leert alle Punktlisten.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Leert nur die drei Punktlisten.
    pub fn clear_points(&mut self) {
        self.center_points.remove_all();
        self.global_refinement_points.remove_all();
        self.local_refinement_points.remove_all();
    }

    /// Gibt `true` zurück, wenn für das aktuelle Ziel ein Objekt begonnen wurde.
    pub fn has_object(&self) -> bool {
        !self.center_points.is_empty()
    }

    /// Übernimmt Modus und Flags aus dem Options-Panel.
    pub fn apply_settings(&mut self, settings: &SegmentationSettings) {
        self.mode = settings.mode;
        self.flags = settings.flags;
    }

    /// Modus und Flags als Panel-Einstellungen.
    pub fn settings(&self) -> SegmentationSettings {
        SegmentationSettings {
            mode: self.mode,
            flags: self.flags,
        }
    }

    /// Aktueller Zentrumspunkt.
    pub fn center(&self) -> Option<Vec3> {
        self.center_points.last()
    }

    /// Serialisiert den Datensatz als JSON (zum Speichern mit dem Dokument).
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Liest einen Datensatz aus JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Kurzbeschreibung für Debug-Ausgaben.
    pub fn debug_summary(&self) -> String {
        format!(
            "volume={} object={} label={} mode={:?} #center={} #global={} #local={}",
            self.target_volume
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            self.target_object
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string),
            self.label,
            self.mode,
            self.center_points.count(),
            self.global_refinement_points.count(),
            self.local_refinement_points.count(),
        )
    }
}
