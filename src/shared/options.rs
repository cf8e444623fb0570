//! Zentrale Konfiguration der Klick-Segmentierungssitzung.
//!
//! `SessionOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{RefinementMode, SegmentationFlags, SegmentationSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ── Snapshots ───────────────────────────────────────────────────────

/// Maximale Wartezeit auf einen beschäftigten Snapshot (ms).
pub const SNAPSHOT_WAIT_TIMEOUT_MS: u64 = 30_000;
/// zlib-Kompressionsstufe für Snapshots (0–9).
pub const SNAPSHOT_COMPRESSION_LEVEL: u32 = 1;

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Tiefe von Parameter-Historie und Snapshot-Cache.
pub const HISTORY_DEPTH: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Sitzungs-Optionen.
/// Wird als `click_seg_session.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    // ── Snapshots ───────────────────────────────────────────────
    /// Wartezeit auf Kompression/Dekompression in Millisekunden
    pub snapshot_wait_timeout_ms: u64,
    /// zlib-Stufe der Snapshot-Kompression
    pub snapshot_compression_level: u32,

    // ── Historie ────────────────────────────────────────────────
    /// Tiefe der Parameter-Historie, des Snapshot-Caches und der Dokument-Historie
    pub history_depth: usize,
    /// Generationsmarken für Mehr-Objekt-Betrieb
    pub generation_tracking: bool,

    // ── Diagnose ────────────────────────────────────────────────
    /// Parameter nach jeder Interaktion loggen
    pub debug_info: bool,

    // ── Options-Panel ───────────────────────────────────────────
    /// Verfeinerungsmodus nach Reset
    pub default_mode: RefinementMode,
    /// Flags nach Reset
    pub default_flags: SegmentationFlags,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            snapshot_wait_timeout_ms: SNAPSHOT_WAIT_TIMEOUT_MS,
            snapshot_compression_level: SNAPSHOT_COMPRESSION_LEVEL,
            history_depth: HISTORY_DEPTH,
            generation_tracking: true,
            debug_info: false,
            default_mode: RefinementMode::default(),
            default_flags: SegmentationFlags::default(),
        }
    }
}

impl SessionOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("click_seg_session"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("click_seg_session.toml")
    }

    /// Snapshot-Wartezeit als `Duration`.
    pub fn snapshot_wait_timeout(&self) -> Duration {
        Duration::from_millis(self.snapshot_wait_timeout_ms)
    }

    /// Standard-Einstellungen des Options-Panels.
    pub fn default_settings(&self) -> SegmentationSettings {
        SegmentationSettings {
            mode: self.default_mode,
            flags: self.default_flags,
        }
    }
}
