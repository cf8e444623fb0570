//! Referenz-Dokument: Label-Volumen, Objekttabelle, Generationsmarken und
//! generische Undo/Redo-Historie.
//!
//! Die Historie ist werkzeugneutral: jedes Werkzeug (auch fremde) legt vor
//! einer Änderung mit [`SegmentationDocument::save_checkpoint`] einen
//! Checkpoint an. Die Bild-Snapshots der Checkpoints sind komprimiert und
//! werden mit dem Snapshot-Cache der Sitzung geteilt.

use super::{
    EditHistory, GenerationTags, ImageSnapshot, LabelVolume, ObjectRef, SnapshotRef,
    VolumeGeometry, VolumeRef,
};
use anyhow::bail;
use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;

/// Standard-Tiefe der Dokument-Historie.
pub const DEFAULT_DOCUMENT_HISTORY_DEPTH: usize = 200;
/// Standard-Kompressionsstufe der Checkpoint-Snapshots (zlib 0–9).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 1;
/// Standard-Wartezeit auf einen beschäftigten Snapshot.
pub const DEFAULT_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(30);

/// Ein Objekt (Segment) im Dokument.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentObject {
    /// Stabile Objekt-ID
    pub id: ObjectRef,
    /// Anzeigename
    pub name: String,
    /// Label-Wert im Label-Volumen
    pub label: i16,
}

/// Ein Eintrag der Dokument-Historie (Zustand vor einer Änderung).
#[derive(Debug, Clone)]
pub struct DocumentCheckpoint {
    /// Label-Volumen (komprimiert oder entpackt)
    pub image: SnapshotRef,
    objects: IndexMap<ObjectRef, SegmentObject>,
    generations: GenerationTags,
}

/// In-Memory-Dokument mit generischer Snapshot-Historie.
#[derive(Debug)]
pub struct SegmentationDocument {
    volume_ref: VolumeRef,
    label_map: LabelVolume,
    objects: IndexMap<ObjectRef, SegmentObject>,
    generations: GenerationTags,
    history: EditHistory<DocumentCheckpoint>,
    history_epoch: u64,
    compression_level: u32,
    snapshot_timeout: Duration,
}

impl SegmentationDocument {
    /// Erstellt ein leeres Dokument für ein Quellvolumen.
    pub fn new(volume_ref: VolumeRef, geometry: VolumeGeometry) -> Self {
        Self {
            volume_ref,
            label_map: LabelVolume::new(geometry),
            objects: IndexMap::new(),
            generations: GenerationTags::new(),
            history: EditHistory::new_with_capacity(DEFAULT_DOCUMENT_HISTORY_DEPTH),
            history_epoch: 0,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            snapshot_timeout: DEFAULT_SNAPSHOT_TIMEOUT,
        }
    }

    /// Setzt die maximale Historien-Tiefe (verwirft bestehende Historie).
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history = EditHistory::new_with_capacity(depth);
        self
    }

    /// Setzt Kompressionsstufe und Snapshot-Wartezeit.
    pub fn with_snapshot_settings(mut self, compression_level: u32, timeout: Duration) -> Self {
        self.compression_level = compression_level;
        self.snapshot_timeout = timeout;
        self
    }

    /// Referenz auf das Quellvolumen.
    pub fn volume_ref(&self) -> &VolumeRef {
        &self.volume_ref
    }

    /// Aktuelles Label-Volumen.
    pub fn label_map(&self) -> &LabelVolume {
        &self.label_map
    }

    /// Kompressionsstufe für Snapshots dieses Dokuments.
    pub fn compression_level(&self) -> u32 {
        self.compression_level
    }

    /// Wartezeit auf beschäftigte Snapshots.
    pub fn snapshot_timeout(&self) -> Duration {
        self.snapshot_timeout
    }

    // --- Objekte ---

    /// Fügt ein neues Objekt hinzu (als Änderung mit Checkpoint).
    pub fn add_object(&mut self, name: &str) -> ObjectRef {
        self.save_checkpoint();
        let label = self
            .objects
            .values()
            .map(|object| object.label)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let id = ObjectRef(format!("segment_{}", label));
        self.objects.insert(
            id.clone(),
            SegmentObject {
                id: id.clone(),
                name: name.to_string(),
                label,
            },
        );
        log::info!("Objekt '{}' angelegt (id={}, label={})", name, id, label);
        id
    }

    /// Objekt-Lookup per ID.
    pub fn object(&self, id: &ObjectRef) -> Option<&SegmentObject> {
        self.objects.get(id)
    }

    /// Alle Objekte in Anlagereihenfolge.
    pub fn objects(&self) -> impl Iterator<Item = &SegmentObject> {
        self.objects.values()
    }

    /// Anzahl Objekte.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    // --- Generationsmarken ---

    /// Höchste Generationsmarke im Dokument.
    pub fn current_generation(&self) -> Option<u64> {
        self.generations.max()
    }

    /// Generationsmarke eines Objekts.
    pub fn generation_of(&self, object: &ObjectRef) -> Option<u64> {
        self.generations.get(object)
    }

    /// Stempelt ein Objekt.
    pub fn set_generation(&mut self, object: &ObjectRef, generation: u64) {
        self.generations.set(object, generation);
    }

    /// Entfernt alle Marken oberhalb von `limit`.
    pub fn strip_generations_above(&mut self, limit: u64) -> usize {
        self.generations.strip_above(limit)
    }

    /// Entfernt alle Marken.
    pub fn clear_generations(&mut self) {
        self.generations.clear();
    }

    // --- Bild ---

    /// Malt ein einzelnes Voxel (Hilfsfunktion für fremde Werkzeuge).
    pub fn paint_label(&mut self, index: [usize; 3], label: i16) {
        self.label_map.set(index, label);
    }

    /// Übernimmt ein Engine-Ergebnis als neues Label-Volumen.
    pub fn commit_label_map(&mut self, volume: LabelVolume) -> anyhow::Result<()> {
        if volume.geometry() != self.label_map.geometry() {
            bail!(
                "Ergebnis-Geometrie {:?} passt nicht zum Dokument {:?}",
                volume.geometry().dimensions,
                self.label_map.geometry().dimensions
            );
        }
        self.label_map = volume;
        Ok(())
    }

    // --- Historie ---

    /// Erfasst den aktuellen Zustand als Checkpoint, ohne ihn einzutragen.
    ///
    /// Das Bild bleibt entpackt, bis [`SegmentationDocument::record_checkpoint`]
    /// die Kompression anstößt.
    pub fn capture_checkpoint(&self) -> DocumentCheckpoint {
        DocumentCheckpoint {
            image: ImageSnapshot::capture(self.label_map.clone(), self.compression_level),
            objects: self.objects.clone(),
            generations: self.generations.clone(),
        }
    }

    /// Trägt einen vorher erfassten Checkpoint in die Undo-Historie ein.
    pub fn record_checkpoint(&mut self, checkpoint: DocumentCheckpoint) -> SnapshotRef {
        let image = Arc::clone(&checkpoint.image);
        if self.history.record_snapshot(checkpoint) {
            self.bump_epoch("Redo-Zweig verworfen");
        }
        image.release();
        image
    }

    /// Sichert den aktuellen Zustand für Undo (generischer Checkpoint).
    pub fn save_checkpoint(&mut self) -> SnapshotRef {
        let checkpoint = self.capture_checkpoint();
        self.record_checkpoint(checkpoint)
    }

    /// Macht die letzte Änderung rückgängig.
    ///
    /// Gibt `Ok(false)` zurück, wenn nichts rückgängig zu machen ist.
    pub fn undo(&mut self) -> anyhow::Result<bool> {
        let Some(target) = self.history.peek_undo() else {
            log::debug!("Dokument-Undo: Historie leer");
            return Ok(false);
        };
        let image = target.image.acquire_for_read(self.snapshot_timeout)?;
        let current = self.capture_checkpoint();
        let current_image = Arc::clone(&current.image);
        let Some(previous) = self.history.pop_undo_with_current(current) else {
            return Ok(false);
        };
        self.restore(previous, &image);
        current_image.release();
        Ok(true)
    }

    /// Stellt die zuletzt rückgängig gemachte Änderung wieder her.
    pub fn redo(&mut self) -> anyhow::Result<bool> {
        let Some(target) = self.history.peek_redo() else {
            log::debug!("Dokument-Redo: Historie leer");
            return Ok(false);
        };
        let image = target.image.acquire_for_read(self.snapshot_timeout)?;
        let current = self.capture_checkpoint();
        let current_image = Arc::clone(&current.image);
        let Some(next) = self.history.pop_redo_with_current(current) else {
            return Ok(false);
        };
        self.restore(next, &image);
        current_image.release();
        Ok(true)
    }

    fn restore(&mut self, checkpoint: DocumentCheckpoint, image: &LabelVolume) {
        self.label_map = image.clone();
        self.objects = checkpoint.objects;
        self.generations = checkpoint.generations;
        checkpoint.image.release();
    }

    /// Anzahl Undo-Schritte.
    pub fn undo_level_count(&self) -> usize {
        self.history.undo_len()
    }

    /// Anzahl Redo-Schritte.
    pub fn redo_level_count(&self) -> usize {
        self.history.redo_len()
    }

    /// Verwirft alle Undo-Schritte.
    pub fn clear_undo_stack(&mut self) {
        self.history.clear_undo();
        log::debug!("Dokument-Undo-Stapel geleert");
    }

    /// Verwirft alle Redo-Schritte.
    pub fn clear_redo_stack(&mut self) {
        if self.history.clear_redo() {
            self.bump_epoch("Redo-Stapel geleert");
        }
    }

    /// Zähler, der bei jedem Verwerfen von Redo-Einträgen steigt.
    pub fn history_epoch(&self) -> u64 {
        self.history_epoch
    }

    fn bump_epoch(&mut self, reason: &str) {
        self.history_epoch += 1;
        log::debug!("Dokument-Historie: {} (Epoche {})", reason, self.history_epoch);
    }
}
