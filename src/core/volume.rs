//! Label-Volumen: dichtes 3D-Raster mit Label-Werten pro Voxel.
//!
//! Das Volumen ist das Bild, das von der Segmentierungs-Engine beschrieben
//! und für Undo/Redo als komprimierter Snapshot abgelegt wird.

use anyhow::bail;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Geometrie eines Volumens (Ausdehnung, Ursprung, Voxelabstand in mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeGeometry {
    /// Anzahl Voxel pro Achse (x, y, z)
    pub dimensions: [usize; 3],
    /// Weltposition des Voxels (0, 0, 0)
    pub origin: Vec3,
    /// Voxelabstand pro Achse
    pub spacing: Vec3,
}

impl VolumeGeometry {
    /// Erstellt eine neue Geometrie.
    pub fn new(dimensions: [usize; 3], origin: Vec3, spacing: Vec3) -> Self {
        Self {
            dimensions,
            origin,
            spacing,
        }
    }

    /// Gesamtzahl der Voxel.
    pub fn voxel_count(&self) -> usize {
        self.dimensions[0] * self.dimensions[1] * self.dimensions[2]
    }

    /// Lineare Position eines Voxel-Index im Puffer (x läuft am schnellsten).
    pub fn linear_index(&self, index: [usize; 3]) -> usize {
        index[0] + self.dimensions[0] * (index[1] + self.dimensions[1] * index[2])
    }

    /// Weltkoordinate → nächster Voxel-Index, `None` außerhalb des Volumens.
    pub fn world_to_index(&self, world: Vec3) -> Option<[usize; 3]> {
        let continuous = (world - self.origin) / self.spacing;
        let rounded = continuous.round();
        let mut index = [0usize; 3];
        for axis in 0..3 {
            let value = rounded[axis];
            if !value.is_finite() || value < 0.0 || value >= self.dimensions[axis] as f32 {
                return None;
            }
            index[axis] = value as usize;
        }
        Some(index)
    }

    /// Voxel-Index → Weltkoordinate des Voxelmittelpunkts.
    pub fn index_to_world(&self, index: [usize; 3]) -> Vec3 {
        self.origin
            + Vec3::new(index[0] as f32, index[1] as f32, index[2] as f32) * self.spacing
    }
}

/// Label-Volumen mit `i16`-Labels (0 = Hintergrund).
#[derive(Debug, Clone, PartialEq)]
pub struct LabelVolume {
    geometry: VolumeGeometry,
    labels: Vec<i16>,
}

impl LabelVolume {
    /// Erstellt ein leeres Volumen (alle Voxel = 0).
    pub fn new(geometry: VolumeGeometry) -> Self {
        Self {
            labels: vec![0; geometry.voxel_count()],
            geometry,
        }
    }

    /// Baut ein Volumen aus einem bestehenden Label-Puffer.
    pub fn from_labels(geometry: VolumeGeometry, labels: Vec<i16>) -> anyhow::Result<Self> {
        if labels.len() != geometry.voxel_count() {
            bail!(
                "Label-Puffer hat {} Einträge, Geometrie erwartet {}",
                labels.len(),
                geometry.voxel_count()
            );
        }
        Ok(Self { geometry, labels })
    }

    /// Baut ein Volumen aus dem Byte-Abbild von [`LabelVolume::as_bytes`].
    pub fn from_bytes(geometry: VolumeGeometry, bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() % 2 != 0 {
            bail!("Ungerade Byte-Anzahl ({}) für i16-Labels", bytes.len());
        }
        let labels = bytes
            .chunks_exact(2)
            .map(|pair| i16::from_ne_bytes([pair[0], pair[1]]))
            .collect();
        Self::from_labels(geometry, labels)
    }

    /// Geometrie des Volumens.
    pub fn geometry(&self) -> &VolumeGeometry {
        &self.geometry
    }

    /// Read-only Sicht auf alle Labels.
    pub fn labels(&self) -> &[i16] {
        &self.labels
    }

    /// Label-Puffer als Bytes (ohne Kopie).
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.labels)
    }

    /// Label an einem Voxel-Index.
    pub fn get(&self, index: [usize; 3]) -> i16 {
        self.labels[self.geometry.linear_index(index)]
    }

    /// Setzt das Label an einem Voxel-Index.
    pub fn set(&mut self, index: [usize; 3], label: i16) {
        let linear = self.geometry.linear_index(index);
        self.labels[linear] = label;
    }

    /// Zählt Voxel mit dem angegebenen Label.
    pub fn count_label(&self, label: i16) -> usize {
        self.labels.iter().filter(|&&value| value == label).count()
    }

    /// Anzahl aller Voxel mit Label ungleich 0.
    pub fn foreground_count(&self) -> usize {
        self.labels.iter().filter(|&&value| value != 0).count()
    }
}
