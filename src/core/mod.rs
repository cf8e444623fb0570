//! Core-Domänentypen: Volumen, Punktlisten, Parameter, Snapshots, Dokument.

pub mod document;
pub mod generation;
pub mod history;
pub mod parameters;
pub mod point_list;
pub mod snapshot;
pub mod volume;

/// Weltpunkt (RAS, mm).
pub type Point3 = glam::Vec3;

pub use document::{DocumentCheckpoint, SegmentObject, SegmentationDocument};
pub use generation::GenerationTags;
pub use history::EditHistory;
pub use parameters::{
    ObjectRef, OperationKind, RefinementMode, SegmentationFlag, SegmentationFlags,
    SegmentationSettings, SessionParameters, VolumeRef,
};
pub use point_list::PointList;
pub use snapshot::{ImageSnapshot, SnapshotRef, SnapshotStatus};
pub use volume::{LabelVolume, VolumeGeometry};
