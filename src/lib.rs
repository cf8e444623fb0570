//! Klick-Segmentierungssitzung.
//! Core-Funktionalität als Library exportiert für Tests, Benchmarks und Host-Anwendungen.

pub mod app;
pub mod core;
pub mod engine;
pub mod shared;

pub use app::{
    SessionCommand, SessionContext, SessionController, SessionIntent, SessionState, SyncOutcome,
};
pub use core::{
    ImageSnapshot, LabelVolume, ObjectRef, OperationKind, Point3, RefinementMode,
    SegmentationDocument, SegmentationFlag, SegmentationFlags, SegmentationSettings,
    SessionParameters, SnapshotRef, VolumeGeometry, VolumeRef,
};
pub use engine::{SegmentationEngine, SphereEngine};
pub use shared::SessionOptions;
