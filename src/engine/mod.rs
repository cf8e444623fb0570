//! Schnittstelle zur Segmentierungs-Engine.
//!
//! Die Engine ist ein externer Kollaborateur: sie bekommt die
//! Sitzungsparameter und ein Basisbild und liefert ein neues Label-Volumen.
//! Die Sitzung übernimmt das Ergebnis nur bei Erfolg.

mod sphere;

pub use sphere::SphereEngine;

use crate::core::{LabelVolume, OperationKind, SessionParameters};

/// Segmentierungs-Algorithmus hinter den drei Klick-Operationen.
pub trait SegmentationEngine {
    /// Kurzname für Logs.
    fn name(&self) -> &str;

    /// Neues Objekt um den Zentrumspunkt.
    fn apply(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume>;

    /// Globale Verfeinerung (ein Punkt auf der gewünschten Objektgrenze).
    fn apply_global_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume>;

    /// Lokale Verfeinerung (alle lokalen Punkte der Parameter).
    fn apply_local_refinement(
        &mut self,
        params: &SessionParameters,
        base: &LabelVolume,
    ) -> anyhow::Result<LabelVolume>;
}

/// Führt die zur Operationsart passende Engine-Methode aus.
pub fn run_operation(
    engine: &mut dyn SegmentationEngine,
    kind: OperationKind,
    params: &SessionParameters,
    base: &LabelVolume,
) -> anyhow::Result<LabelVolume> {
    match kind {
        OperationKind::New => engine.apply(params, base),
        OperationKind::GlobalRefinement => engine.apply_global_refinement(params, base),
        OperationKind::LocalRefinement => engine.apply_local_refinement(params, base),
    }
}
