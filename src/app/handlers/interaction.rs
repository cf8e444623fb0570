//! Handler für Klicks und "Parameter anwenden".

use crate::app::use_cases;
use crate::app::SessionState;
use crate::core::{ObjectRef, Point3, VolumeRef};
use crate::engine::SegmentationEngine;

/// Wertet einen Klick in der Ansicht aus.
pub fn apply_click(
    state: &mut SessionState,
    engine: &mut dyn SegmentationEngine,
    world_pos: Point3,
    volume: VolumeRef,
    object: ObjectRef,
) -> anyhow::Result<()> {
    use_cases::interaction::click(state, engine, world_pos, &volume, &object)?;
    Ok(())
}

/// Wiederholt die letzte Operation mit den Panel-Werten.
pub fn apply_parameters(
    state: &mut SessionState,
    engine: &mut dyn SegmentationEngine,
) -> anyhow::Result<()> {
    if use_cases::interaction::apply_parameters(state, engine)?.is_none() {
        log::debug!("Parameter anwenden: nichts zu tun");
    }
    Ok(())
}
