//! Handler für Panel-Einstellungen, Objektwahl und Diagnose.

use crate::app::use_cases;
use crate::app::SessionState;
use crate::core::{ObjectRef, RefinementMode, SegmentationFlag};

/// Setzt den Verfeinerungsmodus.
pub fn set_refinement_mode(state: &mut SessionState, mode: RefinementMode) {
    use_cases::settings::set_refinement_mode(state, mode);
}

/// Setzt ein Flag.
pub fn set_flag(state: &mut SessionState, flag: SegmentationFlag, enabled: bool) {
    use_cases::settings::set_flag(state, flag, enabled);
}

/// Wählt ein Objekt.
pub fn select_object(state: &mut SessionState, object: ObjectRef) -> anyhow::Result<()> {
    use_cases::settings::select_object(state, object)
}

/// Legt ein Objekt an und wählt es.
pub fn add_object(state: &mut SessionState, name: &str) {
    let id = use_cases::settings::add_object(state, name);
    log::debug!("Objekt '{}' gewählt", id);
}

/// Loggt die Sitzungsparameter.
pub fn log_debug_info(state: &SessionState) {
    use_cases::settings::log_debug_info(state);
}
