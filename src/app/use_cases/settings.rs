//! Use-Case: Options-Panel, Objektwahl und Diagnose.

use crate::app::SessionState;
use crate::core::{ObjectRef, RefinementMode, SegmentationFlag};

/// Setzt den Verfeinerungsmodus im Panel.
pub fn set_refinement_mode(state: &mut SessionState, mode: RefinementMode) {
    state.settings.mode = mode;
    log::debug!("Verfeinerungsmodus: {:?}", mode);
}

/// Setzt ein einzelnes Flag im Panel.
pub fn set_flag(state: &mut SessionState, flag: SegmentationFlag, enabled: bool) {
    state.settings.flags.set(flag, enabled);
    log::debug!("Flag {:?} = {}", flag, enabled);
}

/// Wählt das Zielobjekt für folgende Klicks.
pub fn select_object(state: &mut SessionState, object: ObjectRef) -> anyhow::Result<()> {
    if state.document.object(&object).is_none() {
        anyhow::bail!("Objekt '{}' existiert nicht im Dokument", object);
    }
    state.selected_object = Some(object);
    Ok(())
}

/// Legt ein neues Objekt im Dokument an und wählt es.
pub fn add_object(state: &mut SessionState, name: &str) -> ObjectRef {
    let id = state.document.add_object(name);
    state.selected_object = Some(id.clone());
    id
}

/// Loggt die aktuellen Parameter (nur bei aktivierter Diagnose).
pub fn log_debug_info(state: &SessionState) {
    if !state.options.debug_info {
        return;
    }
    match state.params() {
        Some(params) => log::info!(
            "Sitzung: {} | Defizit {} | Generation {} | Cache {}/{}",
            params.debug_summary(),
            state.session.sync.deficit(),
            state.session.tracker.counter(),
            state.session.cache.undo_len(),
            state.session.cache.redo_len()
        ),
        None => log::info!("Sitzung: keine Parameter"),
    }
}
