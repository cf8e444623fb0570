//! Use-Case: Werkzeug-Lebenszyklus und Reset.

use crate::app::SessionState;

/// Setzt die Sitzung zurück (Parameter, Cache, Defizit, Generationen).
pub fn reset(state: &mut SessionState) {
    state.session.reset(&mut state.document);
    log::info!("Sitzung zurückgesetzt");
}

/// Aktiviert das Werkzeug; beginnt mit einer frischen Sitzung.
pub fn activate(state: &mut SessionState) {
    state.session.active = true;
    reset(state);
}

/// Deaktiviert das Werkzeug und verwirft die Sitzung.
pub fn deactivate(state: &mut SessionState) {
    state.session.active = false;
    reset(state);
}

/// Reagiert auf eine Dokumentänderung durch ein anderes Werkzeug.
///
/// Bei inaktivem Werkzeug ist die eigene Historie danach nicht mehr
/// vertrauenswürdig und wird verworfen.
pub fn document_modified(state: &mut SessionState) {
    if state.session.active {
        log::debug!("Dokument geändert bei aktivem Werkzeug, Sitzung bleibt bestehen");
        return;
    }
    reset(state);
}
