//! Handler für Werkzeug-Lebenszyklus und Reset.

use crate::app::use_cases;
use crate::app::SessionState;

/// Setzt die Sitzung zurück.
pub fn reset(state: &mut SessionState) {
    use_cases::lifecycle::reset(state);
}

/// Aktiviert das Werkzeug.
pub fn activate(state: &mut SessionState) {
    use_cases::lifecycle::activate(state);
}

/// Deaktiviert das Werkzeug.
pub fn deactivate(state: &mut SessionState) {
    use_cases::lifecycle::deactivate(state);
}

/// Verarbeitet eine fremde Dokumentänderung.
pub fn document_modified(state: &mut SessionState) {
    use_cases::lifecycle::document_modified(state);
}
