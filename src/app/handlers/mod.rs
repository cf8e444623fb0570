//! Feature-Handler für SessionCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod history;
pub mod interaction;
pub mod lifecycle;
pub mod settings;
