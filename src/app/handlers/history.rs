//! Handler für Undo/Redo-Operationen.

use crate::app::use_cases;
use crate::app::SessionState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut SessionState) -> anyhow::Result<()> {
    use_cases::history::undo(state)?;
    Ok(())
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut SessionState) -> anyhow::Result<()> {
    use_cases::history::redo(state)?;
    Ok(())
}
