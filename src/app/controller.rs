//! Session Controller für zentrale Event-Verarbeitung.

use super::{SessionCommand, SessionIntent, SessionState};
use crate::engine::SegmentationEngine;

/// Orchestriert Intents und Use-Cases auf den SessionState.
pub struct SessionController {
    engine: Box<dyn SegmentationEngine>,
}

impl SessionController {
    /// Erstellt einen neuen Controller mit einer Segmentierungs-Engine.
    pub fn new(engine: Box<dyn SegmentationEngine>) -> Self {
        Self { engine }
    }

    /// Name der verwendeten Engine.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut SessionState,
        intent: SessionIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(
        &self,
        state: &SessionState,
        intent: SessionIntent,
    ) -> Vec<SessionCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem SessionState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut SessionState,
        command: SessionCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Interaktion ===
            SessionCommand::ApplyClick {
                world_pos,
                volume,
                object,
            } => handlers::interaction::apply_click(
                state,
                self.engine.as_mut(),
                world_pos,
                volume,
                object,
            )?,
            SessionCommand::ApplyParameters => {
                handlers::interaction::apply_parameters(state, self.engine.as_mut())?
            }

            // === Historie ===
            SessionCommand::Undo => handlers::history::undo(state)?,
            SessionCommand::Redo => handlers::history::redo(state)?,

            // === Lebenszyklus ===
            SessionCommand::ResetSession => handlers::lifecycle::reset(state),
            SessionCommand::ActivateTool => handlers::lifecycle::activate(state),
            SessionCommand::DeactivateTool => handlers::lifecycle::deactivate(state),
            SessionCommand::HandleDocumentModified => {
                handlers::lifecycle::document_modified(state)
            }

            // === Panel & Objekte ===
            SessionCommand::SetRefinementMode { mode } => {
                handlers::settings::set_refinement_mode(state, mode)
            }
            SessionCommand::SetFlag { flag, enabled } => {
                handlers::settings::set_flag(state, flag, enabled)
            }
            SessionCommand::SelectObject { object } => {
                handlers::settings::select_object(state, object)?
            }
            SessionCommand::AddObject { name } => handlers::settings::add_object(state, &name),
            SessionCommand::LogDebugInfo => handlers::settings::log_debug_info(state),
        }

        Ok(())
    }
}
