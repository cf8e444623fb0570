//! Mapping von Session-Intents auf mutierende Session-Commands.

use super::{SessionCommand, SessionIntent, SessionState};

/// Übersetzt einen `SessionIntent` in eine Sequenz ausführbarer `SessionCommand`s.
pub fn map_intent_to_commands(state: &SessionState, intent: SessionIntent) -> Vec<SessionCommand> {
    let mut commands = match intent {
        SessionIntent::ViewClicked { world_pos, volume } => {
            if !state.is_active() {
                log::debug!("Klick ignoriert: Werkzeug nicht aktiv");
                return Vec::new();
            }
            let Some(object) = state.selected_object.clone() else {
                log::debug!("Klick ignoriert: kein Objekt gewählt");
                return Vec::new();
            };
            vec![SessionCommand::ApplyClick {
                world_pos,
                volume,
                object,
            }]
        }
        SessionIntent::ApplyParametersClicked => vec![SessionCommand::ApplyParameters],
        SessionIntent::UndoRequested => vec![SessionCommand::Undo],
        SessionIntent::RedoRequested => vec![SessionCommand::Redo],
        SessionIntent::ResetRequested => return vec![SessionCommand::ResetSession],
        SessionIntent::ToolActivated => return vec![SessionCommand::ActivateTool],
        SessionIntent::ToolDeactivated => return vec![SessionCommand::DeactivateTool],
        SessionIntent::DocumentModified => return vec![SessionCommand::HandleDocumentModified],
        SessionIntent::RefinementModeSelected { mode } => {
            return vec![SessionCommand::SetRefinementMode { mode }]
        }
        SessionIntent::FlagToggled { flag, enabled } => {
            return vec![SessionCommand::SetFlag { flag, enabled }]
        }
        SessionIntent::ObjectSelected { object } => {
            return vec![SessionCommand::SelectObject { object }]
        }
        SessionIntent::AddObjectRequested { name } => {
            return vec![
                SessionCommand::AddObject { name },
                SessionCommand::HandleDocumentModified,
            ]
        }
    };

    if state.options.debug_info {
        commands.push(SessionCommand::LogDebugInfo);
    }
    commands
}
