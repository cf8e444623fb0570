//! Application-Layer: Controller, State, Events, Sitzung und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod session;
/// Application State
///
/// Dieses Modul hält Dokument, Sitzungskontext und Panel-Einstellungen.
pub mod state;
pub mod use_cases;

pub use command_log::CommandLog;
pub use controller::SessionController;
pub use events::{SessionCommand, SessionIntent};
pub use session::{SessionContext, SyncOutcome};
pub use state::SessionState;
