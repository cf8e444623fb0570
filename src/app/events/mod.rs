//! SessionIntent- und SessionCommand-Enums für den Intent/Command-Datenfluss.

mod command;
mod intent;

pub use command::SessionCommand;
pub use intent::SessionIntent;
