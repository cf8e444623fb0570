//! Use-Cases der Application-Layer-Orchestrierung.

pub mod history;
pub mod interaction;
pub mod lifecycle;
pub mod settings;
