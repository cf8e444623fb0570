//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die `app` und das Binary gemeinsam nutzen.

pub mod options;

pub use options::SessionOptions;
pub use options::{HISTORY_DEPTH, SNAPSHOT_COMPRESSION_LEVEL, SNAPSHOT_WAIT_TIMEOUT_MS};
