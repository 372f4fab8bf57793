//! Startup and shutdown errors for the relay process.

use crate::config::ConfigError;
use record_actor::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A snapshot in the data directory could not be loaded.
    #[error("Could not open store: {0}")]
    Store(#[from] SnapshotError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
