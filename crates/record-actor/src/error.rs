//! # Store Errors
//!
//! Errors shared by every record actor and its clients.

use crate::snapshot::SnapshotError;

/// Errors that can occur within the record actor itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Record rejected: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),
}
