//! Error types for the customer phone store.

use thiserror::Error;

/// Errors that can occur while remembering or looking up a customer phone.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The record was refused before it was stored.
    #[error("Customer record invalid: {0}")]
    InvalidRecord(String),

    /// The store actor could not be reached or could not persist the change.
    #[error("Customer store error: {0}")]
    ActorCommunicationError(String),
}
