//! Error types for the webhook log.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WebhookLogError {
    #[error("Webhook log entry invalid: {0}")]
    InvalidEntry(String),

    #[error("Webhook log error: {0}")]
    ActorCommunicationError(String),
}
