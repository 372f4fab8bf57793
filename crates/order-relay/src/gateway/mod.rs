//! # Messaging Gateway
//!
//! The outbound side of the relay: checking that a phone number exists on the
//! messaging network and sending it text.
//!
//! - [`HttpBridgeGateway`] talks to an external messaging bridge over HTTP
//! - [`LogOnlyGateway`] logs what it would send, for running without a bridge
//! - `RecordingGateway` keeps everything in memory for tests

pub mod http_bridge;
pub mod log_only;
#[cfg(any(test, feature = "testing"))]
pub mod recording;

pub use http_bridge::HttpBridgeGateway;
pub use log_only::LogOnlyGateway;
#[cfg(any(test, feature = "testing"))]
pub use recording::{RecordingGateway, SentMessage};

use crate::model::PhoneNumber;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// The gateway's handle for a number that exists on the messaging network,
/// e.g. `201550068161@c.us`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(pub String);

impl Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The request never got an HTTP answer (connect error, timeout).
    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

/// External messaging channel.
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Looks a phone number up on the network. `Ok(None)` means the number has
    /// no account there.
    async fn resolve_recipient(&self, phone: &PhoneNumber) -> Result<Option<RecipientId>, GatewayError>;

    async fn send_message(&self, to: &RecipientId, text: &str) -> Result<(), GatewayError>;
}
