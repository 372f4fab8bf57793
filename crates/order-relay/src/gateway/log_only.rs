use super::{GatewayError, MessagingGateway, RecipientId};
use crate::model::PhoneNumber;
use async_trait::async_trait;
use tracing::info;

/// Dry-run gateway: every number exists, every message is only logged.
///
/// Used when no bridge URL is configured, so the relay can be exercised
/// end to end without a messaging session.
#[derive(Debug, Default, Clone)]
pub struct LogOnlyGateway;

impl LogOnlyGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessagingGateway for LogOnlyGateway {
    async fn resolve_recipient(&self, phone: &PhoneNumber) -> Result<Option<RecipientId>, GatewayError> {
        Ok(Some(RecipientId(format!("{phone}@c.us"))))
    }

    async fn send_message(&self, to: &RecipientId, text: &str) -> Result<(), GatewayError> {
        info!(to = %to, text, "Dry run, message not sent");
        Ok(())
    }
}
