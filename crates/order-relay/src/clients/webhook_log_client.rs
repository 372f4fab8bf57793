//! # Webhook Log Client
use crate::model::{WebhookLogDraft, WebhookLogEntry, WebhookSignature};
use crate::webhook_log_actor::WebhookLogError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use record_actor::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for the webhook log.
#[derive(Clone)]
pub struct WebhookLogClient {
    inner: RecordClient<WebhookLogEntry>,
}

impl WebhookLogClient {
    pub fn new(inner: RecordClient<WebhookLogEntry>) -> Self {
        Self { inner }
    }

    /// Appends a processed delivery. Returns `false` when the signature was
    /// already logged.
    #[instrument(skip(self))]
    pub async fn append(
        &self,
        signature: WebhookSignature,
        processed_at: DateTime<Utc>,
    ) -> Result<bool, WebhookLogError> {
        debug!("Sending request");
        let inserted = self
            .inner
            .insert(signature, WebhookLogDraft { processed_at })
            .await
            .map_err(Self::map_error)?;
        Ok(inserted.is_created())
    }

    /// Whether a delivery with this signature was processed before.
    pub async fn contains(&self, signature: WebhookSignature) -> Result<bool, WebhookLogError> {
        Ok(self.get(signature).await?.is_some())
    }
}

#[async_trait]
impl StoreClient<WebhookLogEntry> for WebhookLogClient {
    type Error = WebhookLogError;

    fn inner(&self) -> &RecordClient<WebhookLogEntry> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        match e {
            StoreError::Entity(inner) => WebhookLogError::InvalidEntry(inner.to_string()),
            other => WebhookLogError::ActorCommunicationError(other.to_string()),
        }
    }
}
