//! [`RecordEntity`] implementation for [`WebhookLogEntry`].

use super::WebhookLogError;
use crate::model::{WebhookLogDraft, WebhookLogEntry, WebhookSignature};
use record_actor::RecordEntity;

impl RecordEntity for WebhookLogEntry {
    type Key = WebhookSignature;
    type Draft = WebhookLogDraft;
    type Error = WebhookLogError;

    fn from_draft(signature: WebhookSignature, draft: WebhookLogDraft) -> Result<Self, Self::Error> {
        if signature.as_str().is_empty() {
            return Err(WebhookLogError::InvalidEntry("empty signature".into()));
        }
        Ok(Self {
            signature,
            processed_at: draft.processed_at,
        })
    }
}
