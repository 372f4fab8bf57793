//! # Webhook Log
//!
//! Append-only map of processed webhook signatures, persisted to
//! `webhook_log.json`. The dispatcher appends after every successful delivery
//! and, when duplicate suppression is switched on, consults it before
//! dispatching.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::WebhookLogClient;
use crate::model::WebhookLogEntry;
use record_actor::{RecordActor, SnapshotError, SnapshotFile};
use std::path::Path;

pub const SNAPSHOT_FILE: &str = "webhook_log.json";

const BUFFER_SIZE: usize = 32;

/// Opens the durable log under `data_dir`.
pub async fn open(
    data_dir: &Path,
) -> Result<(RecordActor<WebhookLogEntry>, WebhookLogClient), SnapshotError> {
    let snapshot = SnapshotFile::new(data_dir.join(SNAPSHOT_FILE));
    let (actor, generic_client) = RecordActor::with_snapshot(BUFFER_SIZE, snapshot).await?;
    Ok((actor, WebhookLogClient::new(generic_client)))
}

pub fn in_memory() -> (RecordActor<WebhookLogEntry>, WebhookLogClient) {
    let (actor, generic_client) = RecordActor::new(BUFFER_SIZE);
    (actor, WebhookLogClient::new(generic_client))
}
