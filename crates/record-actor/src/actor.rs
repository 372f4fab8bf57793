//! # Record Actor
//!
//! `RecordActor` owns a keyed map of records and processes requests one at a
//! time, so the map needs no locking. When built with a [`SnapshotFile`] it
//! loads the map on construction and rewrites the file after every insert or
//! removal.

use crate::client::RecordClient;
use crate::entity::RecordEntity;
use crate::error::StoreError;
use crate::message::{Inserted, RecordRequest};
use crate::snapshot::{SnapshotError, SnapshotFile};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// The generic actor that manages a map of records.
///
/// This struct is the "server" half: it owns the map and the receiving end of
/// the channel. Create it with [`RecordActor::new`] (in memory) or
/// [`RecordActor::with_snapshot`] (durable), hand the returned
/// [`RecordClient`] to whoever needs the store, and spawn [`RecordActor::run`].
///
/// ```rust
/// use record_actor::{RecordActor, RecordEntity};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Note { key: String, text: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("empty note")]
/// struct EmptyNote;
///
/// impl RecordEntity for Note {
///     type Key = String;
///     type Draft = String;
///     type Error = EmptyNote;
///
///     fn from_draft(key: String, text: String) -> Result<Self, EmptyNote> {
///         if text.is_empty() { return Err(EmptyNote); }
///         Ok(Self { key, text })
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = RecordActor::<Note>::new(10);
///     tokio::spawn(actor.run());
///
///     client.insert("a".into(), "hello".into()).await.unwrap();
///     let note = client.get("a".into()).await.unwrap().unwrap();
///     assert_eq!(note.text, "hello");
/// }
/// ```
pub struct RecordActor<T: RecordEntity> {
    receiver: mpsc::Receiver<RecordRequest<T>>,
    store: HashMap<T::Key, T>,
    snapshot: Option<SnapshotFile>,
}

impl<T: RecordEntity> RecordActor<T> {
    /// Creates an in-memory actor and its client.
    ///
    /// `buffer_size` is the channel capacity; once it is full, client calls
    /// wait for room.
    pub fn new(buffer_size: usize) -> (Self, RecordClient<T>) {
        Self::build(buffer_size, HashMap::new(), None)
    }

    /// Creates an actor backed by `snapshot`, loading whatever the file holds.
    pub async fn with_snapshot(
        buffer_size: usize,
        snapshot: SnapshotFile,
    ) -> Result<(Self, RecordClient<T>), SnapshotError> {
        let store = snapshot.load().await?;
        info!(
            path = %snapshot.path().display(),
            records = store.len(),
            "Snapshot loaded"
        );
        Ok(Self::build(buffer_size, store, Some(snapshot)))
    }

    fn build(
        buffer_size: usize,
        store: HashMap<T::Key, T>,
        snapshot: Option<SnapshotFile>,
    ) -> (Self, RecordClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store,
            snapshot,
        };
        (actor, RecordClient::new(sender))
    }

    async fn persist(&self) -> Result<(), StoreError> {
        match &self.snapshot {
            Some(snapshot) => Ok(snapshot.store(&self.store).await?),
            None => Ok(()),
        }
    }

    /// Runs the actor's event loop until every client is dropped.
    pub async fn run(mut self) {
        // "CustomerPhone" rather than "order_relay::model::customer_phone::CustomerPhone"
        let record_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(record_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RecordRequest::Insert {
                    key,
                    draft,
                    respond_to,
                } => {
                    debug!(record_type, %key, ?draft, "Insert");
                    if let Some(existing) = self.store.get(&key) {
                        info!(record_type, %key, "Already present, keeping stored record");
                        let _ = respond_to.send(Ok(Inserted::Existing(existing.clone())));
                        continue;
                    }

                    let record = match T::from_draft(key.clone(), draft) {
                        Ok(record) => record,
                        Err(e) => {
                            warn!(record_type, %key, error = %e, "Insert rejected");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                            continue;
                        }
                    };

                    self.store.insert(key.clone(), record.clone());
                    if let Err(e) = self.persist().await {
                        error!(record_type, %key, error = %e, "Insert not persisted, rolled back");
                        self.store.remove(&key);
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(record_type, %key, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(Inserted::Created(record)));
                }
                RecordRequest::Get { key, respond_to } => {
                    let record = self.store.get(&key).cloned();
                    let found = record.is_some();
                    debug!(record_type, %key, found, "Get");
                    let _ = respond_to.send(Ok(record));
                }
                RecordRequest::Remove { key, respond_to } => {
                    debug!(record_type, %key, "Remove");
                    let Some(record) = self.store.remove(&key) else {
                        debug!(record_type, %key, "Nothing to remove");
                        let _ = respond_to.send(Ok(None));
                        continue;
                    };

                    if let Err(e) = self.persist().await {
                        error!(record_type, %key, error = %e, "Remove not persisted, rolled back");
                        self.store.insert(key, record);
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    info!(record_type, %key, size = self.store.len(), "Removed");
                    let _ = respond_to.send(Ok(Some(record)));
                }
            }
        }

        info!(record_type, size = self.store.len(), "Shutdown");
    }
}
