//! # StoreClient Trait
//!
//! Common surface for record-specific clients: implement `inner` and
//! `map_error`, get `get` and `remove` for free.
use crate::{RecordClient, RecordEntity, StoreError};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the read and remove operations.
///
/// Inserts stay on the concrete client because each record type builds its
/// draft differently.
///
/// ```rust
/// use record_actor::{RecordClient, RecordEntity, StoreClient, StoreError};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Note { text: String }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("note error: {0}")]
/// struct NoteError(String);
///
/// impl RecordEntity for Note {
///     type Key = String;
///     type Draft = String;
///     type Error = NoteError;
///     fn from_draft(_: String, text: String) -> Result<Self, NoteError> { Ok(Self { text }) }
/// }
///
/// struct NoteClient { inner: RecordClient<Note> }
///
/// #[async_trait]
/// impl StoreClient<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &RecordClient<Note> { &self.inner }
///     fn map_error(e: StoreError) -> NoteError { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // get() and remove() are provided
///     let _ = client.get("a".to_string()).await;
///     let _ = client.remove("a".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait StoreClient<T: RecordEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic RecordClient.
    fn inner(&self) -> &RecordClient<T>;

    /// Map store errors to the record-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by key.
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(key).await.map_err(Self::map_error)
    }

    /// Remove a record by key, returning it if it was stored.
    #[tracing::instrument(skip(self))]
    async fn remove(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().remove(key).await.map_err(Self::map_error)
    }
}
