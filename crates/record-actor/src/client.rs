//! # Record Client
//!
//! The sending half of a record actor.

use crate::entity::RecordEntity;
use crate::error::StoreError;
use crate::message::{Inserted, RecordRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for a `RecordActor`.
///
/// Holds only a channel sender, so cloning is cheap and clones can be handed to
/// every task that needs the store. The actor stops once the last clone is
/// dropped.
pub struct RecordClient<T: RecordEntity> {
    sender: mpsc::Sender<RecordRequest<T>>,
}

// Manual impl: `T` itself need not be `Clone` for the sender to be.
impl<T: RecordEntity> Clone for RecordClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: RecordEntity> RecordClient<T> {
    pub fn new(sender: mpsc::Sender<RecordRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn insert(&self, key: T::Key, draft: T::Draft) -> Result<Inserted<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RecordRequest::Insert {
                key,
                draft,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn get(&self, key: T::Key) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RecordRequest::Get { key, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn remove(&self, key: T::Key) -> Result<Option<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RecordRequest::Remove { key, respond_to })
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }
}
