//! # Record Messages
//!
//! The request type sent from a [`RecordClient`](crate::RecordClient) to its
//! [`RecordActor`](crate::RecordActor), and the shape of an insert result.

use crate::entity::RecordEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests a record actor understands.
///
/// The store is a flat map with write-once records, so there is no update:
/// a record is inserted, read, and eventually removed.
///
/// - **Insert**: build a record from a draft under a caller-chosen key. An
///   existing record under that key wins and is returned untouched.
/// - **Get**: fetch a clone of the record stored under a key.
/// - **Remove**: delete the record under a key, returning it if it existed.
#[derive(Debug)]
pub enum RecordRequest<T: RecordEntity> {
    Insert {
        key: T::Key,
        draft: T::Draft,
        respond_to: Response<Inserted<T>>,
    },
    Get {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    Remove {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
}

/// Outcome of an insert request.
#[derive(Debug, Clone, PartialEq)]
pub enum Inserted<T> {
    /// The draft was accepted and stored.
    Created(T),
    /// A record already lived under the key; it was kept as is.
    Existing(T),
}

impl<T> Inserted<T> {
    /// The record now stored under the key, whichever way it got there.
    pub fn into_record(self) -> T {
        match self {
            Inserted::Created(record) | Inserted::Existing(record) => record,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Inserted::Created(_))
    }
}
