//! # RecordEntity Trait
//!
//! The `RecordEntity` trait is the contract every stored record (customer phone
//! mapping, webhook log entry, ...) implements so the generic [`RecordActor`](crate::RecordActor)
//! can own it. It names the key type, the draft payload a record is built from,
//! and the record's own error type.
//!
//! Records are keyed by a caller-supplied key (an order id, a webhook
//! signature) rather than a generated id, and they are serialized as a whole
//! into the actor's snapshot file, hence the serde bounds.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be owned by a `RecordActor`.
///
/// A `CustomerPhone` record requires a `CustomerPhoneDraft`, and you can't
/// accidentally insert a `WebhookLogDraft` into the customer store: the
/// associated types keep each actor's payloads apart at compile time.
pub trait RecordEntity:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The unique key for this record (order id, webhook signature, ...).
    ///
    /// The key doubles as the JSON object key in the snapshot file, so it must
    /// serialize as a string.
    type Key: Eq
        + Hash
        + Clone
        + Send
        + Sync
        + Display
        + Debug
        + Serialize
        + DeserializeOwned;

    /// The data required to build a new record.
    type Draft: Send + Sync + Debug;

    /// The error type for this record.
    ///
    /// One enum per record type, not one per operation; the only fallible step
    /// the actor asks of a record is [`RecordEntity::from_draft`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full record from its key and draft.
    ///
    /// This is where validation lives: a draft the record refuses is reported
    /// back to the caller as [`StoreError::Entity`](crate::StoreError::Entity)
    /// and nothing is stored.
    fn from_draft(key: Self::Key, draft: Self::Draft) -> Result<Self, Self::Error>;
}
