//! # Record Actor
//!
//! A small actor that owns a flat, keyed map of records and optionally keeps it
//! durable in a JSON snapshot file.
//!
//! ## Why an actor?
//!
//! Webhook handlers run concurrently, but the maps they touch (order id to
//! customer phone, webhook signatures) must see one mutation at a time and be
//! written to disk in a consistent state. Giving each map to a single Tokio
//! task that processes requests sequentially gets both without locks: the task
//! owns the `HashMap`, handlers hold cheap cloneable clients.
//!
//! ## Pieces
//!
//! - [`RecordEntity`]: what a record type implements (key, draft, error,
//!   validation in [`RecordEntity::from_draft`]).
//! - [`RecordActor`]: the server half; owns the map and the optional
//!   [`SnapshotFile`].
//! - [`RecordClient`]: the client half; `insert`, `get`, `remove`.
//! - [`StoreClient`]: trait that record-specific wrapper clients implement to
//!   inherit `get` and `remove` with their own error type.
//! - [`mock::MockClient`]: scripted client for tests.
//! - [`tracing::setup_tracing`]: subscriber setup shared by binaries.
//!
//! ## Semantics
//!
//! Records are write-once. Inserting under a key that is already taken keeps
//! the stored record and reports it as [`Inserted::Existing`]. Removing an
//! absent key is not an error and yields `None`. When a snapshot write fails
//! the mutation is rolled back in memory and the caller gets
//! [`StoreError::Snapshot`].
//!
//! ## Lifecycle
//!
//! ```rust,ignore
//! let (actor, client) = RecordActor::<CustomerPhone>::with_snapshot(32, file).await?;
//! let handle = tokio::spawn(actor.run());
//! // ... hand clones of `client` around ...
//! drop(client);          // last client gone: the loop ends
//! handle.await?;
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod snapshot;
pub mod tracing;

// Re-export core types for convenience
pub use actor::RecordActor;
pub use client::RecordClient;
pub use client_trait::StoreClient;
pub use entity::RecordEntity;
pub use error::StoreError;
pub use message::{Inserted, RecordRequest, Response};
pub use snapshot::{SnapshotError, SnapshotFile};
