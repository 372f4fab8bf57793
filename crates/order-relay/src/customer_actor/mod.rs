//! # Customer Phone Store
//!
//! Durable map from order id to the customer's phone and name, owned by a
//! [`RecordActor`] and persisted to `customer_phones.json` in the data
//! directory.
//!
//! ## Structure
//!
//! - [`entity`] - [`RecordEntity`](record_actor::RecordEntity) implementation for [`CustomerPhone`]
//! - [`error`] - [`CustomerError`]
//! - [`open`] / [`in_memory`] - factory functions returning the actor and its client
//!
//! ```rust
//! use order_relay::customer_actor;
//! use order_relay::model::{CustomerPhoneDraft, OrderId, PhoneNumber};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = customer_actor::in_memory();
//!     tokio::spawn(actor.run());
//!
//!     let phone = PhoneNumber::normalize("+20 155 006 8161").unwrap();
//!     client
//!         .remember(OrderId::from(1042), CustomerPhoneDraft::now(phone, "Mona"))
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CustomerClient;
use crate::model::CustomerPhone;
use record_actor::{RecordActor, SnapshotError, SnapshotFile};
use std::path::Path;

/// File name of the snapshot inside the data directory.
pub const SNAPSHOT_FILE: &str = "customer_phones.json";

const BUFFER_SIZE: usize = 32;

/// Opens the durable store under `data_dir`.
pub async fn open(
    data_dir: &Path,
) -> Result<(RecordActor<CustomerPhone>, CustomerClient), SnapshotError> {
    let snapshot = SnapshotFile::new(data_dir.join(SNAPSHOT_FILE));
    let (actor, generic_client) = RecordActor::with_snapshot(BUFFER_SIZE, snapshot).await?;
    Ok((actor, CustomerClient::new(generic_client)))
}

/// Store that lives only as long as the process.
pub fn in_memory() -> (RecordActor<CustomerPhone>, CustomerClient) {
    let (actor, generic_client) = RecordActor::new(BUFFER_SIZE);
    (actor, CustomerClient::new(generic_client))
}
