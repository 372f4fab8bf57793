//! Type-safe wrappers around [`RecordClient`](record_actor::RecordClient).

pub mod customer_client;
pub mod webhook_log_client;

pub use customer_client::*;
pub use webhook_log_client::*;
