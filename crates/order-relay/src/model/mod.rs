//! Plain data: ids, phone numbers, webhook payloads, and the two record types
//! kept by the store actors.

pub mod customer_phone;
pub mod order_id;
pub mod phone;
pub mod webhook;
pub mod webhook_log;

pub use customer_phone::*;
pub use order_id::OrderId;
pub use phone::*;
pub use webhook::*;
pub use webhook_log::*;
