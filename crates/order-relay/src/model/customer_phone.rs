use crate::model::{OrderId, PhoneNumber};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which customer phone an order belongs to.
///
/// # Record Actor
/// This struct implements the [`RecordEntity`](record_actor::RecordEntity) trait,
/// allowing it to be owned by a [`RecordActor`](record_actor::RecordActor).
///
/// Written once when the order is placed so later events (shipment updates)
/// can reach the customer even when their payload omits the phone, and
/// removed when the order is canceled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPhone {
    pub order_id: OrderId,
    pub phone: PhoneNumber,
    pub name: String,
    pub stored_at: DateTime<Utc>,
}

/// Payload for remembering a new order's customer.
#[derive(Debug, Clone)]
pub struct CustomerPhoneDraft {
    pub phone: PhoneNumber,
    pub name: String,
    pub stored_at: DateTime<Utc>,
}

impl CustomerPhoneDraft {
    /// Draft stamped with the current time.
    pub fn now(phone: PhoneNumber, name: impl Into<String>) -> Self {
        Self {
            phone,
            name: name.into(),
            stored_at: Utc::now(),
        }
    }
}
