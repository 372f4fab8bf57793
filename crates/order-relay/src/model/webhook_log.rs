use crate::model::{EventKind, OrderId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identity of one webhook delivery: `<event>:<timestamp>:<order id>`.
///
/// Two deliveries with the same signature are the platform retrying the same
/// event. Missing order ids are written as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookSignature(String);

impl WebhookSignature {
    pub fn new(kind: EventKind, timestamp: &str, order_id: Option<&OrderId>) -> Self {
        let order = order_id.map_or("-", |id| id.0.as_str());
        Self(format!("{}:{}:{}", kind.slug(), timestamp, order))
    }

    /// Signature for a delivery whose payload carries no timestamp. The
    /// receipt time stands in, so such deliveries never look like retries.
    pub fn received_at(kind: EventKind, received: DateTime<Utc>, order_id: Option<&OrderId>) -> Self {
        let stamp = received.to_rfc3339_opts(SecondsFormat::Micros, true);
        Self::new(kind, &stamp, order_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for WebhookSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only record of a processed webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookLogEntry {
    pub signature: WebhookSignature,
    pub processed_at: DateTime<Utc>,
}

/// Payload for appending to the webhook log.
#[derive(Debug, Clone)]
pub struct WebhookLogDraft {
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn signature_joins_event_timestamp_and_order() {
        let id = OrderId::from(1042);
        let signature = WebhookSignature::new(EventKind::OrderPlaced, "2024-05-01T10:00:00Z", Some(&id));
        assert_eq!(signature.as_str(), "order-placed:2024-05-01T10:00:00Z:1042");
    }

    #[test]
    fn missing_order_id_becomes_dash() {
        let signature = WebhookSignature::new(EventKind::OrderCanceled, "t", None);
        assert_eq!(signature.as_str(), "order-canceled:t:-");
    }

    #[test]
    fn receipt_time_signature_is_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let signature = WebhookSignature::received_at(EventKind::ShipmentUpdated, at, None);
        assert_eq!(signature.as_str(), "shipment-updated:2024-05-01T10:00:00.000000Z:-");
    }
}
