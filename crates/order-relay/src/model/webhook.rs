//! Inbound webhook payloads.
//!
//! Every field below `payload.order` is optional on the wire: which ones an
//! event actually needs is decided by the dispatcher, so a cancel webhook with
//! an empty body still parses.

use crate::model::order_id::deserialize_optional_id;
use crate::model::{OrderId, WebhookSignature};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Order lifecycle events the relay understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    OrderPlaced,
    ShipmentUpdated,
    OrderCanceled,
}

impl EventKind {
    /// Stable name used in webhook signatures and logs.
    pub fn slug(self) -> &'static str {
        match self {
            EventKind::OrderPlaced => "order-placed",
            EventKind::ShipmentUpdated => "shipment-updated",
            EventKind::OrderCanceled => "order-canceled",
        }
    }

    /// Maps the `event` field of a generic webhook to a kind.
    pub fn from_event_name(name: &str) -> Option<Self> {
        match name.trim() {
            "order.placed" | "order.created" | "new-order" => Some(EventKind::OrderPlaced),
            "shipment.updated" | "order.shipment_updated" | "update-shipment" => {
                Some(EventKind::ShipmentUpdated)
            }
            "order.canceled" | "order.cancelled" | "cancel-order" => Some(EventKind::OrderCanceled),
            _ => None,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Top-level webhook body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEnvelope {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub order: OrderPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<OrderId>,
    #[serde(default)]
    pub customer: Option<CustomerPayload>,
    #[serde(default)]
    pub shipping_address: Option<AddressPayload>,
    #[serde(default)]
    pub shipment: Option<ShipmentPayload>,
}

impl OrderPayload {
    /// Customer name, if present and not blank.
    pub fn customer_name(&self) -> Option<&str> {
        self.customer
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Raw shipping phone as delivered, before normalisation.
    pub fn shipping_phone(&self) -> Option<&str> {
        self.shipping_address
            .as_ref()
            .and_then(|a| a.phone.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPayload {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPayload {
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPayload {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// One webhook delivery, with its kind resolved.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub kind: EventKind,
    pub timestamp: Option<String>,
    pub order: OrderPayload,
}

impl WebhookEvent {
    pub fn new(kind: EventKind, envelope: WebhookEnvelope) -> Self {
        Self {
            kind,
            timestamp: envelope
                .timestamp
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            order: envelope.payload.order,
        }
    }

    pub fn order_id(&self) -> Option<&OrderId> {
        self.order.id.as_ref()
    }

    /// Signature under which this delivery goes into the webhook log.
    pub fn signature(&self, received: DateTime<Utc>) -> WebhookSignature {
        match &self.timestamp {
            Some(stamp) => WebhookSignature::new(self.kind, stamp, self.order_id()),
            None => WebhookSignature::received_at(self.kind, received, self.order_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storefront_order_payload() {
        let body = r#"{
            "timestamp": "2024-05-01T10:00:00Z",
            "payload": { "order": {
                "id": 1042,
                "customer": { "name": "  Mona " },
                "shippingAddress": { "phone": "+20 155-006-8161" },
                "shipment": { "status": "shipped", "trackingNumber": "EG123" }
            } }
        }"#;
        let envelope: WebhookEnvelope = serde_json::from_str(body).unwrap();
        let event = WebhookEvent::new(EventKind::ShipmentUpdated, envelope);

        assert_eq!(event.order_id(), Some(&OrderId::from(1042)));
        assert_eq!(event.order.customer_name(), Some("Mona"));
        assert_eq!(event.order.shipping_phone(), Some("+20 155-006-8161"));
        let shipment = event.order.shipment.as_ref().unwrap();
        assert_eq!(shipment.tracking_number.as_deref(), Some("EG123"));
        assert_eq!(
            event.signature(Utc::now()).as_str(),
            "shipment-updated:2024-05-01T10:00:00Z:1042"
        );
    }

    #[test]
    fn string_ids_and_missing_sections_are_accepted() {
        let envelope: WebhookEnvelope =
            serde_json::from_str(r#"{"payload":{"order":{"id":" A-7 "}}}"#).unwrap();
        assert_eq!(envelope.payload.order.id, Some(OrderId::from("A-7")));
        assert_eq!(envelope.payload.order.customer_name(), None);

        let empty: WebhookEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.payload.order.id, None);
    }

    #[test]
    fn event_names_map_to_kinds() {
        assert_eq!(EventKind::from_event_name("order.created"), Some(EventKind::OrderPlaced));
        assert_eq!(
            EventKind::from_event_name("update-shipment"),
            Some(EventKind::ShipmentUpdated)
        );
        assert_eq!(EventKind::from_event_name("order.cancelled"), Some(EventKind::OrderCanceled));
        assert_eq!(EventKind::from_event_name("order.refunded"), None);
    }
}
