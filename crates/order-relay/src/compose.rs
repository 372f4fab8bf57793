//! Message templates.
//!
//! Pure functions from order data to message text, one per recipient and
//! event. Nothing here touches the store or the gateway.

use crate::model::{OrderId, PhoneNumber, ShipmentPayload};

/// Greeting used when the payload has no usable customer name.
const ANONYMOUS: &str = "there";

fn greeting_name(name: Option<&str>) -> &str {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(ANONYMOUS)
}

/// Confirmation sent to the customer when an order is placed.
pub fn order_placed_customer(name: Option<&str>) -> String {
    format!(
        "Hi {}, your order has been placed successfully!",
        greeting_name(name)
    )
}

/// Notice sent to each store owner when an order is placed.
pub fn order_placed_owner(order_id: Option<&OrderId>, name: Option<&str>, phone: &PhoneNumber) -> String {
    let order = match order_id {
        Some(id) => format!("New order #{id}"),
        None => "New order".to_string(),
    };
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("{order} from {name} ({phone})."),
        None => format!("{order} from {phone}."),
    }
}

/// Update sent to the customer when the shipment changes.
///
/// Status and tracking number are appended when the platform sends them.
pub fn shipment_updated(name: Option<&str>, shipment: Option<&ShipmentPayload>) -> String {
    let mut text = format!(
        "Hi {}, your shipment status has been updated!",
        greeting_name(name)
    );
    let detail = |value: Option<&String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    if let Some(shipment) = shipment {
        if let Some(status) = detail(shipment.status.as_ref()) {
            text.push_str(&format!(" Status: {status}."));
        }
        if let Some(tracking) = detail(shipment.tracking_number.as_ref()) {
            text.push_str(&format!(" Tracking number: {tracking}."));
        }
    }
    text
}

/// Notice sent to each store owner when an order is canceled.
pub fn order_canceled_owner(order_id: Option<&OrderId>, name: Option<&str>) -> String {
    let mut text = match order_id {
        Some(id) => format!("Order #{id} has been cancelled."),
        None => "Order has been cancelled.".to_string(),
    };
    if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
        text.push_str(&format!(" Customer: {name}."));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placed_message_greets_customer() {
        assert_eq!(
            order_placed_customer(Some("Mona")),
            "Hi Mona, your order has been placed successfully!"
        );
        assert_eq!(
            order_placed_customer(Some("  ")),
            "Hi there, your order has been placed successfully!"
        );
    }

    #[test]
    fn owner_notice_names_order_and_customer() {
        let phone = PhoneNumber::normalize("201001234567").unwrap();
        let id = OrderId::from(1042);
        assert_eq!(
            order_placed_owner(Some(&id), Some("Mona"), &phone),
            "New order #1042 from Mona (201001234567)."
        );
        assert_eq!(
            order_placed_owner(None, None, &phone),
            "New order from 201001234567."
        );
    }

    #[test]
    fn shipment_message_appends_known_details() {
        assert_eq!(
            shipment_updated(Some("Mona"), None),
            "Hi Mona, your shipment status has been updated!"
        );

        let shipment = ShipmentPayload {
            status: Some("out for delivery".into()),
            tracking_number: Some(" ".into()),
        };
        assert_eq!(
            shipment_updated(Some("Mona"), Some(&shipment)),
            "Hi Mona, your shipment status has been updated! Status: out for delivery."
        );
    }

    #[test]
    fn cancel_notice_falls_back_to_plain_text() {
        assert_eq!(order_canceled_owner(None, None), "Order has been cancelled.");
        let id = OrderId::from("A-7");
        assert_eq!(
            order_canceled_owner(Some(&id), Some("Mona")),
            "Order #A-7 has been cancelled. Customer: Mona."
        );
    }
}
