//! # Webhook Receiver
//!
//! Axum routes the storefront posts to. Each endpoint parses the JSON body,
//! hands the event to the [`Dispatcher`] and answers in plain text.
//!
//! Bodies are taken as raw bytes rather than `Json<_>` so that a missing
//! content type or a malformed body gets the relay's own 400 text instead
//! of axum's rejection.

pub mod error;

pub use error::WebhookRejection;

use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::model::{EventKind, WebhookEnvelope, WebhookEvent};
use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Builds the relay's router.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/webhook/new-order", post(new_order))
        .route("/webhook/update-shipment", post(update_shipment))
        .route("/webhook/cancel-order", post(cancel_order))
        .route("/webhook", post(any_event))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

async fn health() -> &'static str {
    "ok"
}

async fn new_order(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    relay(&dispatcher, Some(EventKind::OrderPlaced), &body).await
}

async fn update_shipment(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    relay(&dispatcher, Some(EventKind::ShipmentUpdated), &body).await
}

async fn cancel_order(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    relay(&dispatcher, Some(EventKind::OrderCanceled), &body).await
}

/// Generic endpoint: the event comes from the body's `event` field.
async fn any_event(
    State(dispatcher): State<Dispatcher>,
    body: Bytes,
) -> Result<&'static str, WebhookRejection> {
    relay(&dispatcher, None, &body).await
}

fn parse_envelope(body: &[u8]) -> Result<WebhookEnvelope, String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(WebhookEnvelope::default());
    }
    serde_json::from_slice(body).map_err(|e| e.to_string())
}

fn sent_body(kind: EventKind) -> &'static str {
    match kind {
        EventKind::OrderPlaced => "New order message sent",
        EventKind::ShipmentUpdated => "Shipment update message sent",
        EventKind::OrderCanceled => "Cancel message sent",
    }
}

async fn relay(
    dispatcher: &Dispatcher,
    route_kind: Option<EventKind>,
    body: &[u8],
) -> Result<&'static str, WebhookRejection> {
    let envelope = parse_envelope(body).map_err(|reason| {
        warn!(%reason, "Rejected malformed webhook");
        WebhookRejection::invalid(route_kind, reason)
    })?;

    let kind = match route_kind {
        Some(kind) => kind,
        None => {
            let name = envelope.event.as_deref().unwrap_or_default();
            EventKind::from_event_name(name).ok_or_else(|| {
                warn!(event = name, "Rejected webhook with unknown event");
                if name.trim().is_empty() {
                    WebhookRejection::invalid(None, "missing event")
                } else {
                    WebhookRejection::invalid(None, format!("unknown event {name:?}"))
                }
            })?
        }
    };

    match dispatcher.handle(WebhookEvent::new(kind, envelope)).await {
        Ok(DispatchOutcome::Sent(_)) => Ok(sent_body(kind)),
        Ok(DispatchOutcome::Duplicate) => Ok("Duplicate webhook ignored"),
        Err(e) => Err(WebhookRejection::new(Some(kind), e)),
    }
}
