//! Maps dispatch failures to HTTP responses.

use crate::dispatch::DispatchError;
use crate::model::EventKind;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A webhook the relay could not deliver, with the event it was for.
///
/// The event kind is `None` only when the generic endpoint could not tell
/// which event it received.
#[derive(Debug)]
pub struct WebhookRejection {
    kind: Option<EventKind>,
    error: DispatchError,
}

impl WebhookRejection {
    pub fn new(kind: Option<EventKind>, error: DispatchError) -> Self {
        Self { kind, error }
    }

    pub fn invalid(kind: Option<EventKind>, reason: impl Into<String>) -> Self {
        Self::new(kind, DispatchError::InvalidPayload(reason.into()))
    }

    pub fn error(&self) -> &DispatchError {
        &self.error
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            DispatchError::InvalidPayload(_) | DispatchError::RecipientNotFound(_) => {
                StatusCode::BAD_REQUEST
            }
            DispatchError::UnknownOrder(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body. Client errors explain themselves; server errors only
    /// say which message could not be sent.
    pub fn body(&self) -> String {
        if self.status().is_client_error() {
            return self.error.to_string();
        }
        match self.kind {
            Some(EventKind::ShipmentUpdated) => "Error sending shipment message",
            Some(EventKind::OrderCanceled) => "Error sending cancel message",
            Some(EventKind::OrderPlaced) | None => "Error sending message",
        }
        .to_string()
    }
}

impl IntoResponse for WebhookRejection {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}
