use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use order_relay::dispatch::{DispatchSettings, Dispatcher};
use order_relay::gateway::RecordingGateway;
use order_relay::model::PhoneNumber;
use order_relay::{customer_actor, http, webhook_log_actor};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const OWNER: &str = "201550068161";
const CUSTOMER: &str = "201001234567";

fn app(gateway: RecordingGateway) -> (Router, Arc<RecordingGateway>) {
    let (customer_actor, customers) = customer_actor::in_memory();
    let (log_actor, webhook_log) = webhook_log_actor::in_memory();
    tokio::spawn(customer_actor.run());
    tokio::spawn(log_actor.run());

    let gateway = Arc::new(gateway);
    let dispatcher = Dispatcher::new(
        customers,
        webhook_log,
        gateway.clone(),
        DispatchSettings {
            owners: vec![PhoneNumber::normalize(OWNER).unwrap()],
            dedupe: true,
        },
    );
    (http::router(dispatcher), gateway)
}

async fn post(app: &Router, path: &str, body: impl Into<Body>) -> (StatusCode, String) {
    let request = Request::post(path)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, String) {
    post(app, path, body.to_string()).await
}

fn order(id: u64, phone: &str) -> Value {
    json!({
        "timestamp": format!("2024-05-01T10:00:0{id}Z"),
        "payload": { "order": {
            "id": id,
            "customer": { "name": "Mona" },
            "shippingAddress": { "phone": phone }
        } }
    })
}

#[tokio::test]
async fn test_health() {
    let (app, _) = app(RecordingGateway::new());
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let (app, gateway) = app(RecordingGateway::new());

    let (status, body) = post_json(&app, "/webhook/new-order", order(1, CUSTOMER)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "New order message sent");

    let shipment = json!({ "payload": { "order": { "id": 1 } } });
    let (status, body) = post_json(&app, "/webhook/update-shipment", shipment).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Shipment update message sent");

    let (status, body) = post_json(&app, "/webhook/cancel-order", json!({ "payload": { "order": { "id": 1 } } })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Cancel message sent");

    assert_eq!(gateway.sent_to(CUSTOMER).len(), 2);
    assert_eq!(gateway.sent_to(OWNER).len(), 2);
}

#[tokio::test]
async fn test_generic_endpoint_reads_event_field() {
    let (app, gateway) = app(RecordingGateway::new());

    let mut body = order(2, CUSTOMER);
    body["event"] = json!("order.created");
    let (status, text) = post_json(&app, "/webhook", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "New order message sent");
    assert_eq!(gateway.sent_to(CUSTOMER).len(), 1);

    let (status, text) = post_json(&app, "/webhook", json!({ "event": "order.refunded" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Invalid webhook payload: unknown event \"order.refunded\"");

    let (status, text) = post_json(&app, "/webhook", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text, "Invalid webhook payload: missing event");
}

#[tokio::test]
async fn test_duplicate_delivery_is_acknowledged() {
    let (app, gateway) = app(RecordingGateway::new());

    post_json(&app, "/webhook/new-order", order(3, CUSTOMER)).await;
    let (status, body) = post_json(&app, "/webhook/new-order", order(3, CUSTOMER)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Duplicate webhook ignored");
    assert_eq!(gateway.sent_to(CUSTOMER).len(), 1);
}

#[tokio::test]
async fn test_rejections_map_to_status_codes() {
    let (app, _) = app(RecordingGateway::new().with_unknown(CUSTOMER));

    let (status, body) = post_json(&app, "/webhook/new-order", order(4, "+20 100 123 4567")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Number not found on WhatsApp: 201001234567");

    let (status, body) = post(&app, "/webhook/new-order", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("Invalid webhook payload: "), "{body}");

    let (status, body) = post_json(&app, "/webhook/update-shipment", json!({ "payload": { "order": { "id": 404 } } })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Unknown order: 404");
}

#[tokio::test]
async fn test_send_failures_are_server_errors() {
    let (app, _) = app(RecordingGateway::new().with_failing(CUSTOMER).with_failing(OWNER));

    let (status, body) = post_json(&app, "/webhook/new-order", order(5, CUSTOMER)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error sending message");

    let shipment = json!({ "payload": { "order": { "shippingAddress": { "phone": CUSTOMER } } } });
    let (status, body) = post_json(&app, "/webhook/update-shipment", shipment).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error sending shipment message");

    let (status, body) = post(&app, "/webhook/cancel-order", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Error sending cancel message");
}
