//! Gateway backed by a messaging bridge reachable over HTTP.
//!
//! The bridge is the process holding the authenticated messaging session. It
//! exposes two JSON endpoints:
//!
//! | Request | Answer |
//! |---|---|
//! | `POST /contacts/resolve` `{"phone": "<digits>"}` | `200 {"id": "..."}`, or `404` when the number has no account |
//! | `POST /messages` `{"to": "<id>", "text": "..."}` | any 2xx |

use super::{GatewayError, MessagingGateway, RecipientId};
use crate::model::PhoneNumber;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Serialize)]
struct ResolveRequest<'a> {
    phone: &'a str,
}

#[derive(Deserialize)]
struct ResolveResponse {
    id: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    text: &'a str,
}

pub struct HttpBridgeGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBridgeGateway {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self.client.post(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn rejected(response: Response) -> GatewayError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        GatewayError::Rejected { status, body }
    }
}

fn transport(e: reqwest::Error) -> GatewayError {
    GatewayError::Transport(e.to_string())
}

#[async_trait]
impl MessagingGateway for HttpBridgeGateway {
    #[instrument(skip(self), fields(phone = %phone))]
    async fn resolve_recipient(&self, phone: &PhoneNumber) -> Result<Option<RecipientId>, GatewayError> {
        let response = self
            .post("/contacts/resolve")
            .json(&ResolveRequest {
                phone: phone.as_str(),
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!("Number not on the network");
                Ok(None)
            }
            status if status.is_success() => {
                let resolved: ResolveResponse = response
                    .json()
                    .await
                    .map_err(|e| GatewayError::Decode(e.to_string()))?;
                Ok(Some(RecipientId(resolved.id)))
            }
            _ => Err(Self::rejected(response).await),
        }
    }

    #[instrument(skip(self, text), fields(to = %to))]
    async fn send_message(&self, to: &RecipientId, text: &str) -> Result<(), GatewayError> {
        let response = self
            .post("/messages")
            .json(&SendRequest { to: &to.0, text })
            .send()
            .await
            .map_err(transport)?;

        if response.status().is_success() {
            debug!("Message accepted by bridge");
            Ok(())
        } else {
            Err(Self::rejected(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Sent = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    async fn resolve(Json(body): Json<Value>) -> Result<Json<Value>, AxumStatus> {
        match body["phone"].as_str() {
            Some("201550068161") => Ok(Json(json!({ "id": "201550068161@c.us" }))),
            _ => Err(AxumStatus::NOT_FOUND),
        }
    }

    async fn messages(
        State(sent): State<Sent>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> AxumStatus {
        if body["text"] == "fail" {
            return AxumStatus::BAD_GATEWAY;
        }
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        sent.lock().unwrap().push((auth, body));
        AxumStatus::CREATED
    }

    async fn spawn_bridge() -> (String, Sent) {
        let sent: Sent = Arc::default();
        let app = Router::new()
            .route("/contacts/resolve", post(resolve))
            .route("/messages", post(messages))
            .with_state(sent.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), sent)
    }

    #[tokio::test]
    async fn resolves_known_and_unknown_numbers() {
        let (url, _) = spawn_bridge().await;
        let gateway = HttpBridgeGateway::new(url, None, Duration::from_secs(5)).unwrap();

        let known = PhoneNumber::normalize("201550068161").unwrap();
        let unknown = PhoneNumber::normalize("2010").unwrap();
        assert_eq!(
            gateway.resolve_recipient(&known).await.unwrap(),
            Some(RecipientId("201550068161@c.us".into()))
        );
        assert_eq!(gateway.resolve_recipient(&unknown).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sends_with_bearer_token() {
        let (url, sent) = spawn_bridge().await;
        let gateway =
            HttpBridgeGateway::new(url, Some("secret".into()), Duration::from_secs(5)).unwrap();
        assert!(!gateway.base_url().ends_with('/'));

        let to = RecipientId("201550068161@c.us".into());
        gateway.send_message(&to, "hello").await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.as_deref(), Some("Bearer secret"));
        assert_eq!(sent[0].1, json!({ "to": "201550068161@c.us", "text": "hello" }));
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let (url, _) = spawn_bridge().await;
        let gateway = HttpBridgeGateway::new(url, None, Duration::from_secs(5)).unwrap();

        let to = RecipientId("201550068161@c.us".into());
        let err = gateway.send_message(&to, "fail").await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { status: 502, .. }));
    }

    #[tokio::test]
    async fn unreachable_bridge_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gateway =
            HttpBridgeGateway::new(format!("http://{addr}"), None, Duration::from_secs(2)).unwrap();
        let phone = PhoneNumber::normalize("201550068161").unwrap();
        let err = gateway.resolve_recipient(&phone).await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
