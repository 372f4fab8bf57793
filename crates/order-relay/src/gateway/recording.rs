//! In-memory gateway for tests.

use super::{GatewayError, MessagingGateway, RecipientId};
use crate::model::PhoneNumber;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A message the gateway accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: RecipientId,
    pub text: String,
}

#[derive(Default)]
struct State {
    unknown: HashSet<String>,
    failing: HashSet<String>,
    sent: Vec<SentMessage>,
}

/// Resolves numbers to `<digits>@c.us` and records sends.
///
/// Numbers marked with [`with_unknown`](Self::with_unknown) do not resolve;
/// sends to numbers marked with [`with_failing`](Self::with_failing) fail
/// with [`GatewayError::Rejected`].
#[derive(Default)]
pub struct RecordingGateway {
    state: Mutex<State>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown(self, phone: &str) -> Self {
        self.lock().unknown.insert(digits(phone));
        self
    }

    pub fn with_failing(self, phone: &str) -> Self {
        self.lock().failing.insert(digits(phone));
        self
    }

    /// Every accepted message, in send order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.lock().sent.clone()
    }

    /// Texts accepted for one phone number.
    pub fn sent_to(&self, phone: &str) -> Vec<String> {
        let to = recipient(&digits(phone));
        self.lock()
            .sent
            .iter()
            .filter(|m| m.to == to)
            .map(|m| m.text.clone())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn recipient(digits: &str) -> RecipientId {
    RecipientId(format!("{digits}@c.us"))
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn resolve_recipient(&self, phone: &PhoneNumber) -> Result<Option<RecipientId>, GatewayError> {
        if self.lock().unknown.contains(phone.as_str()) {
            return Ok(None);
        }
        Ok(Some(recipient(phone.as_str())))
    }

    async fn send_message(&self, to: &RecipientId, text: &str) -> Result<(), GatewayError> {
        let mut state = self.lock();
        let number = to.0.trim_end_matches("@c.us");
        if state.failing.contains(number) {
            return Err(GatewayError::Rejected {
                status: 500,
                body: format!("send to {to} failed"),
            });
        }
        state.sent.push(SentMessage {
            to: to.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}
