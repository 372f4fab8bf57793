//! # Mock Record Store
//!
//! `MockClient<T>` hands out a real [`RecordClient<T>`] whose requests are
//! answered from a queue of expectations instead of an actor. Use it to test
//! code that talks to a store (a dispatcher, a wrapper client) without spawning
//! the actor, and to inject failures that are awkward to provoke for real,
//! such as a snapshot write error.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted answers | real map, optional snapshot |
//! | **Error injection** | `return_err` | needs a broken filesystem |
//! | **Use case** | logic *around* the store | the store itself, full system |
//!
//! ```rust
//! use record_actor::mock::MockClient;
//! use record_actor::{RecordEntity, StoreError};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
//! struct Note { text: String }
//! #[derive(Debug, thiserror::Error)] #[error("bad note")] struct NoteError;
//!
//! impl RecordEntity for Note {
//!     type Key = String; type Draft = String; type Error = NoteError;
//!     fn from_draft(_: String, text: String) -> Result<Self, NoteError> { Ok(Self { text }) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     mock.expect_get("a".to_string()).return_ok(None);
//!     mock.expect_remove("a".to_string()).return_err(StoreError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get("a".to_string()).await.unwrap(), None);
//!     assert!(matches!(client.remove("a".to_string()).await, Err(StoreError::ActorClosed)));
//!
//!     mock.verify();
//! }
//! ```
//!
//! Requests that do not match the next expectation (wrong operation or wrong
//! key) are answered with [`StoreError::ActorDropped`] and recorded; `verify`
//! panics with the list of mismatches.

use crate::client::RecordClient;
use crate::entity::RecordEntity;
use crate::error::StoreError;
use crate::message::{Inserted, RecordRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// An expected request and the answer to give it.
enum Expectation<T: RecordEntity> {
    Insert {
        key: T::Key,
        response: Result<Inserted<T>, StoreError>,
    },
    Get {
        key: T::Key,
        response: Result<Option<T>, StoreError>,
    },
    Remove {
        key: T::Key,
        response: Result<Option<T>, StoreError>,
    },
}

struct MockState<T: RecordEntity> {
    expectations: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: RecordEntity>(state: &Shared<T>) -> MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A scripted record store for tests.
pub struct MockClient<T: RecordEntity> {
    client: RecordClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: RecordEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RecordEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RecordRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_state).expectations.pop_front();

                let mismatch = match (request, expectation) {
                    (
                        RecordRequest::Insert {
                            key, respond_to, ..
                        },
                        Some(Expectation::Insert {
                            key: expected,
                            response,
                        }),
                    ) if key == expected => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        RecordRequest::Get { key, respond_to },
                        Some(Expectation::Get {
                            key: expected,
                            response,
                        }),
                    ) if key == expected => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (
                        RecordRequest::Remove { key, respond_to },
                        Some(Expectation::Remove {
                            key: expected,
                            response,
                        }),
                    ) if key == expected => {
                        let _ = respond_to.send(response);
                        None
                    }
                    (request, expectation) => Some(describe(request, expectation)),
                };

                if let Some(mismatch) = mismatch {
                    lock(&task_state).mismatches.push(mismatch);
                }
            }
        });

        Self {
            client: RecordClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> RecordClient<T> {
        self.client.clone()
    }

    /// Expects an `insert` under `key`.
    pub fn expect_insert(&mut self, key: T::Key) -> ExpectationBuilder<T, Inserted<T>> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Insert {
            key,
            response,
        })
    }

    /// Expects a `get` of `key`.
    pub fn expect_get(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Get {
            key,
            response,
        })
    }

    /// Expects a `remove` of `key`.
    pub fn expect_remove(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Remove {
            key,
            response,
        })
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: RecordEntity, R> {
    state: Shared<T>,
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
}

impl<T: RecordEntity, R> ExpectationBuilder<T, R> {
    fn new(
        state: Shared<T>,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            state,
            make: Box::new(make),
        }
    }

    /// Answers the request with `value`.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.state).expectations.push_back(expectation);
    }

    /// Answers the request with `error`.
    pub fn return_err(self, error: StoreError) {
        let expectation = (self.make)(Err(error));
        lock(&self.state).expectations.push_back(expectation);
    }
}

fn describe<T: RecordEntity>(
    request: RecordRequest<T>,
    expectation: Option<Expectation<T>>,
) -> String {
    let got = match &request {
        RecordRequest::Insert { key, .. } => format!("insert({key})"),
        RecordRequest::Get { key, .. } => format!("get({key})"),
        RecordRequest::Remove { key, .. } => format!("remove({key})"),
    };
    let wanted = match &expectation {
        Some(Expectation::Insert { key, .. }) => format!("insert({key})"),
        Some(Expectation::Get { key, .. }) => format!("get({key})"),
        Some(Expectation::Remove { key, .. }) => format!("remove({key})"),
        None => "nothing".to_string(),
    };
    match request {
        RecordRequest::Insert { respond_to, .. } => {
            let _ = respond_to.send(Err(StoreError::ActorDropped));
        }
        RecordRequest::Get { respond_to, .. } | RecordRequest::Remove { respond_to, .. } => {
            let _ = respond_to.send(Err(StoreError::ActorDropped));
        }
    }
    format!("got {got}, expected {wanted}")
}
