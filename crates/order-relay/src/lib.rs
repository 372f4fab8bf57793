//! # Order Relay
//!
//! Receives storefront order webhooks and relays templated WhatsApp messages
//! to the customer and the store owners.
//!
//! ## Core Components
//!
//! - **[http]**: axum routes the storefront posts to.
//! - **[dispatch]**: runs one event through store, composer and gateway.
//! - **[compose]**: message templates.
//! - **[gateway]**: the messaging network behind the [`MessagingGateway`](gateway::MessagingGateway) trait.
//! - **[customer_actor]** / **[webhook_log_actor]**: durable record stores built on
//!   [`record_actor::RecordActor`], with typed wrappers in [clients].
//! - **[lifecycle]**: starts and stops the whole system.
//!
//! ## Testing
//!
//! See [`record_actor::mock`] for scripting the stores, and enable the
//! `testing` feature for the in-memory `RecordingGateway`.

pub mod clients;
pub mod compose;
pub mod config;
pub mod customer_actor;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod webhook_log_actor;
