//! # System Lifecycle
//!
//! Starting, wiring and stopping the relay.
//!
//! ## Startup
//!
//! [`RelaySystem::start`] opens both store actors from the data directory,
//! spawns them, and builds a [`Dispatcher`](crate::dispatch::Dispatcher)
//! holding clones of their clients and the configured gateway. A snapshot
//! that exists but cannot be parsed stops startup rather than silently
//! starting empty.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop accepting webhooks** - the HTTP server drains and drops its router
//! 2. **Drop all clients** - closes the sender side of the actor channels
//! 3. **Actors detect closure** - `receiver.recv()` returns `None`
//! 4. **Await completion** - wait for both actor tasks to finish
//!
//! Every mutation is persisted before it is acknowledged, so nothing needs
//! flushing at shutdown.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the process-wide subscriber:
//!
//! ```bash
//! RUST_LOG=info order-relay     # Compact logs
//! RUST_LOG=debug order-relay    # Full payloads and store traffic
//! ```

pub mod relay_system;

pub use record_actor::tracing::setup_tracing;
pub use relay_system::*;
