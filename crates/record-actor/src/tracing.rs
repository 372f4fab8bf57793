//! # Tracing Setup
//!
//! One call at process start installs the subscriber used by the actors, the
//! clients and everything built on them.
//!
//! ```bash
//! RUST_LOG=info order-relay                 # one line per insert/remove/send
//! RUST_LOG=debug order-relay                # full drafts and payloads
//! RUST_LOG=record_actor=debug order-relay   # only the store internals
//! ```
//!
//! Output is compact and omits module paths; the actors tag their lines with
//! `record_type` instead.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Falls back to `info` when `RUST_LOG`
/// is unset or unparsable.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
