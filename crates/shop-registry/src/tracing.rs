//! # Observability & Tracing
//!
//! The registry is the shop's event log. Every transition it applies is an `info`
//! event, every complaint a `warn` event, with structured fields:
//!
//! - `at`: seconds since the shop opened
//! - `id` / `customer`: the customer's id and display name
//! - `room`: the barber's room, for service events
//! - `complaint`: the complaint category
//!
//! ```bash
//! # Event log (default)
//! RUST_LOG=info cargo run
//!
//! # Barber and customer task chatter too
//! RUST_LOG=debug cargo run
//!
//! # Complaints only
//! RUST_LOG=warn cargo run
//! ```
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Customer arrived at=0.0 id=0 customer="Heidi" hair=142 goal=61
//! INFO Customer seated at=0.0 id=0 customer="Heidi"
//! INFO Service started at=0.0 id=0 customer="Heidi" room=0
//! INFO Service finished at=0.405 id=0 customer="Heidi" room=0
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber: compact format, no targets, filtered by
/// `RUST_LOG` (default `info`).
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
