//! # Observability & Tracing
//!
//! Subscriber setup shared by every binary built on the runtime.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown, with the final store size
//! - **Requests**: `Create`, `Get` and `Action`, tagged with `entity_type` and the entity id
//! - **Rejections**: every entity error is logged at `warn` before it is returned
//!
//! With `RUST_LOG=debug` each request also logs its full payload once, on receipt:
//!
//! ```text
//! DEBUG Action entity_type="Order" id=order_1 action=Pay { card: Card { .. } }
//! INFO  Transition order_id=order_1 from=Placed to=PaymentCheck
//! INFO  Action ok entity_type="Order" id=order_1
//! ```
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=order_lifecycle=debug,actor_runtime=info cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber with `default_filter`, unless `RUST_LOG` is set.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
