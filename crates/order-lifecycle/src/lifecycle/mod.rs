//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the order actor.
//!
//! ## The Orchestration Pattern
//!
//! The order actor is simple on its own; wiring it is where the moving parts are. Its
//! collaborators are chosen here, and the actor needs a handle to its own mailbox before it
//! can hand out gateway callbacks. [`OrderSystem`] does this in three steps:
//!
//! ```rust,ignore
//! // 1. Create the actor and its client (no dependencies yet)
//! let (actor, client) = order_actor::new(config.mailbox_capacity);
//!
//! // 2. Build the context, including a weak handle back to the actor
//! let context = OrderContext::new(services, client.downgrade());
//!
//! // 3. Start it
//! let handle = tokio::spawn(actor.run(context));
//! ```
//!
//! ## Dependency Injection via Context
//!
//! The runtime uses **late binding**: the actor is constructed without dependencies and
//! receives them in `run(context)`. That is what makes the self-reference in step 2 possible.
//! Collaborators are trait objects ([`Services`](crate::services::Services)), so tests and
//! the demo binary can plug in different implementations.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the mailbox
//! 2. **The actor drains** - queued requests are still answered
//! 3. **Await completion** - [`OrderSystem::shutdown`] joins the actor task
//!
//! Gateway callbacks that are still outstanding hold only weak handles. They do not keep
//! the actor alive; resolving one after shutdown reports
//! [`OrderError::ActorCommunicationError`](crate::order_actor::OrderError::ActorCommunicationError).
//!
//! ## Observability
//!
//! Logging is set up by the binary through
//! [`actor_runtime::tracing::setup_tracing`], with the filter taken from
//! [`Config::log_filter`](crate::config::Config::log_filter) unless `RUST_LOG` is set.

pub mod order_system;

pub use order_system::*;
