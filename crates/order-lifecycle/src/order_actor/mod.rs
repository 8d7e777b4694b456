//! # Order Actor
//!
//! The order state machine, hosted by a [`ResourceActor<Order>`](actor_runtime::ResourceActor).
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_runtime::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`] / [`OrderActionResult`]
//! - [`callback`] - [`PaymentCallback`], the gateway's way back into the actor
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] / [`spawn()`] - Factory functions
//!
//! ## State machine
//!
//! ```text
//!            pay                 on_success            refund              on_success
//! Placed ---------> PaymentCheck ----------> Paid ------------> AwaitRefund ----------> Refunded
//!   |                 |   ^                   |                   |   ^
//!   |        on_error |   | pay               | ship     on_error |   | refund
//!   |                 v   |                   v                   v   |
//!   |               PaymentError            Shipped             RefundError
//!   |                 |
//!   +-----------------+----> Canceled   (cancel)
//! ```
//!
//! All transitions for all orders run inside the single actor task, so a status check and the
//! change it guards can never interleave with another call or a gateway answer.

pub mod actions;
pub mod callback;
pub mod entity;
pub mod error;

pub use actions::*;
pub use callback::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use crate::services::Services;
use actor_runtime::{ResourceActor, WeakResourceClient};

/// Dependencies injected into the Order actor.
pub struct OrderContext {
    pub(crate) services: Services,
    /// The actor's own mailbox, for the callbacks it hands out.
    pub(crate) mailbox: WeakResourceClient<Order>,
}

impl OrderContext {
    pub fn new(services: Services, mailbox: WeakResourceClient<Order>) -> Self {
        Self { services, mailbox }
    }
}

/// Creates a new Order actor and its client.
pub fn new(capacity: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(capacity);
    (actor, OrderClient::new(generic_client))
}

/// Creates the Order actor, wires it to `services` and starts it.
///
/// The actor stops once every clone of the returned client is dropped.
pub fn spawn(
    capacity: usize,
    services: Services,
) -> (OrderClient, tokio::task::JoinHandle<()>) {
    let (actor, client) = new(capacity);
    let context = OrderContext::new(services, client.downgrade());
    let handle = tokio::spawn(actor.run(context));
    (client, handle)
}
