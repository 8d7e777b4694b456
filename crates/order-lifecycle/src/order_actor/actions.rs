//! Custom actions for the Order actor.
//!
//! Every operation on an existing order, including the gateway's asynchronous answers, is an
//! [`OrderAction`] handled by [`ActorEntity::handle_action`](actor_runtime::ActorEntity::handle_action).
//! See [`impl ActorEntity for Order`](crate::model::Order#impl-ActorEntity-for-Order) for the
//! transitions.

use crate::model::{AttemptToken, Card, OrderStatus};
use crate::order_actor::{GatewayOutcome, GatewayRequest, OrderError};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Computes the total cost. Changes nothing.
    QuoteTotal,
    /// Dispatches a payment for the total cost.
    Pay { card: Card },
    Cancel,
    Ship,
    /// Dispatches a refund of the confirmed payment.
    Refund,
    /// The gateway's answer to request `attempt`, delivered by a
    /// [`PaymentCallback`](crate::order_actor::PaymentCallback).
    ResolveGateway {
        request: GatewayRequest,
        attempt: AttemptToken,
        outcome: GatewayOutcome,
    },
}

/// Results from OrderActions.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// Result from QuoteTotal
    Total(f64),
    /// Status after any state-changing action
    Transitioned(OrderStatus),
}

impl OrderActionResult {
    pub fn into_total(self) -> Result<f64, OrderError> {
        match self {
            OrderActionResult::Total(total) => Ok(total),
            other => Err(unexpected(other)),
        }
    }

    pub fn into_status(self) -> Result<OrderStatus, OrderError> {
        match self {
            OrderActionResult::Transitioned(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: OrderActionResult) -> OrderError {
    OrderError::ActorCommunicationError(format!("Unexpected reply: {:?}", result))
}
