//! Gateway callbacks.
//!
//! A [`PaymentCallback`] is handed to the [`PaymentGateway`](crate::services::PaymentGateway)
//! with every payment or refund request. It remembers which request it answers and posts the
//! answer back into the order actor's mailbox, where it is handled like any other action.
//!
//! A gateway may answer before its `pay`/`refund` returns. The actor is busy with that very
//! request, so such an answer is queued from a separate task and applied once the dispatch
//! finishes.

use crate::model::{AttemptToken, Order, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderError};
use actor_runtime::WeakResourceClient;
use std::fmt;
use std::future::Future;
use tracing::{debug, warn};

tokio::task_local! {
    /// Set while the order actor waits on a gateway dispatch.
    static DISPATCHING: OrderId;
}

/// Runs a gateway dispatch for `order_id`, marking the actor task as busy with it.
pub(crate) async fn dispatch<F: Future>(order_id: OrderId, request: F) -> F::Output {
    DISPATCHING.scope(order_id, request).await
}

/// Kind of gateway request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayRequest {
    Payment,
    Refund,
}

impl fmt::Display for GatewayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayRequest::Payment => f.write_str("payment"),
            GatewayRequest::Refund => f.write_str("refund"),
        }
    }
}

/// What the gateway reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// Carries the confirmation code.
    Confirmed(String),
    /// Carries the gateway's reason.
    Failed(String),
}

/// One-shot answer channel for a single gateway request.
///
/// `on_success` and `on_error` take `self`, so a callback resolves at most once. The
/// callback holds a weak handle to the order actor; it does not keep the actor alive, and
/// resolving it after shutdown returns [`OrderError::ActorCommunicationError`].
pub struct PaymentCallback {
    order_id: OrderId,
    request: GatewayRequest,
    attempt: AttemptToken,
    mailbox: WeakResourceClient<Order>,
}

impl PaymentCallback {
    pub(crate) fn new(
        order_id: OrderId,
        request: GatewayRequest,
        attempt: AttemptToken,
        mailbox: WeakResourceClient<Order>,
    ) -> Self {
        Self {
            order_id,
            request,
            attempt,
            mailbox,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn request(&self) -> GatewayRequest {
        self.request
    }

    pub fn attempt(&self) -> AttemptToken {
        self.attempt
    }

    /// Reports that the request went through. Returns the order's new status.
    ///
    /// Called while the request is still being dispatched, it returns the awaiting status
    /// (`PaymentCheck` or `AwaitRefund`) and the answer is applied right after the dispatch.
    pub async fn on_success(self, code: impl Into<String>) -> Result<OrderStatus, OrderError> {
        self.resolve(GatewayOutcome::Confirmed(code.into())).await
    }

    /// Reports that the request failed. Returns the order's new status, with the same
    /// deferral as [`on_success`](Self::on_success).
    pub async fn on_error(self, reason: impl Into<String>) -> Result<OrderStatus, OrderError> {
        self.resolve(GatewayOutcome::Failed(reason.into())).await
    }

    fn awaiting_status(&self) -> OrderStatus {
        match self.request {
            GatewayRequest::Payment => OrderStatus::PaymentCheck,
            GatewayRequest::Refund => OrderStatus::AwaitRefund,
        }
    }

    async fn resolve(self, outcome: GatewayOutcome) -> Result<OrderStatus, OrderError> {
        let client = self.mailbox.upgrade().ok_or_else(|| {
            OrderError::ActorCommunicationError(format!(
                "order actor for {} has shut down",
                self.order_id
            ))
        })?;
        let action = OrderAction::ResolveGateway {
            request: self.request,
            attempt: self.attempt,
            outcome,
        };

        if let Ok(busy_with) = DISPATCHING.try_with(|id| *id) {
            debug!(
                order_id = %self.order_id,
                %busy_with,
                request = %self.request,
                "Answer queued behind dispatch"
            );
            let order_id = self.order_id;
            tokio::spawn(async move {
                if let Err(e) = client.perform_action(order_id, action).await {
                    warn!(%order_id, error = %e, "Queued gateway answer not applied");
                }
            });
            return Ok(self.awaiting_status());
        }

        client
            .perform_action(self.order_id, action)
            .await
            .map_err(|e| OrderError::from_runtime(self.order_id, e))?
            .into_status()
    }
}

impl fmt::Debug for PaymentCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentCallback")
            .field("order_id", &self.order_id)
            .field("request", &self.request)
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}
