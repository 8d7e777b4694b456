//! ActorEntity implementation for the Order domain type.
//!
//! Every state change follows the same sequence: build the next state on a copy, persist the
//! copy, and only then replace the in-memory order. A failed write therefore never leaves the
//! actor ahead of the store.

use crate::model::{AttemptToken, Card, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::callback::dispatch;
use crate::order_actor::{
    GatewayOutcome, GatewayRequest, OrderAction, OrderActionResult, OrderContext, OrderError,
    PaymentCallback,
};
use crate::services::ServiceError;
use actor_runtime::ActorEntity;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    async fn assign_id(ctx: &OrderContext) -> Result<OrderId, OrderError> {
        ctx.services
            .store
            .next_order_id()
            .await
            .map_err(OrderError::Persistence)
    }

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Order::new(id, params))
    }

    /// Persists the placed order. The order is discarded if the write fails.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), OrderError> {
        ctx.services
            .store
            .update(self)
            .await
            .map_err(OrderError::Persistence)?;
        info!(
            order_id = %self.id,
            customer = %self.customer_name,
            product = %self.product_name,
            quantity = self.quantity,
            "Order placed"
        );
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::QuoteTotal => self.total_cost(ctx).await.map(OrderActionResult::Total),
            OrderAction::Pay { card } => self.pay(&card, ctx).await,
            OrderAction::Cancel => self.cancel(ctx).await,
            OrderAction::Ship => self.ship(ctx).await,
            OrderAction::Refund => self.refund(ctx).await,
            OrderAction::ResolveGateway {
                request,
                attempt,
                outcome,
            } => self.resolve_gateway(request, attempt, outcome, ctx).await,
        }
    }
}

impl Order {
    /// `unit_price * quantity + shipping_fee(total_weight)`, recomputed on every call.
    async fn total_cost(&self, ctx: &OrderContext) -> Result<f64, OrderError> {
        let unit_price = ctx
            .services
            .catalog
            .price(&self.product_name)
            .await
            .map_err(OrderError::collaborator("catalog"))?;
        let total_weight = self.total_weight(ctx).await?;
        let shipping_fee = ctx
            .services
            .carrier
            .price(&self.shipping_address, total_weight)
            .await
            .map_err(OrderError::collaborator("carrier"))?;
        Ok(unit_price * f64::from(self.quantity) + shipping_fee)
    }

    async fn total_weight(&self, ctx: &OrderContext) -> Result<f64, OrderError> {
        let unit_weight = ctx
            .services
            .catalog
            .weight(&self.product_name)
            .await
            .map_err(OrderError::collaborator("catalog"))?;
        Ok(unit_weight * f64::from(self.quantity))
    }

    fn ensure(&self, operation: &'static str, allowed: &[OrderStatus]) -> Result<(), OrderError> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                operation,
                status: self.status,
            })
        }
    }

    /// Persists `next` and makes it the current state.
    async fn commit(&mut self, next: Order, ctx: &OrderContext) -> Result<OrderStatus, OrderError> {
        ctx.services
            .store
            .update(&next)
            .await
            .map_err(OrderError::Persistence)?;
        info!(
            order_id = %self.id,
            from = %self.status,
            to = %next.status,
            terminal = next.status.is_terminal(),
            "Transition"
        );
        *self = next;
        Ok(self.status)
    }

    /// Moves to `awaiting` under a fresh attempt token and returns the callback for it.
    async fn begin_gateway_request(
        &mut self,
        request: GatewayRequest,
        awaiting: OrderStatus,
        ctx: &OrderContext,
    ) -> Result<PaymentCallback, OrderError> {
        let mut next = self.clone();
        next.status = awaiting;
        next.attempt = self.attempt.next();
        self.commit(next, ctx).await?;
        Ok(PaymentCallback::new(
            self.id,
            request,
            self.attempt,
            ctx.mailbox.clone(),
        ))
    }

    /// Restores `previous` after the gateway refused a request.
    ///
    /// The attempt token is not rolled back, so an answer to the refused request can never
    /// match a later one.
    async fn roll_back(
        &mut self,
        previous: Order,
        source: ServiceError,
        ctx: &OrderContext,
    ) -> OrderError {
        warn!(order_id = %self.id, error = %source, restore = %previous.status, "Gateway refused request");
        let restored = Order {
            attempt: self.attempt,
            ..previous
        };
        match self.commit(restored, ctx).await {
            Ok(_) => OrderError::Collaborator {
                service: "gateway",
                source,
            },
            Err(e) => {
                error!(order_id = %self.id, status = %self.status, error = %e, "Rollback not persisted");
                e
            }
        }
    }

    async fn pay(&mut self, card: &Card, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.ensure("pay", &[OrderStatus::Placed, OrderStatus::PaymentError])?;
        let amount = self.total_cost(ctx).await?;

        let previous = self.clone();
        let callback = self
            .begin_gateway_request(GatewayRequest::Payment, OrderStatus::PaymentCheck, ctx)
            .await?;
        let sent = dispatch(self.id, ctx.services.gateway.pay(card, amount, callback)).await;
        if let Err(source) = sent {
            return Err(self.roll_back(previous, source, ctx).await);
        }
        debug!(order_id = %self.id, attempt = %self.attempt, amount, "Payment dispatched");
        Ok(OrderActionResult::Transitioned(self.status))
    }

    async fn cancel(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.ensure("cancel", &[OrderStatus::Placed, OrderStatus::PaymentError])?;
        let mut next = self.clone();
        next.status = OrderStatus::Canceled;
        self.commit(next, ctx)
            .await
            .map(OrderActionResult::Transitioned)
    }

    async fn ship(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.ensure("ship", &[OrderStatus::Paid])?;
        let total_weight = self.total_weight(ctx).await?;
        let tracking_code = ctx
            .services
            .carrier
            .ship(&self.shipping_address, total_weight)
            .await
            .map_err(OrderError::collaborator("carrier"))?;

        let mut next = self.clone();
        next.status = OrderStatus::Shipped;
        next.tracking_code = Some(tracking_code);
        self.commit(next, ctx)
            .await
            .map(OrderActionResult::Transitioned)
    }

    async fn refund(&mut self, ctx: &OrderContext) -> Result<OrderActionResult, OrderError> {
        self.ensure("refund", &[OrderStatus::Paid, OrderStatus::RefundError])?;
        let Some(confirm_code) = self.payment_confirm_code.clone() else {
            return Err(OrderError::InvalidTransition {
                operation: "refund",
                status: self.status,
            });
        };

        let previous = self.clone();
        let callback = self
            .begin_gateway_request(GatewayRequest::Refund, OrderStatus::AwaitRefund, ctx)
            .await?;
        let sent = dispatch(self.id, ctx.services.gateway.refund(&confirm_code, callback)).await;
        if let Err(source) = sent {
            return Err(self.roll_back(previous, source, ctx).await);
        }
        debug!(order_id = %self.id, attempt = %self.attempt, "Refund dispatched");
        Ok(OrderActionResult::Transitioned(self.status))
    }

    async fn resolve_gateway(
        &mut self,
        request: GatewayRequest,
        attempt: AttemptToken,
        outcome: GatewayOutcome,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, OrderError> {
        let awaiting = match request {
            GatewayRequest::Payment => OrderStatus::PaymentCheck,
            GatewayRequest::Refund => OrderStatus::AwaitRefund,
        };
        if self.status != awaiting || attempt != self.attempt {
            warn!(
                order_id = %self.id,
                %request,
                %attempt,
                current = %self.attempt,
                status = %self.status,
                "Stale callback ignored"
            );
            return Err(OrderError::StaleCallback {
                request,
                attempt,
                status: self.status,
            });
        }

        let mut next = self.clone();
        match (request, outcome) {
            (GatewayRequest::Payment, GatewayOutcome::Confirmed(code)) => {
                next.status = OrderStatus::Paid;
                next.payment_confirm_code = Some(code);
            }
            (GatewayRequest::Payment, GatewayOutcome::Failed(reason)) => {
                warn!(order_id = %self.id, %reason, "Payment failed");
                next.status = OrderStatus::PaymentError;
            }
            (GatewayRequest::Refund, GatewayOutcome::Confirmed(code)) => {
                next.status = OrderStatus::Refunded;
                next.refund_confirm_code = Some(code);
            }
            (GatewayRequest::Refund, GatewayOutcome::Failed(reason)) => {
                warn!(order_id = %self.id, %reason, "Refund failed");
                next.status = OrderStatus::RefundError;
            }
        }
        self.commit(next, ctx)
            .await
            .map(OrderActionResult::Transitioned)
    }
}
