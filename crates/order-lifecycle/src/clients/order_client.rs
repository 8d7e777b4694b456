//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>` and turns replies and runtime errors into
//! [`OrderStatus`] values and [`OrderError`]s.
use crate::model::{Card, Order, OrderCreate, OrderId, OrderStatus};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use actor_runtime::{ActorClient, FrameworkError, ResourceClient, WeakResourceClient};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
///
/// `pay` and `refund` return as soon as the request is dispatched, with the order in
/// `PaymentCheck` / `AwaitRefund`. Use [`OrderClient::wait_settled`] or poll
/// [`OrderClient::status`] to observe the gateway's answer.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    pub(crate) fn downgrade(&self) -> WeakResourceClient<Order> {
        self.inner.downgrade()
    }

    /// Places a new order and returns the id assigned by the store.
    #[instrument(skip(self))]
    pub async fn place(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn total_cost(&self, id: OrderId) -> Result<f64, OrderError> {
        self.action(id, OrderAction::QuoteTotal).await?.into_total()
    }

    #[instrument(skip(self))]
    pub async fn pay(&self, id: OrderId, card: Card) -> Result<OrderStatus, OrderError> {
        self.action(id, OrderAction::Pay { card }).await?.into_status()
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.action(id, OrderAction::Cancel).await?.into_status()
    }

    #[instrument(skip(self))]
    pub async fn ship(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.action(id, OrderAction::Ship).await?.into_status()
    }

    #[instrument(skip(self))]
    pub async fn refund(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.action(id, OrderAction::Refund).await?.into_status()
    }

    /// A snapshot of the order.
    pub async fn order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id).await?.ok_or(OrderError::NotFound(id))
    }

    pub async fn status(&self, id: OrderId) -> Result<OrderStatus, OrderError> {
        self.order(id).await.map(|order| order.status())
    }

    /// Polls until the order has no gateway request in flight, or `limit` elapses.
    ///
    /// Returns the last status seen either way.
    pub async fn wait_settled(
        &self,
        id: OrderId,
        limit: Duration,
    ) -> Result<OrderStatus, OrderError> {
        let deadline = tokio::time::Instant::now() + limit;
        loop {
            let status = self.status(id).await?;
            if !status.is_awaiting_gateway() || tokio::time::Instant::now() >= deadline {
                return Ok(status);
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    async fn action(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> Result<OrderActionResult, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map_err(|e| OrderError::from_runtime(id, e))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}
