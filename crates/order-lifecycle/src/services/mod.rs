//! # External Collaborators
//!
//! The order actor never talks to a database, a payment provider or a carrier directly. It
//! sees four capability traits, handed to it inside [`Services`]:
//!
//! | Trait | Used for |
//! |-------|----------|
//! | [`OrderStore`] | order ids and persisting every state change |
//! | [`ProductCatalog`] | unit price and unit weight of a product |
//! | [`PaymentGateway`] | payments and refunds, answered later through a [`PaymentCallback`] |
//! | [`ShippingCarrier`] | shipping fees and shipment creation |
//!
//! The [`memory`] module provides in-process implementations for the demo binary and the
//! tests.
//!
//! ## Gateway contract
//!
//! `pay` and `refund` only *dispatch* a request. The gateway keeps the callback and resolves
//! it exactly once, usually later and from another task. A gateway may also answer before
//! `pay`/`refund` returns; that answer is applied as soon as the dispatch completes, and a
//! refusal returned afterwards makes it stale.

pub mod memory;

use crate::model::{Address, Card, Order, OrderId};
use crate::order_actor::PaymentCallback;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Failures reported by collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Persistent storage for orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Returns an id no other order has been given.
    async fn next_order_id(&self) -> Result<OrderId, ServiceError>;

    /// Stores the full state of `order`, replacing any previous version.
    async fn update(&self, order: &Order) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn price(&self, product: &str) -> Result<f64, ServiceError>;

    /// Weight of a single unit.
    async fn weight(&self, product: &str) -> Result<f64, ServiceError>;
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn pay(
        &self,
        card: &Card,
        amount: f64,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError>;

    async fn refund(
        &self,
        payment_confirm_code: &str,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ShippingCarrier: Send + Sync {
    /// Fee for shipping `weight` to `address`.
    async fn price(&self, address: &Address, weight: f64) -> Result<f64, ServiceError>;

    /// Books the shipment and returns its tracking code.
    async fn ship(&self, address: &Address, weight: f64) -> Result<String, ServiceError>;
}

/// The collaborator set injected into the order actor.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn OrderStore>,
    pub catalog: Arc<dyn ProductCatalog>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub carrier: Arc<dyn ShippingCarrier>,
}
