//! Represents a customer order.
//!
//! # Actor Runtime
//! This struct implements the [`ActorEntity`](actor_runtime::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_runtime::ResourceActor).
//!
//! See [`impl ActorEntity for Order`](Order#impl-ActorEntity-for-Order) for details on:
//! - Creation parameters ([`OrderCreate`])
//! - The state machine driven by [`OrderAction`](crate::order_actor::OrderAction)

use crate::model::Address;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders, assigned by the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Identifies one gateway request dispatched for an order.
///
/// Every `pay` and `refund` dispatch moves the order to the next token. A gateway callback
/// carrying any other token belongs to a superseded request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttemptToken(pub u64);

impl AttemptToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for AttemptToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Placed,
    PaymentCheck,
    Paid,
    PaymentError,
    Shipped,
    Canceled,
    AwaitRefund,
    RefundError,
    Refunded,
}

impl OrderStatus {
    /// No operation is legal from a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Shipped | OrderStatus::Canceled | OrderStatus::Refunded
        )
    }

    /// The order has a gateway request in flight.
    pub fn is_awaiting_gateway(self) -> bool {
        matches!(self, OrderStatus::PaymentCheck | OrderStatus::AwaitRefund)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::PaymentCheck => "PAYMENT_CHECK",
            OrderStatus::Paid => "PAID",
            OrderStatus::PaymentError => "PAYMENT_ERROR",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::AwaitRefund => "AWAIT_REFUND",
            OrderStatus::RefundError => "REFUND_ERROR",
            OrderStatus::Refunded => "REFUNDED",
        };
        f.write_str(name)
    }
}

/// An order and everything recorded about it along its lifecycle.
///
/// Fields are only written by the order actor; callers get snapshots and read them
/// through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub(crate) id: OrderId,
    pub(crate) customer_name: String,
    pub(crate) product_name: String,
    pub(crate) quantity: u32,
    pub(crate) shipping_address: Address,
    pub(crate) status: OrderStatus,
    pub(crate) payment_confirm_code: Option<String>,
    pub(crate) tracking_code: Option<String>,
    pub(crate) refund_confirm_code: Option<String>,
    pub(crate) attempt: AttemptToken,
}

/// Payload for placing a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreate {
    pub customer_name: String,
    pub product_name: String,
    pub quantity: u32,
    pub shipping_address: Address,
}

impl Order {
    /// Creates a freshly placed order.
    pub(crate) fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            customer_name: params.customer_name,
            product_name: params.product_name,
            quantity: params.quantity,
            shipping_address: params.shipping_address,
            status: OrderStatus::Placed,
            payment_confirm_code: None,
            tracking_code: None,
            refund_confirm_code: None,
            attempt: AttemptToken::default(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn shipping_address(&self) -> &Address {
        &self.shipping_address
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Set once the gateway confirms the payment.
    pub fn payment_confirm_code(&self) -> Option<&str> {
        self.payment_confirm_code.as_deref()
    }

    /// Set once the carrier accepts the shipment.
    pub fn tracking_code(&self) -> Option<&str> {
        self.tracking_code.as_deref()
    }

    /// Set once the gateway confirms the refund.
    pub fn refund_confirm_code(&self) -> Option<&str> {
        self.refund_confirm_code.as_deref()
    }

    /// Token of the most recently dispatched gateway request.
    pub fn attempt(&self) -> AttemptToken {
        self.attempt
    }
}
