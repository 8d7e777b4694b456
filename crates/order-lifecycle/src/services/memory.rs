//! In-process collaborators used by the demo binary and the integration tests.

use super::{
    OrderStore, PaymentGateway, ProductCatalog, ServiceError, Services, ShippingCarrier,
};
use crate::config::{CarrierConfig, CatalogEntry, Config, GatewayConfig};
use crate::model::{Address, Card, Order, OrderId};
use crate::order_actor::PaymentCallback;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Keeps the latest snapshot of every order in memory.
pub struct InMemoryOrderStore {
    next_id: AtomicU64,
    orders: Mutex<HashMap<OrderId, Order>>,
    writes: AtomicUsize,
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryOrderStore {
    /// Ids start at 1.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            orders: Mutex::new(HashMap::new()),
            writes: AtomicUsize::new(0),
        }
    }

    /// The last persisted state of an order.
    pub fn snapshot(&self, id: OrderId) -> Option<Order> {
        self.orders.lock().ok()?.get(&id).cloned()
    }

    /// Number of successful `update` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn next_order_id(&self) -> Result<OrderId, ServiceError> {
        Ok(OrderId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn update(&self, order: &Order) -> Result<(), ServiceError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| ServiceError::Storage("order table lock poisoned".into()))?;
        orders.insert(order.id(), order.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A fixed price list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: HashMap<String, CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            products: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    fn entry(&self, product: &str) -> Result<&CatalogEntry, ServiceError> {
        self.products
            .get(product)
            .ok_or_else(|| ServiceError::UnknownProduct(product.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn price(&self, product: &str) -> Result<f64, ServiceError> {
        self.entry(product).map(|entry| entry.price)
    }

    async fn weight(&self, product: &str) -> Result<f64, ServiceError> {
        self.entry(product).map(|entry| entry.weight)
    }
}

/// Charges `base_fee + per_gram * weight` regardless of destination.
pub struct FlatRateCarrier {
    base_fee: f64,
    per_gram: f64,
    next_tracking: AtomicU64,
}

impl FlatRateCarrier {
    pub fn new(config: &CarrierConfig) -> Self {
        Self {
            base_fee: config.base_fee,
            per_gram: config.per_gram,
            next_tracking: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl ShippingCarrier for FlatRateCarrier {
    async fn price(&self, _address: &Address, weight: f64) -> Result<f64, ServiceError> {
        Ok(self.base_fee + self.per_gram * weight)
    }

    async fn ship(&self, address: &Address, weight: f64) -> Result<String, ServiceError> {
        let n = self.next_tracking.fetch_add(1, Ordering::SeqCst);
        let tracking = format!("TRK-{:06}", n);
        debug!(%tracking, city = %address.city, weight, "Shipment booked");
        Ok(tracking)
    }
}

/// Answers every request on a separate task after a fixed delay.
///
/// Payments with a card listed in `declined_cards` fail; everything else is confirmed.
pub struct SimulatedGateway {
    latency: Duration,
    declined: HashSet<String>,
    next_code: Arc<AtomicU64>,
}

impl SimulatedGateway {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            declined: config.declined_cards.iter().cloned().collect(),
            next_code: Arc::new(AtomicU64::new(1)),
        }
    }

    fn resolve_later(&self, callback: PaymentCallback, outcome: Result<String, String>) {
        let latency = self.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            let order_id = callback.order_id();
            let result = match outcome {
                Ok(code) => callback.on_success(code).await,
                Err(reason) => callback.on_error(reason).await,
            };
            if let Err(e) = result {
                warn!(%order_id, error = %e, "Gateway answer was not applied");
            }
        });
    }

    fn code(&self, prefix: &str) -> String {
        format!("{}-{:06}", prefix, self.next_code.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn pay(
        &self,
        card: &Card,
        amount: f64,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ServiceError::Rejected(format!("invalid amount {}", amount)));
        }
        let outcome = if self.declined.contains(&card.number) {
            Err(format!("card {} declined", card.masked_number()))
        } else {
            Ok(self.code("PAY"))
        };
        debug!(order_id = %callback.order_id(), amount, "Payment accepted for processing");
        self.resolve_later(callback, outcome);
        Ok(())
    }

    async fn refund(
        &self,
        payment_confirm_code: &str,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError> {
        debug!(order_id = %callback.order_id(), payment_confirm_code, "Refund accepted for processing");
        let outcome = Ok(self.code("RFD"));
        self.resolve_later(callback, outcome);
        Ok(())
    }
}

/// The in-memory collaborator set, with typed handles kept for inspection.
#[derive(Clone)]
pub struct InMemoryServices {
    pub store: Arc<InMemoryOrderStore>,
    pub catalog: Arc<StaticCatalog>,
    pub gateway: Arc<SimulatedGateway>,
    pub carrier: Arc<FlatRateCarrier>,
}

impl InMemoryServices {
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: Arc::new(InMemoryOrderStore::new()),
            catalog: Arc::new(StaticCatalog::new(config.catalog.iter().cloned())),
            gateway: Arc::new(SimulatedGateway::new(&config.gateway)),
            carrier: Arc::new(FlatRateCarrier::new(&config.carrier)),
        }
    }

    pub fn services(&self) -> Services {
        Services {
            store: self.store.clone(),
            catalog: self.catalog.clone(),
            gateway: self.gateway.clone(),
            carrier: self.carrier.clone(),
        }
    }
}
