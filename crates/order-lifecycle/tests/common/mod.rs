//! Recording collaborator doubles shared by the scenario tests.
#![allow(dead_code)]

use async_trait::async_trait;
use order_lifecycle::clients::OrderClient;
use order_lifecycle::model::{Address, Card, Order, OrderCreate, OrderId, OrderStatus};
use order_lifecycle::order_actor::{self, OrderError, PaymentCallback};
use order_lifecycle::services::{
    OrderStore, PaymentGateway, ProductCatalog, ServiceError, Services, ShippingCarrier,
};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub fn address() -> Address {
    Address::new("name", "line1", "line2", "district", "city", "postcode")
}

pub fn card() -> Card {
    Card::new("123", "JohnCena", 2, 2023)
}

pub fn watch_order() -> OrderCreate {
    OrderCreate {
        customer_name: "John".to_string(),
        product_name: "Appl Watch".to_string(),
        quantity: 2,
        shipping_address: address(),
    }
}

// --- Store ---

/// Hands out ids from a counter and records every successful write.
pub struct RecordingStore {
    next_id: AtomicU64,
    writes: Mutex<Vec<Order>>,
    /// Writes fail once this many have succeeded.
    fail_after: AtomicUsize,
    fail_ids: AtomicBool,
}

impl RecordingStore {
    pub fn starting_at(id: u64) -> Self {
        Self {
            next_id: AtomicU64::new(id),
            writes: Mutex::new(Vec::new()),
            fail_after: AtomicUsize::new(usize::MAX),
            fail_ids: AtomicBool::new(false),
        }
    }

    pub fn updates(&self) -> usize {
        self.writes.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Order> {
        self.writes.lock().unwrap().last().cloned()
    }

    /// Every write from now on fails, until `heal`.
    pub fn fail_updates(&self) {
        self.fail_after.store(self.updates(), Ordering::SeqCst);
    }

    /// Lets `n` more writes through, then fails the rest.
    pub fn fail_updates_after(&self, n: usize) {
        self.fail_after.store(self.updates() + n, Ordering::SeqCst);
    }

    pub fn fail_ids(&self) {
        self.fail_ids.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.fail_after.store(usize::MAX, Ordering::SeqCst);
        self.fail_ids.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn next_order_id(&self) -> Result<OrderId, ServiceError> {
        if self.fail_ids.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("sequence unavailable".into()));
        }
        Ok(OrderId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn update(&self, order: &Order) -> Result<(), ServiceError> {
        let mut writes = self.writes.lock().unwrap();
        if writes.len() >= self.fail_after.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("disk full".into()));
        }
        writes.push(order.clone());
        Ok(())
    }
}

// --- Catalog ---

pub struct ScriptedCatalog {
    products: HashMap<String, (f64, f64)>,
    unavailable: AtomicBool,
}

impl ScriptedCatalog {
    pub fn new() -> Self {
        Self {
            products: HashMap::new(),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn with_product(mut self, name: &str, price: f64, weight: f64) -> Self {
        self.products.insert(name.to_string(), (price, weight));
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lookup(&self, product: &str) -> Result<(f64, f64), ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("catalog offline".into()));
        }
        self.products
            .get(product)
            .copied()
            .ok_or_else(|| ServiceError::UnknownProduct(product.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for ScriptedCatalog {
    async fn price(&self, product: &str) -> Result<f64, ServiceError> {
        self.lookup(product).map(|(price, _)| price)
    }

    async fn weight(&self, product: &str) -> Result<f64, ServiceError> {
        self.lookup(product).map(|(_, weight)| weight)
    }
}

// --- Carrier ---

/// Returns a fixed fee and tracking code, recording the arguments of every call.
pub struct ScriptedCarrier {
    fee: f64,
    tracking_code: String,
    pub price_calls: Mutex<Vec<(Address, f64)>>,
    pub ship_calls: Mutex<Vec<(Address, f64)>>,
    unavailable: AtomicBool,
}

impl ScriptedCarrier {
    pub fn new(fee: f64, tracking_code: &str) -> Self {
        Self {
            fee,
            tracking_code: tracking_code.to_string(),
            price_calls: Mutex::new(Vec::new()),
            ship_calls: Mutex::new(Vec::new()),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("carrier offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ShippingCarrier for ScriptedCarrier {
    async fn price(&self, address: &Address, weight: f64) -> Result<f64, ServiceError> {
        self.check()?;
        self.price_calls.lock().unwrap().push((address.clone(), weight));
        Ok(self.fee)
    }

    async fn ship(&self, address: &Address, weight: f64) -> Result<String, ServiceError> {
        self.check()?;
        self.ship_calls.lock().unwrap().push((address.clone(), weight));
        Ok(self.tracking_code.clone())
    }
}

// --- Gateway ---

pub struct CapturedPayment {
    pub card: Card,
    pub amount: f64,
    pub callback: PaymentCallback,
}

pub struct CapturedRefund {
    pub payment_confirm_code: String,
    pub callback: PaymentCallback,
}

/// Keeps every callback so the test decides when and how each request is answered.
///
/// With `refuse_next` set, the next request is refused but its callback is still kept,
/// like a gateway that fails after registering the request.
///
/// With `answer_next_inline` set, the next request is confirmed from inside `pay`/`refund`
/// itself instead of being captured.
pub struct CapturingGateway {
    payments: Mutex<VecDeque<CapturedPayment>>,
    refunds: Mutex<VecDeque<CapturedRefund>>,
    refuse_next: AtomicBool,
    inline_code: Mutex<Option<String>>,
    inline_answers: Mutex<Vec<Result<OrderStatus, OrderError>>>,
}

impl CapturingGateway {
    pub fn new() -> Self {
        Self {
            payments: Mutex::new(VecDeque::new()),
            refunds: Mutex::new(VecDeque::new()),
            refuse_next: AtomicBool::new(false),
            inline_code: Mutex::new(None),
            inline_answers: Mutex::new(Vec::new()),
        }
    }

    pub fn refuse_next(&self) {
        self.refuse_next.store(true, Ordering::SeqCst);
    }

    pub fn answer_next_inline(&self, code: &str) {
        *self.inline_code.lock().unwrap() = Some(code.to_string());
    }

    /// What each inline `on_success` returned.
    pub fn inline_answers(&self) -> Vec<Result<OrderStatus, OrderError>> {
        self.inline_answers.lock().unwrap().clone()
    }

    /// Confirms the request on the spot if an inline answer is armed, else hands it back.
    async fn answer_inline(&self, callback: PaymentCallback) -> Option<PaymentCallback> {
        let code = self.inline_code.lock().unwrap().take();
        match code {
            Some(code) => {
                let answer = callback.on_success(code).await;
                self.inline_answers.lock().unwrap().push(answer);
                None
            }
            None => Some(callback),
        }
    }

    /// The oldest payment request not yet taken.
    pub fn take_payment(&self) -> CapturedPayment {
        self.payments
            .lock()
            .unwrap()
            .pop_front()
            .expect("no payment request captured")
    }

    pub fn take_refund(&self) -> CapturedRefund {
        self.refunds
            .lock()
            .unwrap()
            .pop_front()
            .expect("no refund request captured")
    }

    pub fn pending_payments(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    pub fn pending_refunds(&self) -> usize {
        self.refunds.lock().unwrap().len()
    }

    fn outcome(&self) -> Result<(), ServiceError> {
        if self.refuse_next.swap(false, Ordering::SeqCst) {
            return Err(ServiceError::Unavailable("gateway timeout".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for CapturingGateway {
    async fn pay(
        &self,
        card: &Card,
        amount: f64,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError> {
        let Some(callback) = self.answer_inline(callback).await else {
            return self.outcome();
        };
        self.payments.lock().unwrap().push_back(CapturedPayment {
            card: card.clone(),
            amount,
            callback,
        });
        self.outcome()
    }

    async fn refund(
        &self,
        payment_confirm_code: &str,
        callback: PaymentCallback,
    ) -> Result<(), ServiceError> {
        let Some(callback) = self.answer_inline(callback).await else {
            return self.outcome();
        };
        self.refunds.lock().unwrap().push_back(CapturedRefund {
            payment_confirm_code: payment_confirm_code.to_string(),
            callback,
        });
        self.outcome()
    }
}

// --- Harness ---

/// A running order actor wired to recording doubles.
///
/// Catalog: "Appl Watch" at 1500.0, 350.0 per unit. Carrier: fee 50.0, tracking code "123".
pub struct Harness {
    pub client: OrderClient,
    pub store: Arc<RecordingStore>,
    pub catalog: Arc<ScriptedCatalog>,
    pub carrier: Arc<ScriptedCarrier>,
    pub gateway: Arc<CapturingGateway>,
    handle: JoinHandle<()>,
}

impl Harness {
    pub fn start() -> Self {
        Self::with_store(RecordingStore::starting_at(1))
    }

    pub fn with_store(store: RecordingStore) -> Self {
        let store = Arc::new(store);
        let catalog = Arc::new(ScriptedCatalog::new().with_product("Appl Watch", 1500.0, 350.0));
        let carrier = Arc::new(ScriptedCarrier::new(50.0, "123"));
        let gateway = Arc::new(CapturingGateway::new());

        let services = Services {
            store: store.clone(),
            catalog: catalog.clone(),
            gateway: gateway.clone(),
            carrier: carrier.clone(),
        };
        let (client, handle) = order_actor::spawn(16, services);

        Self {
            client,
            store,
            catalog,
            carrier,
            gateway,
            handle,
        }
    }

    /// Drops the client and waits for the actor to stop.
    pub async fn shutdown(self) {
        drop(self.client);
        self.handle.await.unwrap();
    }
}
