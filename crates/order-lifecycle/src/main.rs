//! # Order Lifecycle Demo
//!
//! Runs the order system against the in-memory collaborators:
//!
//! 1. An order that is paid and shipped.
//! 2. An order paid with a declined card, then canceled.
//!
//! ```bash
//! cargo run                          # built-in demo config
//! cargo run -- config/demo.toml      # custom catalog / gateway
//! RUST_LOG=debug cargo run           # full payloads
//! ```

use actor_runtime::tracing::setup_tracing;
use order_lifecycle::config::Config;
use order_lifecycle::lifecycle::OrderSystem;
use order_lifecycle::model::{Address, Card, OrderCreate, OrderStatus};
use order_lifecycle::order_actor::OrderError;
use std::time::Duration;
use tracing::{info, warn, Instrument};

const SETTLE_LIMIT: Duration = Duration::from_secs(5);
const DECLINED_CARD: &str = "4000000000000002";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.gateway.declined_cards.push(DECLINED_CARD.to_string());

    setup_tracing(&config.log_filter);
    info!(products = config.catalog.len(), "Starting order system");

    let product = config
        .catalog
        .first()
        .map(|entry| entry.name.clone())
        .ok_or("catalog is empty")?;
    let system = OrderSystem::new(&config)?;
    let orders = &system.order_client;

    let params = OrderCreate {
        customer_name: "John".to_string(),
        product_name: product,
        quantity: 2,
        shipping_address: Address::new(
            "John",
            "99 Chalong Krung 1",
            "Ladkrabang",
            "Ladkrabang",
            "Bangkok",
            "10520",
        ),
    };

    async {
        let id = orders.place(params.clone()).await?;
        let total = orders.total_cost(id).await?;
        info!(%id, total, "Order quoted");

        orders.pay(id, Card::new("4111111111111111", "John", 2, 2030)).await?;
        match orders.wait_settled(id, SETTLE_LIMIT).await? {
            OrderStatus::Paid => {
                orders.ship(id).await?;
                let order = orders.order(id).await?;
                info!(%id, tracking = order.tracking_code(), "Order shipped");
            }
            status => warn!(%id, %status, "Payment did not go through"),
        }
        Ok::<_, OrderError>(())
    }
    .instrument(tracing::info_span!("paid_order"))
    .await?;

    async {
        let id = orders.place(params).await?;
        orders.pay(id, Card::new(DECLINED_CARD, "John", 2, 2030)).await?;
        let status = orders.wait_settled(id, SETTLE_LIMIT).await?;
        info!(%id, %status, "Payment settled");
        if status == OrderStatus::PaymentError {
            orders.cancel(id).await?;
            info!(%id, "Order canceled");
        }
        Ok::<_, OrderError>(())
    }
    .instrument(tracing::info_span!("declined_order"))
    .await?;

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
