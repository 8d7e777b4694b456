use crate::clients::OrderClient;
use crate::config::{Config, ConfigError};
use crate::order_actor;
use crate::services::memory::InMemoryServices;
use crate::services::Services;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The runtime orchestrator for the order system.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the order actor
/// - **Dependency Wiring**: injecting the collaborators and the actor's own mailbox
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(&Config::default())?;
///
/// let id = system.order_client.place(params).await?;
/// system.order_client.pay(id, card).await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    /// Client for interacting with the Order actor
    pub order_client: OrderClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl OrderSystem {
    /// Starts the order actor with the in-memory collaborators described by `config`.
    ///
    /// The config is validated first, so a hand-built one is held to the same rules as a
    /// loaded one.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let services = InMemoryServices::from_config(config).services();
        Self::with_services(config.mailbox_capacity, services)
    }

    /// Starts the order actor with an arbitrary collaborator set.
    pub fn with_services(mailbox_capacity: usize, services: Services) -> Result<Self, ConfigError> {
        if mailbox_capacity == 0 {
            return Err(ConfigError::Validation(
                "mailbox_capacity must be greater than zero".into(),
            ));
        }
        let (order_client, handle) = order_actor::spawn(mailbox_capacity, services);
        info!(mailbox_capacity, "Order system started");
        Ok(Self {
            order_client,
            handle,
        })
    }

    /// Gracefully shuts down the system.
    ///
    /// Drops the client, which closes the mailbox, then waits for the actor to finish the
    /// requests already queued. Fails only if the actor task panicked.
    ///
    /// Clones of `order_client` held elsewhere keep the actor running, and this call waits
    /// for them to be dropped as well.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Actor task failed");
            return Err(e);
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
