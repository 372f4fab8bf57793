use crate::clients::{CustomerClient, WebhookLogClient};
use crate::config::RelayConfig;
use crate::dispatch::{DispatchSettings, Dispatcher};
use crate::error::RelayError;
use crate::gateway::MessagingGateway;
use crate::{customer_actor, webhook_log_actor};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// The running relay: both store actors and the dispatcher wired to them.
///
/// # Example
///
/// ```ignore
/// let system = RelaySystem::start(&config).await?;
/// let app = order_relay::http::router(system.dispatcher());
/// // ... serve `app` until shutdown ...
/// system.shutdown().await?;
/// ```
pub struct RelaySystem {
    /// Client for the customer phone store
    pub customer_client: CustomerClient,

    /// Client for the webhook log
    pub webhook_log_client: WebhookLogClient,

    dispatcher: Dispatcher,

    /// Task handles for the store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RelaySystem {
    /// Loads both snapshots from the configured data directory, spawns the
    /// store actors and builds the configured gateway.
    pub async fn start(config: &RelayConfig) -> Result<Self, RelayError> {
        let settings = config.dispatch_settings()?;
        let gateway = config.build_gateway()?;
        Self::start_with_gateway(&config.data_dir, gateway, settings).await
    }

    /// Like [`start`](Self::start) with an explicit gateway and settings.
    pub async fn start_with_gateway(
        data_dir: &Path,
        gateway: Arc<dyn MessagingGateway>,
        settings: DispatchSettings,
    ) -> Result<Self, RelayError> {
        info!(data_dir = %data_dir.display(), owners = settings.owners.len(), dedupe = settings.dedupe, "Starting relay");

        // 1. Create actors, loading their snapshots
        let (customer_actor, customer_client) = customer_actor::open(data_dir).await?;
        let (webhook_log_actor, webhook_log_client) = webhook_log_actor::open(data_dir).await?;

        // 2. Start actors
        let customer_handle = tokio::spawn(customer_actor.run());
        let webhook_log_handle = tokio::spawn(webhook_log_actor.run());

        // 3. Wire the dispatcher to clones of both clients
        let dispatcher = Dispatcher::new(
            customer_client.clone(),
            webhook_log_client.clone(),
            gateway,
            settings,
        );

        Ok(Self {
            customer_client,
            webhook_log_client,
            dispatcher,
            handles: vec![customer_handle, webhook_log_handle],
        })
    }

    /// A handle for the webhook receiver. Cheap to clone.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Gracefully shuts down the store actors.
    ///
    /// The actors stop once every client clone is gone, so every
    /// [`Dispatcher`] handed out (including the one inside a router) must be
    /// dropped before this returns.
    pub async fn shutdown(self) -> Result<(), RelayError> {
        info!("Shutting down relay...");

        drop(self.dispatcher);
        drop(self.customer_client);
        drop(self.webhook_log_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(RelayError::ActorTask(e.to_string()));
            }
        }

        info!("Relay shutdown complete.");
        Ok(())
    }
}
