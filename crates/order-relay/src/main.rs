use clap::Parser;
use order_relay::config::RelayConfig;
use order_relay::error::RelayError;
use order_relay::http;
use order_relay::lifecycle::{setup_tracing, RelaySystem};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), RelayError> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = RelayConfig::parse();
    let system = RelaySystem::start(&config).await.inspect_err(|e| {
        error!(error = %e, "Startup failed");
    })?;

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "Webhook receiver listening");

    let served = axum::serve(listener, http::router(system.dispatcher()))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = &served {
        error!(error = %e, "Server stopped with error");
    }

    // The router is gone once serve returns, so the actors can drain
    system.shutdown().await?;
    served?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => error!(error = %e, "Could not listen for Ctrl-C, shutting down"),
    }
}
