//! Command-line and environment configuration.

use crate::dispatch::DispatchSettings;
use crate::gateway::{GatewayError, HttpBridgeGateway, LogOnlyGateway, MessagingGateway};
use crate::model::PhoneNumber;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Store owner notified when no other number is configured.
pub const DEFAULT_OWNER_PHONE: &str = "201550068161";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Owner phone {0:?} contains no digits")]
    InvalidOwnerPhone(String),

    #[error("At least one owner phone is required")]
    NoOwners,

    #[error("Could not set up messaging gateway: {0}")]
    Gateway(#[from] GatewayError),
}

/// `order-relay` arguments. Every flag can also be set through its
/// environment variable.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "order-relay",
    about = "Relay storefront order webhooks to customers and store owners over WhatsApp",
    version
)]
pub struct RelayConfig {
    /// Address the webhook receiver listens on.
    #[arg(long, env = "RELAY_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Directory holding the customer phone and webhook log snapshots.
    #[arg(long, env = "RELAY_DATA_DIR", default_value = "./data")]
    pub data_dir: PathBuf,

    /// Store owner phone, repeatable or comma separated.
    #[arg(
        long = "owner-phone",
        env = "RELAY_OWNER_PHONES",
        value_delimiter = ',',
        default_value = DEFAULT_OWNER_PHONE
    )]
    pub owner_phones: Vec<String>,

    /// Acknowledge webhooks already in the log without sending again.
    #[arg(long, env = "RELAY_DEDUPE")]
    pub dedupe: bool,

    /// Base URL of the messaging bridge. Without it messages are only logged.
    #[arg(long, env = "RELAY_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Bearer token sent to the messaging bridge.
    #[arg(long, env = "RELAY_GATEWAY_TOKEN", hide_env_values = true)]
    pub gateway_token: Option<String>,

    #[arg(long, env = "RELAY_GATEWAY_TIMEOUT_SECS", default_value_t = 15)]
    pub gateway_timeout_secs: u64,
}

impl RelayConfig {
    /// Owner phones reduced to digits. Blank entries from a trailing comma are
    /// skipped; an entry with text but no digits is an error.
    pub fn owner_phones(&self) -> Result<Vec<PhoneNumber>, ConfigError> {
        let owners = self
            .owner_phones
            .iter()
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                PhoneNumber::normalize(raw).ok_or_else(|| ConfigError::InvalidOwnerPhone(raw.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if owners.is_empty() {
            return Err(ConfigError::NoOwners);
        }
        Ok(owners)
    }

    pub fn dispatch_settings(&self) -> Result<DispatchSettings, ConfigError> {
        Ok(DispatchSettings {
            owners: self.owner_phones()?,
            dedupe: self.dedupe,
        })
    }

    /// The bridge gateway when a URL is set, otherwise the dry-run gateway.
    pub fn build_gateway(&self) -> Result<Arc<dyn MessagingGateway>, ConfigError> {
        match self.gateway_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => {
                let gateway = HttpBridgeGateway::new(
                    url,
                    self.gateway_token.clone(),
                    Duration::from_secs(self.gateway_timeout_secs),
                )?;
                info!(url = gateway.base_url(), "Using messaging bridge");
                Ok(Arc::new(gateway))
            }
            None => {
                warn!("No gateway URL configured, messages will only be logged");
                Ok(Arc::new(LogOnlyGateway::new()))
            }
        }
    }
}
