use std::time::Duration;

use anyhow::{Context, Result};

use super::{
    env_helper::{load_env_var, load_env_var_or},
    network_config::NetworksConfig,
};

/// Network used when `NETWORK` is not set, must have an entry in the sample network map
pub const DEFAULT_NETWORK: &str = "mainnet-fork";

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub network: String,
    pub rpc_url: String,
    pub private_key: Option<String>,
    pub networks: NetworksConfig,
    pub required_confirmations: u64,
    pub confirmation_timeout: Duration,
    pub receipt_poll_interval: Duration,
}

impl LocalConfig {
    pub fn load_from_env() -> Result<Self> {
        let networks_path: String = load_env_var_or("NETWORKS_CONFIG", "networks.json".to_string())?;
        let networks = NetworksConfig::load_from_file(&networks_path)
            .context("Failed to load the network map")?;

        Ok(Self {
            network: load_env_var_or("NETWORK", DEFAULT_NETWORK.to_string())?,
            rpc_url: load_env_var_or("RPC_URL", "http://127.0.0.1:8545".to_string())?,
            private_key: load_env_var("PRIVATE_KEY").ok(),
            networks,
            required_confirmations: load_env_var_or("REQUIRED_CONFIRMATIONS", 1)?,
            confirmation_timeout: Duration::from_secs(load_env_var_or(
                "CONFIRMATION_TIMEOUT_SECS",
                120,
            )?),
            receipt_poll_interval: Duration::from_millis(load_env_var_or(
                "RECEIPT_POLL_INTERVAL_MS",
                1000,
            )?),
        })
    }
}
