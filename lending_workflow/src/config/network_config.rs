use std::{collections::HashMap, path::Path};

use alloy::primitives::Address;
use serde::Deserialize;

use crate::utils::error::{WorkflowError, WorkflowResult};

/// Contract addresses of one network
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkConfig {
    /// Wrapped native asset, used as collateral
    pub weth_token: Address,
    /// Registry resolving the current lending pool
    pub lending_pool_addresses_provider: Address,
    /// Price of DAI denominated in ETH
    pub dai_eth_price_feed: Address,
    /// Borrowed asset
    pub aave_dai_token: Address,
}

/// Network name to contract addresses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NetworksConfig {
    networks: HashMap<String, NetworkConfig>,
}

impl NetworksConfig {
    pub fn from_json(json: &str) -> WorkflowResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| WorkflowError::Configuration(format!("invalid network map: {}", e)))
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> WorkflowResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            WorkflowError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn contains(&self, network: &str) -> bool {
        self.networks.contains_key(network)
    }

    /// Returns the addresses of `network`
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the network has no entry
    pub fn get(&self, network: &str) -> WorkflowResult<&NetworkConfig> {
        self.networks.get(network).ok_or_else(|| {
            WorkflowError::Configuration(format!("network `{}` is not configured", network))
        })
    }
}
