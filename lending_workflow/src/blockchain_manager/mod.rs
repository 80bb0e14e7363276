pub mod alloy_gateway;
pub mod gateway;
pub mod models;

use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder},
    rpc::client::RpcClient,
    transports::{http::reqwest::Url, layers::RetryBackoffLayer},
};
use anyhow::{Context, Result};

use crate::{account::Account, config::LocalConfig};

pub use alloy_gateway::AlloyGateway;
pub use gateway::LendingGateway;

/// BlockchainManager builds the connection used by the workflow.
pub struct BlockchainManager;

impl BlockchainManager {
    /// Creates an HTTP provider that signs transactions with `account`.
    ///
    /// Rate-limited requests are retried by the transport; failed calls are not.
    ///
    /// # Arguments
    /// * `local_config` - Local configuration containing the RPC URL
    /// * `account` - Account whose key signs every write call
    pub fn get_provider(
        local_config: &LocalConfig,
        account: &Account,
    ) -> Result<impl Provider<Ethereum>> {
        let retry_layer = RetryBackoffLayer::new(10, 1000, 10000);

        let client = RpcClient::builder().layer(retry_layer).http(
            Url::parse(&local_config.rpc_url)
                .with_context(|| format!("{} is not a valid RPC URL", local_config.rpc_url))?,
        );

        let provider = ProviderBuilder::new()
            .wallet(account.wallet())
            .on_client(client);

        Ok(provider)
    }

    /// Creates the gateway the workflow talks to
    pub fn get_gateway(
        local_config: &LocalConfig,
        account: &Account,
    ) -> Result<AlloyGateway<impl Provider<Ethereum>>> {
        let provider = Self::get_provider(local_config, account)?;
        Ok(AlloyGateway::new(
            provider,
            local_config.receipt_poll_interval,
        ))
    }
}
