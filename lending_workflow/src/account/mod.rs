use alloy::{network::EthereumWallet, primitives::Address, signers::local::PrivateKeySigner};
use tracing::info;

use crate::{
    config::{LocalConfig, NetworksConfig},
    utils::{
        constants::{LOCAL_NETWORKS, LOCAL_TEST_ACCOUNT_KEY},
        error::{WorkflowError, WorkflowResult},
    },
};

/// Where the signing key of an account comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSource {
    /// Pre-funded account of a local or forked node
    LocalTestAccount,
    /// Key configured for a remote network
    ConfiguredKey,
}

/// An address together with the key able to sign for it
#[derive(Debug, Clone)]
pub struct Account {
    signer: PrivateKeySigner,
    source: AccountSource,
}

impl Account {
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn source(&self) -> AccountSource {
        self.source
    }

    pub fn wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}

/// Resolves the account of the active network from the local configuration
pub fn get_account(local_config: &LocalConfig) -> WorkflowResult<Account> {
    resolve_account(
        &local_config.network,
        &local_config.networks,
        local_config.private_key.as_deref(),
    )
}

/// Resolves the signing account for `network`
///
/// Local networks use the node's first pre-funded account. Networks present in the
/// network map sign with `private_key`.
///
/// # Errors
///
/// Returns a configuration error when the network is unknown, or when it needs a
/// private key and none (or an invalid one) was given
pub fn resolve_account(
    network: &str,
    networks: &NetworksConfig,
    private_key: Option<&str>,
) -> WorkflowResult<Account> {
    if LOCAL_NETWORKS.contains(&network) {
        let signer = parse_signer(LOCAL_TEST_ACCOUNT_KEY)?;
        info!("Using local test account {} on {}", signer.address(), network);
        return Ok(Account {
            signer,
            source: AccountSource::LocalTestAccount,
        });
    }

    if !networks.contains(network) {
        return Err(WorkflowError::Configuration(format!(
            "no account can be resolved for network `{}`",
            network
        )));
    }

    let private_key = private_key.ok_or_else(|| {
        WorkflowError::Configuration(format!("PRIVATE_KEY is required on network `{}`", network))
    })?;
    let signer = parse_signer(private_key)?;
    info!("Using configured account {} on {}", signer.address(), network);

    Ok(Account {
        signer,
        source: AccountSource::ConfiguredKey,
    })
}

fn parse_signer(private_key: &str) -> WorkflowResult<PrivateKeySigner> {
    private_key
        .trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| WorkflowError::Configuration(format!("invalid private key: {}", e)))
}
