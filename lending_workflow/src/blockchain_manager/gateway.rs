use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::models::{AccountSnapshot, ConfirmationStatus, InterestRateMode, RoundData};
use crate::utils::error::WorkflowResult;

/// Remote calls made by the lending workflow, one method per contract function.
///
/// Read methods return decoded values. Write methods only submit the transaction and
/// return its hash; confirmation is awaited separately through
/// [`LendingGateway::wait_for_confirmation`].
#[async_trait]
pub trait LendingGateway: Send + Sync {
    /// `LendingPoolAddressesProvider.getLendingPool()`
    async fn get_lending_pool(&self, addresses_provider: Address) -> WorkflowResult<Address>;

    /// `LendingPool.getUserAccountData(user)`
    async fn get_user_account_data(
        &self,
        lending_pool: Address,
        user: Address,
    ) -> WorkflowResult<AccountSnapshot>;

    /// `AggregatorV3Interface.latestRoundData()`
    async fn latest_round_data(&self, price_feed: Address) -> WorkflowResult<RoundData>;

    /// `IERC20.approve(spender, amount)`
    async fn approve(&self, token: Address, spender: Address, amount: U256)
        -> WorkflowResult<TxHash>;

    /// `LendingPool.deposit(asset, amount, onBehalfOf, referralCode)`
    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> WorkflowResult<TxHash>;

    /// `LendingPool.borrow(asset, amount, interestRateMode, referralCode, onBehalfOf)`
    async fn borrow(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        referral_code: u16,
        on_behalf_of: Address,
    ) -> WorkflowResult<TxHash>;

    /// `LendingPool.repay(asset, amount, rateMode, onBehalfOf)`
    async fn repay(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        on_behalf_of: Address,
    ) -> WorkflowResult<TxHash>;

    /// `WETH.deposit()` paying `amount` of native asset
    async fn wrap_native(&self, weth: Address, amount: U256) -> WorkflowResult<TxHash>;

    /// Waits until `tx_hash` is mined and buried under `confirmations` blocks, or
    /// until `timeout` elapses
    async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
        timeout: Duration,
    ) -> WorkflowResult<ConfirmationStatus>;
}
