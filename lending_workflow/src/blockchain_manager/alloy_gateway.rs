use std::time::Duration;

use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, TxHash, U256},
    providers::Provider,
};
use async_trait::async_trait;
use tracing::debug;

use super::{
    gateway::LendingGateway,
    models::{AccountSnapshot, ConfirmationStatus, InterestRateMode, RoundData},
};
use crate::utils::{
    contracts::{
        Erc20Contract, LendingPoolAddressesProviderContract, LendingPoolContract,
        PriceFeedContract, WethContract,
    },
    error::{WorkflowError, WorkflowResult},
};

/// [`LendingGateway`] backed by an alloy provider that signs with the workflow account
pub struct AlloyGateway<P: Provider<Ethereum>> {
    provider: P,
    receipt_poll_interval: Duration,
}

impl<P: Provider<Ethereum>> AlloyGateway<P> {
    pub fn new(provider: P, receipt_poll_interval: Duration) -> Self {
        Self {
            provider,
            receipt_poll_interval,
        }
    }

    /// Polls for the receipt of `tx_hash` until it is reverted or has enough confirmations
    async fn poll_receipt(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
    ) -> WorkflowResult<ConfirmationStatus> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| WorkflowError::contract_call("eth_getTransactionReceipt", e))?;

            if let Some(receipt) = receipt {
                // Receipts returned by the node are always mined
                let block_number = receipt.block_number().unwrap_or_default();

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Reverted { block_number });
                }

                let head = self
                    .provider
                    .get_block_number()
                    .await
                    .map_err(|e| WorkflowError::contract_call("eth_blockNumber", e))?;

                let depth = head.saturating_sub(block_number) + 1;
                if depth >= confirmations {
                    return Ok(ConfirmationStatus::Confirmed { block_number });
                }
                debug!("{} has {}/{} confirmations", tx_hash, depth, confirmations);
            }

            tokio::time::sleep(self.receipt_poll_interval).await;
        }
    }
}

#[async_trait]
impl<P: Provider<Ethereum>> LendingGateway for AlloyGateway<P> {
    async fn get_lending_pool(&self, addresses_provider: Address) -> WorkflowResult<Address> {
        let contract = LendingPoolAddressesProviderContract::new(addresses_provider, &self.provider);
        let lending_pool = contract
            .getLendingPool()
            .call()
            .await
            .map_err(|e| WorkflowError::contract_call("getLendingPool", e))?
            ._0;
        Ok(lending_pool)
    }

    async fn get_user_account_data(
        &self,
        lending_pool: Address,
        user: Address,
    ) -> WorkflowResult<AccountSnapshot> {
        let contract = LendingPoolContract::new(lending_pool, &self.provider);
        let account_data = contract
            .getUserAccountData(user)
            .call()
            .await
            .map_err(|e| WorkflowError::contract_call("getUserAccountData", e))?;

        Ok(AccountSnapshot {
            total_collateral: account_data.totalCollateralETH,
            total_debt: account_data.totalDebtETH,
            available_to_borrow: account_data.availableBorrowsETH,
            liquidation_threshold: account_data.currentLiquidationThreshold,
            loan_to_value: account_data.ltv,
            health_factor: account_data.healthFactor,
        })
    }

    async fn latest_round_data(&self, price_feed: Address) -> WorkflowResult<RoundData> {
        let contract = PriceFeedContract::new(price_feed, &self.provider);
        let round = contract
            .latestRoundData()
            .call()
            .await
            .map_err(|e| WorkflowError::contract_call("latestRoundData", e))?;

        Ok(RoundData {
            round_id: round.roundId.to::<u128>(),
            answer: round.answer,
            started_at: round.startedAt,
            updated_at: round.updatedAt,
            answered_in_round: round.answeredInRound.to::<u128>(),
        })
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> WorkflowResult<TxHash> {
        let contract = Erc20Contract::new(token, &self.provider);
        let pending = contract
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| WorkflowError::transaction("approve", e))?;
        Ok(*pending.tx_hash())
    }

    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> WorkflowResult<TxHash> {
        let contract = LendingPoolContract::new(lending_pool, &self.provider);
        let pending = contract
            .deposit(asset, amount, on_behalf_of, referral_code)
            .send()
            .await
            .map_err(|e| WorkflowError::transaction("deposit", e))?;
        Ok(*pending.tx_hash())
    }

    async fn borrow(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        referral_code: u16,
        on_behalf_of: Address,
    ) -> WorkflowResult<TxHash> {
        let contract = LendingPoolContract::new(lending_pool, &self.provider);
        let pending = contract
            .borrow(
                asset,
                amount,
                rate_mode.as_u256(),
                referral_code,
                on_behalf_of,
            )
            .send()
            .await
            .map_err(|e| WorkflowError::transaction("borrow", e))?;
        Ok(*pending.tx_hash())
    }

    async fn repay(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        on_behalf_of: Address,
    ) -> WorkflowResult<TxHash> {
        let contract = LendingPoolContract::new(lending_pool, &self.provider);
        let pending = contract
            .repay(asset, amount, rate_mode.as_u256(), on_behalf_of)
            .send()
            .await
            .map_err(|e| WorkflowError::transaction("repay", e))?;
        Ok(*pending.tx_hash())
    }

    async fn wrap_native(&self, weth: Address, amount: U256) -> WorkflowResult<TxHash> {
        let contract = WethContract::new(weth, &self.provider);
        let pending = contract
            .deposit()
            .value(amount)
            .send()
            .await
            .map_err(|e| WorkflowError::transaction("wrap_native", e))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        confirmations: u64,
        timeout: Duration,
    ) -> WorkflowResult<ConfirmationStatus> {
        match tokio::time::timeout(timeout, self.poll_receipt(tx_hash, confirmations)).await {
            Ok(status) => status,
            Err(_) => Ok(ConfirmationStatus::TimedOut),
        }
    }
}
