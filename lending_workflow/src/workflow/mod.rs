pub mod models;

#[cfg(test)]
mod mock_gateway;

use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use tracing::{info, instrument};

use crate::{
    blockchain_manager::{
        models::{AccountSnapshot, ConfirmationStatus, InterestRateMode},
        LendingGateway,
    },
    config::{LocalConfig, NetworkConfig},
    utils::{
        constants::{
            BORROW_SAFETY_FACTOR, DEPOSIT_AMOUNT, FORKED_NETWORKS, PRICE_FEED_DECIMALS,
            REFERRAL_CODE, TOKEN_DECIMALS,
        },
        error::{WorkflowError, WorkflowResult},
        math_helper::{divide_by_precision_f64, multiply_by_precision},
    },
};

use models::{BorrowableData, WorkflowReport};

/// Options of a run that do not come from the network map
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub required_confirmations: u64,
    pub confirmation_timeout: Duration,
    /// Wrap native asset into the collateral token before depositing
    pub fund_with_wrapped_native: bool,
}

impl WorkflowSettings {
    pub fn from_local_config(local_config: &LocalConfig) -> Self {
        Self {
            required_confirmations: local_config.required_confirmations,
            confirmation_timeout: local_config.confirmation_timeout,
            fund_with_wrapped_native: FORKED_NETWORKS.contains(&local_config.network.as_str()),
        }
    }
}

/// Computes how much of the borrow asset to borrow
///
/// `available_to_borrow` is in native asset units and `price` is the borrow asset
/// price in native asset units.
///
/// # Errors
///
/// Returns an error if the price is not strictly positive
pub fn calculate_borrow_amount(available_to_borrow: f64, price: f64) -> WorkflowResult<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(WorkflowError::contract_call(
            "latestRoundData",
            format!("unusable price {}", price),
        ));
    }
    Ok((1.0 / price) * (available_to_borrow * BORROW_SAFETY_FACTOR))
}

/// Deposits collateral, borrows against it and repays, one confirmed step at a time.
///
/// Any failure aborts the run. Steps that already went through are not rolled back.
pub struct LendingWorkflow<'a, G: LendingGateway> {
    gateway: &'a G,
    network_config: &'a NetworkConfig,
    account: Address,
    settings: WorkflowSettings,
}

impl<'a, G: LendingGateway> LendingWorkflow<'a, G> {
    pub fn new(
        gateway: &'a G,
        network_config: &'a NetworkConfig,
        account: Address,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            gateway,
            network_config,
            account,
            settings,
        }
    }

    #[instrument("LENDING_WORKFLOW", skip_all, fields(account = %self.account))]
    pub async fn run(&self) -> WorkflowResult<WorkflowReport> {
        let erc20_address = self.network_config.weth_token;
        let amount = multiply_by_precision(DEPOSIT_AMOUNT, TOKEN_DECIMALS)?;

        if self.settings.fund_with_wrapped_native {
            self.get_weth(amount).await?;
        }

        let lending_pool = self.get_lending_pool().await?;

        self.approve_erc20(amount, lending_pool, erc20_address)
            .await?;

        info!("Depositing...");
        let tx_hash = self
            .gateway
            .deposit(
                lending_pool,
                erc20_address,
                amount,
                self.account,
                REFERRAL_CODE,
            )
            .await?;
        self.confirm("deposit", tx_hash).await?;
        info!("Deposited!");

        let borrowable_data = self.get_borrowable_data(lending_pool).await?;
        info!("Let's borrow it all");

        let price = self.get_asset_price().await?;
        let amount_to_borrow = calculate_borrow_amount(borrowable_data.available_to_borrow, price)?;
        info!("We are going to borrow {} DAI", amount_to_borrow);

        let borrowed = multiply_by_precision(amount_to_borrow, TOKEN_DECIMALS)?;
        self.borrow_erc20(lending_pool, borrowed).await?;

        // Interest accrued since the borrow is reported but not repaid
        let debt_before_repay = self.get_borrowable_data(lending_pool).await?.total_debt;
        info!("Outstanding debt is {} worth of ETH", debt_before_repay);

        self.repay_all(lending_pool, borrowed).await?;

        let final_snapshot = self.get_account_snapshot(lending_pool).await?;
        Self::log_snapshot(&final_snapshot);

        Ok(WorkflowReport {
            lending_pool,
            deposited: amount,
            price,
            borrowed,
            debt_before_repay,
            repaid: borrowed,
            final_snapshot,
        })
    }

    /// Wraps `amount` of native asset so the account holds collateral tokens
    #[instrument("GET_WETH", skip(self))]
    async fn get_weth(&self, amount: U256) -> WorkflowResult<()> {
        info!("Wrapping native asset...");
        let tx_hash = self
            .gateway
            .wrap_native(self.network_config.weth_token, amount)
            .await?;
        self.confirm("wrap_native", tx_hash).await?;
        info!("Received WETH");
        Ok(())
    }

    /// Resolves the current lending pool through the addresses provider
    async fn get_lending_pool(&self) -> WorkflowResult<Address> {
        let lending_pool = self
            .gateway
            .get_lending_pool(self.network_config.lending_pool_addresses_provider)
            .await?;
        info!("Lending pool resolved at {}", lending_pool);
        Ok(lending_pool)
    }

    #[instrument("APPROVE_ERC20", skip(self))]
    async fn approve_erc20(
        &self,
        amount: U256,
        spender: Address,
        erc20_address: Address,
    ) -> WorkflowResult<()> {
        info!("Approving ERC20...");
        let tx_hash = self
            .gateway
            .approve(erc20_address, spender, amount)
            .await?;
        self.confirm("approve", tx_hash).await?;
        info!("Approved!");
        Ok(())
    }

    async fn get_account_snapshot(&self, lending_pool: Address) -> WorkflowResult<AccountSnapshot> {
        self.gateway
            .get_user_account_data(lending_pool, self.account)
            .await
    }

    async fn get_borrowable_data(&self, lending_pool: Address) -> WorkflowResult<BorrowableData> {
        let snapshot = self.get_account_snapshot(lending_pool).await?;
        Self::log_snapshot(&snapshot);
        Ok(BorrowableData::from(&snapshot))
    }

    /// Reads the borrow asset price from the price feed, in native asset units
    async fn get_asset_price(&self) -> WorkflowResult<f64> {
        let round = self
            .gateway
            .latest_round_data(self.network_config.dai_eth_price_feed)
            .await?;

        if round.answer.is_negative() {
            return Err(WorkflowError::contract_call(
                "latestRoundData",
                format!("negative price {}", round.answer),
            ));
        }

        let price = divide_by_precision_f64(round.answer.into_raw(), PRICE_FEED_DECIMALS);
        info!("The DAI/ETH price is {}", price);
        Ok(price)
    }

    #[instrument("BORROW_ERC20", skip(self))]
    async fn borrow_erc20(&self, lending_pool: Address, amount: U256) -> WorkflowResult<()> {
        let tx_hash = self
            .gateway
            .borrow(
                lending_pool,
                self.network_config.aave_dai_token,
                amount,
                InterestRateMode::Stable,
                REFERRAL_CODE,
                self.account,
            )
            .await?;
        self.confirm("borrow", tx_hash).await?;
        info!(
            "Congratulations! We have just borrowed {}",
            divide_by_precision_f64(amount, TOKEN_DECIMALS)
        );
        Ok(())
    }

    /// Approves the pool to pull `amount` of the borrow asset, then repays it
    #[instrument("REPAY_ALL", skip(self))]
    async fn repay_all(&self, lending_pool: Address, amount: U256) -> WorkflowResult<()> {
        let dai_token = self.network_config.aave_dai_token;

        self.approve_erc20(amount, lending_pool, dai_token).await?;

        let tx_hash = self
            .gateway
            .repay(
                lending_pool,
                dai_token,
                amount,
                InterestRateMode::Stable,
                self.account,
            )
            .await?;
        self.confirm("repay", tx_hash).await?;
        info!("Repaid!");
        Ok(())
    }

    /// Waits for `tx_hash` and turns anything but a confirmation into an error
    async fn confirm(&self, step: &str, tx_hash: TxHash) -> WorkflowResult<()> {
        let status = self
            .gateway
            .wait_for_confirmation(
                tx_hash,
                self.settings.required_confirmations,
                self.settings.confirmation_timeout,
            )
            .await
            .map_err(|e| WorkflowError::transaction(step, e))?;

        match status {
            ConfirmationStatus::Confirmed { block_number } => {
                info!("{} {} confirmed in block {}", step, tx_hash, block_number);
                Ok(())
            }
            ConfirmationStatus::Reverted { block_number } => Err(WorkflowError::transaction(
                step,
                format!("{} reverted in block {}", tx_hash, block_number),
            )),
            ConfirmationStatus::TimedOut => Err(WorkflowError::transaction(
                step,
                format!(
                    "{} not confirmed within {:?}",
                    tx_hash, self.settings.confirmation_timeout
                ),
            )),
        }
    }

    fn log_snapshot(snapshot: &AccountSnapshot) {
        info!(
            "You have {} worth of ETH deposited.",
            snapshot.total_collateral_eth()
        );
        info!("You have {} worth of ETH borrowed.", snapshot.total_debt_eth());
        info!(
            "You can borrow {} worth of ETH.",
            snapshot.available_to_borrow_eth()
        );
        info!(
            "Health factor {}, LTV {}, liquidation threshold {}",
            snapshot.health_factor_value(),
            snapshot.loan_to_value_ratio(),
            snapshot.liquidation_threshold_ratio()
        );
    }
}
