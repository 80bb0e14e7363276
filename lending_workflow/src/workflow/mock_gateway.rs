use std::{
    collections::{HashMap, VecDeque},
    sync::Mutex,
    time::Duration,
};

use alloy::primitives::{Address, TxHash, I256, U256};
use async_trait::async_trait;

use crate::{
    blockchain_manager::{
        models::{AccountSnapshot, ConfirmationStatus, InterestRateMode, RoundData},
        LendingGateway,
    },
    utils::error::{WorkflowError, WorkflowResult},
};

/// A remote call received by [`MockGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    GetLendingPool {
        addresses_provider: Address,
    },
    GetUserAccountData {
        lending_pool: Address,
        user: Address,
    },
    LatestRoundData {
        price_feed: Address,
    },
    Approve {
        token: Address,
        spender: Address,
        amount: U256,
    },
    Deposit {
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    },
    Borrow {
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        referral_code: u16,
        on_behalf_of: Address,
    },
    Repay {
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        on_behalf_of: Address,
    },
    WrapNative {
        weth: Address,
        amount: U256,
    },
    WaitForConfirmation {
        step: &'static str,
    },
}

impl GatewayCall {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            GatewayCall::Approve { .. }
                | GatewayCall::Deposit { .. }
                | GatewayCall::Borrow { .. }
                | GatewayCall::Repay { .. }
                | GatewayCall::WrapNative { .. }
        )
    }
}

/// Scripted [`LendingGateway`] recording every call it receives
pub struct MockGateway {
    pub lending_pool: Address,
    pub price: I256,
    /// Returned in order by `get_user_account_data`, the last one is repeated
    snapshots: Mutex<VecDeque<AccountSnapshot>>,
    /// Step whose transaction reverts, with how many of its earlier transactions succeed
    revert: Option<(&'static str, usize)>,
    time_out: Option<&'static str>,
    /// Read call that fails, named after the contract function
    failing_read: Option<&'static str>,
    calls: Mutex<Vec<GatewayCall>>,
    submitted: Mutex<HashMap<TxHash, &'static str>>,
}

impl MockGateway {
    pub fn new(lending_pool: Address, price: I256, snapshots: Vec<AccountSnapshot>) -> Self {
        Self {
            lending_pool,
            price,
            snapshots: Mutex::new(snapshots.into()),
            revert: None,
            time_out: None,
            failing_read: None,
            calls: Mutex::new(vec![]),
            submitted: Mutex::new(HashMap::new()),
        }
    }

    /// Makes the first transaction of `step` revert
    pub fn reverting(self, step: &'static str) -> Self {
        self.reverting_nth(step, 0)
    }

    /// Makes the transaction of `step` revert after `successes` successful ones
    pub fn reverting_nth(mut self, step: &'static str, successes: usize) -> Self {
        self.revert = Some((step, successes));
        self
    }

    pub fn timing_out(mut self, step: &'static str) -> Self {
        self.time_out = Some(step);
        self
    }

    pub fn failing_read(mut self, call: &'static str) -> Self {
        self.failing_read = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn write_calls(&self) -> Vec<GatewayCall> {
        self.calls().into_iter().filter(|c| c.is_write()).collect()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn read(&self, call: &'static str) -> WorkflowResult<()> {
        if self.failing_read == Some(call) {
            return Err(WorkflowError::contract_call(call, "execution reverted"));
        }
        Ok(())
    }

    fn submit(&self, step: &'static str, call: GatewayCall) -> WorkflowResult<TxHash> {
        self.record(call);
        let mut submitted = self.submitted.lock().unwrap();
        let tx_hash = TxHash::with_last_byte(submitted.len() as u8 + 1);
        submitted.insert(tx_hash, step);
        Ok(tx_hash)
    }

    fn confirmations_of(&self, step: &'static str) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::WaitForConfirmation { step: s } if *s == step))
            .count()
    }
}

#[async_trait]
impl LendingGateway for MockGateway {
    async fn get_lending_pool(&self, addresses_provider: Address) -> WorkflowResult<Address> {
        self.record(GatewayCall::GetLendingPool { addresses_provider });
        self.read("getLendingPool")?;
        Ok(self.lending_pool)
    }

    async fn get_user_account_data(
        &self,
        lending_pool: Address,
        user: Address,
    ) -> WorkflowResult<AccountSnapshot> {
        self.record(GatewayCall::GetUserAccountData { lending_pool, user });
        self.read("getUserAccountData")?;
        let mut snapshots = self.snapshots.lock().unwrap();
        let snapshot = if snapshots.len() > 1 {
            snapshots.pop_front()
        } else {
            snapshots.front().copied()
        };
        snapshot.ok_or_else(|| WorkflowError::contract_call("getUserAccountData", "no snapshot"))
    }

    async fn latest_round_data(&self, price_feed: Address) -> WorkflowResult<RoundData> {
        self.record(GatewayCall::LatestRoundData { price_feed });
        self.read("latestRoundData")?;
        Ok(RoundData {
            round_id: 1,
            answer: self.price,
            started_at: U256::from(1_700_000_000u64),
            updated_at: U256::from(1_700_000_000u64),
            answered_in_round: 1,
        })
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> WorkflowResult<TxHash> {
        self.submit(
            "approve",
            GatewayCall::Approve {
                token,
                spender,
                amount,
            },
        )
    }

    async fn deposit(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> WorkflowResult<TxHash> {
        self.submit(
            "deposit",
            GatewayCall::Deposit {
                lending_pool,
                asset,
                amount,
                on_behalf_of,
                referral_code,
            },
        )
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
        self.submit(
            "borrow",
            GatewayCall::Borrow {
                lending_pool,
                asset,
                amount,
                rate_mode,
                referral_code,
                on_behalf_of,
            },
        )
    }

    async fn repay(
        &self,
        lending_pool: Address,
        asset: Address,
        amount: U256,
        rate_mode: InterestRateMode,
        on_behalf_of: Address,
    ) -> WorkflowResult<TxHash> {
        self.submit(
            "repay",
            GatewayCall::Repay {
                lending_pool,
                asset,
                amount,
                rate_mode,
                on_behalf_of,
            },
        )
    }

    async fn wrap_native(&self, weth: Address, amount: U256) -> WorkflowResult<TxHash> {
        self.submit("wrap_native", GatewayCall::WrapNative { weth, amount })
    }

    async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        _confirmations: u64,
        _timeout: Duration,
    ) -> WorkflowResult<ConfirmationStatus> {
        let step = self
            .submitted
            .lock()
            .unwrap()
            .get(&tx_hash)
            .copied()
            .ok_or_else(|| WorkflowError::transaction("unknown", "transaction was never sent"))?;
        let earlier = self.confirmations_of(step);
        self.record(GatewayCall::WaitForConfirmation { step });

        if self.time_out == Some(step) {
            return Ok(ConfirmationStatus::TimedOut);
        }
        if self.revert == Some((step, earlier)) {
            return Ok(ConfirmationStatus::Reverted { block_number: 7 });
        }
        Ok(ConfirmationStatus::Confirmed { block_number: 7 })
    }
}
