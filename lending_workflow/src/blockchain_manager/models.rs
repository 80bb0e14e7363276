use alloy::primitives::{I256, U256};

use crate::utils::{
    constants::{BASIS_POINTS_DECIMALS, HEALTH_FACTOR_DECIMALS, NATIVE_VALUE_DECIMALS},
    math_helper::divide_by_precision_f64,
};

/// Raw result of `getUserAccountData`, values are fixed-point as returned by the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountSnapshot {
    pub total_collateral: U256,
    pub total_debt: U256,
    pub available_to_borrow: U256,
    pub liquidation_threshold: U256,
    pub loan_to_value: U256,
    pub health_factor: U256,
}

impl AccountSnapshot {
    pub fn total_collateral_eth(&self) -> f64 {
        divide_by_precision_f64(self.total_collateral, NATIVE_VALUE_DECIMALS)
    }

    pub fn total_debt_eth(&self) -> f64 {
        divide_by_precision_f64(self.total_debt, NATIVE_VALUE_DECIMALS)
    }

    pub fn available_to_borrow_eth(&self) -> f64 {
        divide_by_precision_f64(self.available_to_borrow, NATIVE_VALUE_DECIMALS)
    }

    /// Liquidation threshold as a ratio, e.g. 0.825
    pub fn liquidation_threshold_ratio(&self) -> f64 {
        divide_by_precision_f64(self.liquidation_threshold, BASIS_POINTS_DECIMALS)
    }

    /// Loan to value as a ratio, e.g. 0.8
    pub fn loan_to_value_ratio(&self) -> f64 {
        divide_by_precision_f64(self.loan_to_value, BASIS_POINTS_DECIMALS)
    }

    /// Saturates to `f64::MAX` when there is no debt
    pub fn health_factor_value(&self) -> f64 {
        divide_by_precision_f64(self.health_factor, HEALTH_FACTOR_DECIMALS)
    }
}

/// Result of a price feed's `latestRoundData`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u128,
    pub answer: I256,
    pub started_at: U256,
    pub updated_at: U256,
    pub answered_in_round: u128,
}

/// Interest rate mode accepted by `borrow` and `repay`, the workflow only borrows at the stable rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestRateMode {
    Stable,
}

impl InterestRateMode {
    pub fn as_u256(self) -> U256 {
        match self {
            InterestRateMode::Stable => U256::from(1),
        }
    }
}

/// Outcome of waiting on a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Mined successfully and buried under the required confirmations
    Confirmed { block_number: u64 },
    /// Mined but the execution reverted
    Reverted { block_number: u64 },
    /// No sufficiently confirmed receipt before the timeout elapsed
    TimedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wad(value: u128) -> U256 {
        U256::from(value) * U256::from(10u128.pow(18))
    }

    #[test]
    fn test_snapshot_conversions() {
        let snapshot = AccountSnapshot {
            total_collateral: wad(2),
            total_debt: wad(1),
            available_to_borrow: U256::from(500_000_000_000_000_000u128),
            liquidation_threshold: U256::from(8250),
            loan_to_value: U256::from(8000),
            health_factor: U256::from(1_500_000_000_000_000_000u128),
        };

        assert_eq!(snapshot.total_collateral_eth(), 2.0);
        assert_eq!(snapshot.total_debt_eth(), 1.0);
        assert_eq!(snapshot.available_to_borrow_eth(), 0.5);
        assert_eq!(snapshot.liquidation_threshold_ratio(), 0.825);
        assert_eq!(snapshot.loan_to_value_ratio(), 0.8);
        assert_eq!(snapshot.health_factor_value(), 1.5);
    }

    #[test]
    fn test_health_factor_without_debt_saturates() {
        let snapshot = AccountSnapshot {
            health_factor: U256::MAX,
            ..Default::default()
        };
        assert_eq!(snapshot.health_factor_value(), f64::MAX);
    }

    #[test]
    fn test_stable_rate_mode_value() {
        assert_eq!(InterestRateMode::Stable.as_u256(), U256::from(1));
    }
}
