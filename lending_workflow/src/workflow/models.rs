use alloy::primitives::{Address, U256};

use crate::blockchain_manager::models::AccountSnapshot;

/// Borrowing capacity and debt of an account, in native asset units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorrowableData {
    pub available_to_borrow: f64,
    pub total_debt: f64,
}

impl From<&AccountSnapshot> for BorrowableData {
    fn from(snapshot: &AccountSnapshot) -> Self {
        Self {
            available_to_borrow: snapshot.available_to_borrow_eth(),
            total_debt: snapshot.total_debt_eth(),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct WorkflowReport {
    pub lending_pool: Address,
    pub deposited: U256,
    /// Borrow asset price in native asset units
    pub price: f64,
    pub borrowed: U256,
    /// Debt reported right after borrowing, in native asset units
    pub debt_before_repay: f64,
    pub repaid: U256,
    pub final_snapshot: AccountSnapshot,
}
