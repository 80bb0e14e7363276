/// Decimals used by the lending pool for amounts denominated in the native asset
pub const NATIVE_VALUE_DECIMALS: u8 = 18;

/// Decimals used by the collateral and borrow tokens
pub const TOKEN_DECIMALS: u8 = 18;

/// Decimals of the health factor returned by `getUserAccountData`
pub const HEALTH_FACTOR_DECIMALS: u8 = 18;

/// Liquidation threshold and LTV are expressed in basis points
pub const BASIS_POINTS_DECIMALS: u8 = 4;

/// Decimals of the DAI/ETH price feed answer
pub const PRICE_FEED_DECIMALS: u8 = 18;

/// Collateral deposited on every run, in whole tokens
pub const DEPOSIT_AMOUNT: f64 = 0.1;

/// Share of the available borrowing capacity that gets borrowed
pub const BORROW_SAFETY_FACTOR: f64 = 0.95;

/// No referral
pub const REFERRAL_CODE: u16 = 0;

/// Networks served by a local node with pre-funded accounts
pub const LOCAL_NETWORKS: [&str; 3] = ["hardhat", "development", "mainnet-fork"];

/// Networks where the account is funded with wrapped native asset before depositing
pub const FORKED_NETWORKS: [&str; 1] = ["mainnet-fork"];

/// Key of the first pre-funded account on hardhat and anvil nodes
pub const LOCAL_TEST_ACCOUNT_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
