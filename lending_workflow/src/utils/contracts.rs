use alloy::sol;

// Aave V2 Lending Pool Addresses Provider
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    LendingPoolAddressesProviderContract,
    "abis/lending_pool_addresses_provider.json"
);

// Aave V2 Lending Pool
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    LendingPoolContract,
    "abis/lending_pool.json"
);

sol! {
    // ERC20 token, only the allowance call is needed
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract Erc20Contract {
        function approve(address spender, uint256 amount) external returns (bool);
    }

    // Wrapped native asset
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract WethContract {
        function deposit() external payable;
    }

    // Chainlink price feed
    #[allow(missing_docs)]
    #[sol(rpc)]
    #[derive(Debug)]
    contract PriceFeedContract {
        function latestRoundData()
            external
            view
            returns (
                uint80 roundId,
                int256 answer,
                uint256 startedAt,
                uint256 updatedAt,
                uint80 answeredInRound
            );
    }
}
