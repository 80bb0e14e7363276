use anyhow::{Context, Result};
use lending_workflow::{
    account,
    blockchain_manager::BlockchainManager,
    config::{load_env_var_or, LocalConfig},
    utils,
    workflow::{LendingWorkflow, WorkflowSettings},
};
use tracing::{error, info};

/// Main entry point for the lending workflow
///
/// This function performs the following steps:
/// 1. Initializes the pre-run environment
/// 2. Resolves the account and the network addresses
/// 3. Runs deposit, borrow and repay against the lending pool
/// 4. Logs the full error chain if any step fails
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_pre_run()?;

    if let Err(e) = run().await {
        let error_message = e
            .chain()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        error!("Lending workflow failed: {}", error_message);
        return Err(e);
    }

    Ok(())
}

/// Initializes the pre-run environment
///
/// This function performs the following steps:
/// 1. Loads environment variables from the `.env` file, if there is one
/// 2. Sets up the logger
fn init_pre_run() -> Result<()> {
    dotenvy::dotenv().ok();

    let log_inside_file = load_env_var_or("LOG_INSIDE_FILE", false)?;
    utils::logger::setup_logger(log_inside_file).context("Failed to setup logger")?;

    Ok(())
}

async fn run() -> Result<()> {
    let local_config = LocalConfig::load_from_env().context("Failed to load configuration")?;
    info!("Starting the lending workflow on {}", local_config.network);

    let account = account::get_account(&local_config).context("Failed to resolve account")?;

    let network_config = local_config
        .networks
        .get(&local_config.network)
        .context("Failed to load network addresses")?;

    let gateway = BlockchainManager::get_gateway(&local_config, &account)?;

    let workflow = LendingWorkflow::new(
        &gateway,
        network_config,
        account.address(),
        WorkflowSettings::from_local_config(&local_config),
    );

    let report = workflow.run().await.context("Lending workflow aborted")?;

    info!(
        "Done: borrowed and repaid {} DAI through pool {}",
        utils::math_helper::divide_by_precision_f64(
            report.repaid,
            utils::constants::TOKEN_DECIMALS
        ),
        report.lending_pool
    );

    Ok(())
}
