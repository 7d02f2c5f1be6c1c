//! 405Coin node: parameter and chain-identity composition root.
//!
//! Parses the network choice and the dev/regtest overrides at the process
//! boundary, selects the consensus parameter set exactly once, and exposes it
//! through [`context`]. Block processing, networking and wallet services hang
//! off that context in the full node.

use anyhow::{bail, Context, Result};
use clap::Parser;
use coin405_consensus::params::{BudgetOverride, NetworkId, Overrides};
use coin405_consensus::ParamsError;
use coin405_node::context;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// 405Coin node.
#[derive(Parser, Debug)]
#[command(name = "coin405-node")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Network to run on (main, test, dev, regtest)
    #[arg(short, long, default_value = "main")]
    network: String,

    /// Smartnode/budget/superblock start heights as
    /// <smartnode>:<budget>:<superblock> (dev/regtest)
    #[arg(long)]
    budget_params: Option<String>,

    /// Number of blocks mined at the minimum difficulty (dev/regtest)
    #[arg(long)]
    minimum_difficulty_blocks: Option<u32>,

    /// Number of early blocks paying a multiplied subsidy (dev/regtest)
    #[arg(long)]
    high_subsidy_blocks: Option<u32>,

    /// Multiplier applied to the early-block subsidy (dev/regtest)
    #[arg(long)]
    high_subsidy_factor: Option<u32>,

    /// Quorum profile backing chain locks (dev)
    #[arg(long)]
    llmq_chain_locks: Option<String>,

    /// Quorum profile backing instant-send locks (dev)
    #[arg(long)]
    llmq_instant_send: Option<String>,

    /// Devnet name, embedded in the derived devnet genesis (dev)
    #[arg(long)]
    devnet: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Boundary adapter: raw argument strings become a typed override set before
/// the core ever sees them.
fn overrides_from_args(args: &Args) -> Result<Overrides> {
    let budget = args
        .budget_params
        .as_deref()
        .map(str::parse::<BudgetOverride>)
        .transpose()
        .context("parsing --budget-params")?;

    Ok(Overrides {
        budget,
        minimum_difficulty_blocks: args.minimum_difficulty_blocks,
        high_subsidy_blocks: args.high_subsidy_blocks,
        high_subsidy_factor: args.high_subsidy_factor,
        chain_locks_role: args.llmq_chain_locks.clone(),
        instant_send_role: args.llmq_instant_send.clone(),
        devnet_name: args.devnet.clone(),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting 405Coin node v{}", env!("CARGO_PKG_VERSION"));

    let network: NetworkId = args.network.parse()?;
    let overrides = overrides_from_args(&args)?;

    let params = match coin405_consensus::params::select(network, &overrides) {
        Ok(params) => params,
        Err(err @ ParamsError::GenesisIntegrity(_)) => {
            // Continuing would let this node join or build an incompatible
            // chain.
            error!("{err}");
            bail!("aborting startup: {err}");
        }
        Err(err) => return Err(err.into()),
    };

    info!(network = %params.network, genesis = %params.genesis_hash, "consensus parameters selected");
    if let Some(devnet_hash) = &params.devnet_genesis_hash {
        info!(devnet_genesis = %devnet_hash, "devnet genesis derived");
    }

    let chain = context::install(params)?;
    info!(
        port = chain.active_parameters().default_port,
        deployments = chain.active_parameters().deployments.len(),
        "chain context installed"
    );

    Ok(())
}
