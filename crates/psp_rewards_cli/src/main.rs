//! psp-rewards CLI: one-shot staking-reward projection.
//!
//! Thin stand-in for the presentation layer: feeds the selected pool and
//! principal into the orchestrator, runs one refresh cycle, and prints the
//! resulting snapshot.

use clap::{Parser, Subcommand};
use psp_rewards::ledger::{BalanceResolver, EthRpcLedger, LedgerConfig};
use psp_rewards::orchestrator::RewardOrchestrator;
use psp_rewards::pools::{pool_by_index, POOLS, POOL_COUNT};
use psp_rewards::yields::{StakingApiClient, YieldConfig};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Rewards(args) => run_rewards(args),
        Command::Pools => run_pools(),
    }
}

#[derive(Parser)]
#[command(name = "psp-rewards")]
#[command(author = "gorusys <goru.connector@outlook.com>")]
#[command(about = "Staking-reward projections for ParaSwap PSP pools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project rewards for an address (or ENS name) in one pool.
    Rewards(RewardsArgs),
    /// List the known staking pools.
    Pools,
}

#[derive(Parser)]
struct RewardsArgs {
    /// Staker address or ENS name. Omitted: balance resolves to zero.
    #[arg(long)]
    address: Option<String>,
    /// Pool index (0..5).
    #[arg(long, default_value_t = 0)]
    pool: usize,
    /// Ethereum JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,
    /// Staking statistics endpoint.
    #[arg(long)]
    pools_url: Option<String>,
    /// Print the snapshot as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn run_rewards(args: RewardsArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.pool >= POOL_COUNT {
        return Err(format!("pool index {} out of range (0..{})", args.pool, POOL_COUNT).into());
    }
    let mut ledger_config = LedgerConfig::default();
    if let Some(url) = args.rpc_url {
        ledger_config.rpc_url = url;
    }
    let mut yield_config = YieldConfig::default();
    if let Some(url) = args.pools_url {
        yield_config.pools_url = url;
    }
    let ledger = EthRpcLedger::new(ledger_config)?;
    let feed = StakingApiClient::new(yield_config)?;
    let orch = RewardOrchestrator::new(BalanceResolver::new(ledger), feed);

    let principal = args.address.as_deref().unwrap_or_default();
    info!(pool = args.pool, "running refresh cycle");
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        orch.select(args.pool, principal).await;
        if orch.cycle_count() == 0 {
            // First load with defaults still runs one cycle.
            orch.refresh().await;
        }
    });

    let snapshot = orch.snapshot();
    if snapshot.loading {
        eprintln!("pool statistics unavailable; try again later");
        std::process::exit(1);
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        let pool_name = pool_by_index(args.pool).map_or("?", |p| p.name);
        println!("Pool:          {pool_name}");
        println!("Staked:        {:.2} PSP", snapshot.staked_balance);
        println!("Pool APY:      {:.2}%", snapshot.apy_pct);
        println!("Pool APR:      {:.2}%", snapshot.epoch_apr * 100.0);
        println!("Epoch rewards: {:.2} PSP", snapshot.epoch_rewards);
        println!("Daily rewards: {:.2} PSP", snapshot.daily_rewards);
    }
    Ok(())
}

fn run_pools() -> Result<(), Box<dyn std::error::Error>> {
    for pool in &POOLS {
        println!("{}\t{}\t{}", pool.index, pool.name, pool.address);
    }
    Ok(())
}
