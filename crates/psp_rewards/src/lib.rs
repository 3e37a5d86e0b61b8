//! psp_rewards — staking-reward projections for ParaSwap PSP pools.
//!
//! Resolves a staker's PSP balance from the SPSP pool contracts, fetches the
//! published per-pool yield statistics, and derives epoch-aligned reward
//! metrics. Read-only; no seeds; no transaction signing.

pub mod compute;
pub mod ledger;
pub mod orchestrator;
pub mod pools;
pub mod yields;

pub use compute::{convert_rates, RewardRates};
pub use ledger::{BalanceResolver, EthRpcLedger, LedgerClient, LedgerConfig, LedgerError};
pub use orchestrator::{RewardOrchestrator, RewardSnapshot, Selection};
pub use pools::{pool_by_index, Pool, POOLS, POOL_COUNT};
pub use yields::{parse_pools, PoolYieldStats, StakingApiClient, YieldConfig, YieldError, YieldFeed};
