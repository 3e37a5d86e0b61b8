//! Ledger access: JSON-RPC client, ENS resolution, and balance resolution.

mod balance;
mod ens;
mod rpc;

pub use alloy_primitives::{Address, U256};
pub use balance::{from_fixed_point, BalanceResolver, EthRpcLedger, LedgerClient};
pub use ens::namehash;
pub use rpc::{EthRpcClient, LedgerConfig, LedgerError};
