//! Staked-balance resolution with fallback-to-zero semantics.

use crate::ledger::ens::resolve_name;
use crate::ledger::rpc::{selector, EthRpcClient, LedgerConfig, LedgerError};
use crate::pools::pool_by_index;
use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use std::future::Future;
use tracing::{debug, warn};

/// SPSP amounts are fixed-point integers with 18 decimal places.
const TOKEN_DECIMALS: u32 = 18;
const TOKEN_SCALE: u128 = 1_000_000_000_000_000_000;

/// Read-only access to staked balances on the ledger.
pub trait LedgerClient {
    /// Raw fixed-point balance of `identifier` in the pool contract.
    /// The identifier may be a hex address or a resolvable name.
    fn staked_balance(
        &self,
        identifier: &str,
        pool_address: Address,
    ) -> impl Future<Output = Result<U256, LedgerError>> + Send;
}

/// `LedgerClient` over JSON-RPC: calls `PSPBalance(address)` on the pool
/// contract, resolving ENS names first when the identifier is not hex.
pub struct EthRpcLedger {
    client: EthRpcClient,
}

impl EthRpcLedger {
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        Ok(Self {
            client: EthRpcClient::new(config)?,
        })
    }

    async fn holder_address(&self, identifier: &str) -> Result<Address, LedgerError> {
        match identifier.trim().parse::<Address>() {
            Ok(addr) => Ok(addr),
            Err(_) => resolve_name(&self.client, identifier).await,
        }
    }
}

impl LedgerClient for EthRpcLedger {
    async fn staked_balance(
        &self,
        identifier: &str,
        pool_address: Address,
    ) -> Result<U256, LedgerError> {
        let holder = self.holder_address(identifier).await?;
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(&selector("PSPBalance(address)"));
        data.extend_from_slice(&[0u8; 12]);
        data.extend_from_slice(holder.as_slice());
        let out = self.client.call(pool_address, &data).await?;
        if out.len() != 32 {
            return Err(LedgerError::Decode(format!(
                "expected 32-byte balance, got {} bytes",
                out.len()
            )));
        }
        Ok(U256::from_be_slice(&out))
    }
}

/// Convert an 18-decimal fixed-point amount to a `Decimal`.
pub fn from_fixed_point(raw: U256) -> Result<Decimal, LedgerError> {
    let scale = U256::from(TOKEN_SCALE);
    let whole = u64::try_from(raw / scale).map_err(|_| LedgerError::Amount(raw.to_string()))?;
    // remainder < 10^18, always fits an i64
    let frac = u64::try_from(raw % scale).map_err(|_| LedgerError::Amount(raw.to_string()))?;
    Ok(Decimal::from(whole) + Decimal::new(frac as i64, TOKEN_DECIMALS))
}

/// Resolves an (identifier, pool) pair to a staked balance.
///
/// Any failure — bad identifier, unresolvable name, network, RPC, decode —
/// maps to a zero balance. The failure is logged and never surfaced to the
/// caller, so an empty or malformed identifier degrades gracefully instead
/// of blocking the rest of the pipeline.
pub struct BalanceResolver<L> {
    ledger: L,
}

impl<L: LedgerClient> BalanceResolver<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub async fn resolve(&self, identifier: &str, pool_index: usize) -> Decimal {
        let Some(pool) = pool_by_index(pool_index) else {
            warn!(pool_index, "unknown pool; defaulting balance to zero");
            return Decimal::ZERO;
        };
        match self.ledger.staked_balance(identifier, pool.address).await {
            Ok(raw) => match from_fixed_point(raw) {
                Ok(balance) => {
                    debug!(pool = pool.name, %balance, "staked balance resolved");
                    balance
                }
                Err(e) => {
                    warn!(pool = pool.name, error = %e, "balance conversion failed; defaulting to zero");
                    Decimal::ZERO
                }
            },
            Err(e) => {
                warn!(identifier, pool = pool.name, error = %e, "balance resolution failed; defaulting to zero");
                Decimal::ZERO
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLedger(U256);

    impl LedgerClient for FixedLedger {
        async fn staked_balance(
            &self,
            _identifier: &str,
            _pool_address: Address,
        ) -> Result<U256, LedgerError> {
            Ok(self.0)
        }
    }

    struct FailingLedger;

    impl LedgerClient for FailingLedger {
        async fn staked_balance(
            &self,
            identifier: &str,
            _pool_address: Address,
        ) -> Result<U256, LedgerError> {
            Err(LedgerError::UnresolvedName(identifier.to_string()))
        }
    }

    #[test]
    fn fixed_point_conversion() {
        assert_eq!(from_fixed_point(U256::ZERO).unwrap(), Decimal::ZERO);
        assert_eq!(from_fixed_point(U256::from(TOKEN_SCALE)).unwrap(), Decimal::ONE);
        let one_and_a_half = U256::from(TOKEN_SCALE) + U256::from(TOKEN_SCALE / 2);
        assert_eq!(from_fixed_point(one_and_a_half).unwrap(), Decimal::new(15, 1));
        let raw = U256::from(1_234_567_890_123_456_789_u64);
        assert_eq!(
            from_fixed_point(raw).unwrap(),
            Decimal::from_i128_with_scale(1_234_567_890_123_456_789, 18)
        );
    }

    #[test]
    fn fixed_point_overflow_is_an_error() {
        let huge = U256::from(2).pow(U256::from(130));
        assert!(from_fixed_point(huge).is_err());
    }

    #[tokio::test]
    async fn failing_ledger_resolves_to_zero() {
        let resolver = BalanceResolver::new(FailingLedger);
        assert_eq!(resolver.resolve("not-an-address", 0).await, Decimal::ZERO);
        assert_eq!(resolver.resolve("", 3).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_pool_resolves_to_zero() {
        let resolver = BalanceResolver::new(FixedLedger(U256::from(TOKEN_SCALE)));
        assert_eq!(resolver.resolve("whatever", 17).await, Decimal::ZERO);
    }

    #[tokio::test]
    async fn healthy_ledger_resolves_decimal_balance() {
        let resolver = BalanceResolver::new(FixedLedger(U256::from(5) * U256::from(TOKEN_SCALE)));
        assert_eq!(resolver.resolve("whatever", 0).await, Decimal::from(5));
    }
}
