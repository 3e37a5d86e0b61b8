//! Published output of a refresh cycle.

use rust_decimal::Decimal;
use serde::Serialize;

/// One consistent set of derived reward metrics.
///
/// While `loading` is true no other field is guaranteed current; once it
/// flips false, all numeric fields derive from the same fetch cycle. Only
/// the orchestrator writes this, and never partially.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RewardSnapshot {
    pub staked_balance: Decimal,
    /// Published pool APY, percent.
    pub apy_pct: f64,
    /// Rate for one 14-day epoch (fraction).
    pub epoch_apr: f64,
    pub epoch_rewards: f64,
    pub daily_rewards: f64,
    pub loading: bool,
}
