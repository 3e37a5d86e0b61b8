//! Epoch-aligned rate conversion.
//!
//! Pools publish a compounding APY; rewards accrue in fixed 14-day epochs.
//! This converts the published figure into a simple annualized rate that is
//! consistent with 14-day compounding, plus absolute reward amounts for a
//! given principal.

/// Staking epoch length in days; the compounding unit.
pub const EPOCH_DAYS: f64 = 14.0;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Derived reward metrics for one (APY, principal) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RewardRates {
    /// Simple annualized rate consistent with 14-day compounding (fraction).
    pub apr: f64,
    /// Rate applicable to exactly one epoch (fraction).
    pub epoch_apr: f64,
    /// Absolute reward accrued over one epoch at the given principal.
    pub epoch_rewards: f64,
    /// Absolute reward accrued per day at the given principal.
    pub daily_rewards: f64,
}

/// Convert a published compounding APY (percent, e.g. 12.5 for 12.5%) into
/// a simple APR and reward amounts for `principal`.
///
/// Pure and deterministic. No domain validation: negative inputs are
/// accepted and computed as-is.
pub fn convert_rates(apy_pct: f64, principal: f64) -> RewardRates {
    let epochs_per_year = DAYS_PER_YEAR / EPOCH_DAYS;
    let apr = ((1.0 + apy_pct / 100.0).powf(1.0 / epochs_per_year) - 1.0) * epochs_per_year;
    let epoch_apr = apr / epochs_per_year;
    let epoch_rewards = apr * principal / DAYS_PER_YEAR * EPOCH_DAYS;
    let daily_rewards = principal * apr / DAYS_PER_YEAR;
    RewardRates {
        apr,
        epoch_apr,
        epoch_rewards,
        daily_rewards,
    }
}
