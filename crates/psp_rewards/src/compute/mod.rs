//! APY-to-APR conversion and reward derivation.

mod rates;

pub use rates::{convert_rates, RewardRates, DAYS_PER_YEAR, EPOCH_DAYS};
