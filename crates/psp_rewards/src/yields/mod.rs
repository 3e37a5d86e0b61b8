//! Published yield statistics: payload types and the HTTP source.

mod fetch;

pub use fetch::{
    parse_pools, ApyStats, PoolYieldStats, StakingApiClient, YieldConfig, YieldError, YieldFeed,
};
