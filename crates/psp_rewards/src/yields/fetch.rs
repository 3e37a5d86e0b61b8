//! Staking API client: one GET returns every pool's statistics.
//!
//! The endpoint has no per-pool variant; the whole payload is fetched each
//! cycle and the orchestrator picks the entry it needs. Nothing is cached
//! across cycles — each fetch supersedes the previous one entirely.

use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_POOLS_URL: &str = "https://api.paraswap.io/staking/pools/1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct YieldConfig {
    pub pools_url: String,
    /// Defensive request timeout; the upstream contract offers none.
    pub timeout_secs: u64,
}

impl Default for YieldConfig {
    fn default() -> Self {
        Self {
            pools_url: DEFAULT_POOLS_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Error, Debug)]
pub enum YieldError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("api error: status {0} body {1}")]
    Api(u16, String),
    #[error("parse: {0}")]
    Parse(String),
}

/// Published statistics for one pool. Position in the payload array is the
/// pool index; there is no explicit id field.
#[derive(Clone, Debug, Deserialize)]
pub struct PoolYieldStats {
    #[serde(rename = "APY")]
    pub apy: ApyStats,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApyStats {
    /// Current annual percentage yield, percent. Non-negative in practice.
    pub current: f64,
}

#[derive(Deserialize)]
struct PoolsPayload {
    pools: Vec<PoolYieldStats>,
}

/// Parse a staking-pools payload into positionally indexed stats.
/// Unknown fields are ignored.
pub fn parse_pools(body: &str) -> Result<Vec<PoolYieldStats>, YieldError> {
    let payload: PoolsPayload =
        serde_json::from_str(body).map_err(|e| YieldError::Parse(e.to_string()))?;
    Ok(payload.pools)
}

/// Source of per-pool yield statistics.
pub trait YieldFeed {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<PoolYieldStats>, YieldError>> + Send;
}

/// `YieldFeed` over HTTP against the fixed staking API endpoint.
pub struct StakingApiClient {
    config: YieldConfig,
    client: reqwest::Client,
}

impl StakingApiClient {
    pub fn new(config: YieldConfig) -> Result<Self, YieldError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }
}

impl YieldFeed for StakingApiClient {
    async fn fetch_all(&self) -> Result<Vec<PoolYieldStats>, YieldError> {
        let res = self.client.get(&self.config.pools_url).send().await?;
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(YieldError::Api(status.as_u16(), body));
        }
        let pools = parse_pools(&body)?;
        debug!(pools = pools.len(), url = %self.config.pools_url, "fetched pool statistics");
        Ok(pools)
    }
}
