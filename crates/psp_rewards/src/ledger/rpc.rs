//! Minimal JSON-RPC client for read-only Ethereum queries.

use alloy_primitives::{keccak256, Address};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_RPC_URL: &str = "https://cloudflare-eth.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    pub rpc_url: String,
    /// Defensive request timeout; the upstream contract offers none.
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("rpc error: status {0} body {1}")]
    Rpc(u16, String),
    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },
    #[error("decode: {0}")]
    Decode(String),
    #[error("unresolved name: {0}")]
    UnresolvedName(String),
    #[error("amount out of range: {0}")]
    Amount(String),
}

#[derive(Deserialize)]
struct RpcReply {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// First four bytes of the Keccak-256 hash of a Solidity function signature.
pub(crate) fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// HTTP JSON-RPC client with a fixed node URL. Single attempt per call.
pub struct EthRpcClient {
    config: LedgerConfig,
    client: reqwest::Client,
}

impl EthRpcClient {
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// Read-only `eth_call` at the latest block. Returns the raw ABI output.
    pub async fn call(&self, to: Address, data: &[u8]) -> Result<Vec<u8>, LedgerError> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                { "to": format!("{to}"), "data": format!("0x{}", hex::encode(data)) },
                "latest"
            ],
        });
        let res = self
            .client
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(LedgerError::Rpc(status.as_u16(), text));
        }
        let reply: RpcReply = serde_json::from_str(&text)
            .map_err(|e| LedgerError::Decode(format!("parse rpc reply: {e}")))?;
        if let Some(err) = reply.error {
            return Err(LedgerError::Node {
                code: err.code,
                message: err.message,
            });
        }
        let result = reply
            .result
            .ok_or_else(|| LedgerError::Decode("missing result".to_string()))?;
        let out = hex::decode(result.trim_start_matches("0x"))
            .map_err(|e| LedgerError::Decode(format!("result hex: {e}")))?;
        debug!(to = %to, bytes = out.len(), "eth_call");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_selectors() {
        assert_eq!(selector("resolver(bytes32)"), [0x01, 0x78, 0xb8, 0xbf]);
        assert_eq!(selector("addr(bytes32)"), [0x3b, 0x3b, 0x57, 0xde]);
    }

    #[test]
    fn reply_parses_result_and_error() {
        let ok: RpcReply = serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x01"}"#)
            .expect("parse ok reply");
        assert_eq!(ok.result.as_deref(), Some("0x01"));
        assert!(ok.error.is_none());

        let err: RpcReply = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .expect("parse error reply");
        let body = err.error.expect("error body");
        assert_eq!(body.code, -32000);
        assert_eq!(body.message, "execution reverted");
    }
}
