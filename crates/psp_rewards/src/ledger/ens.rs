//! ENS name resolution (EIP-137) over raw `eth_call`.
//!
//! Two registry hops: `resolver(node)` on the registry, then `addr(node)`
//! on the resolver it returns.

use crate::ledger::rpc::{selector, EthRpcClient, LedgerError};
use alloy_primitives::{address, keccak256, Address, B256};
use tracing::debug;

/// ENS registry; same address on mainnet since deployment.
const ENS_REGISTRY: Address = address!("0x00000000000C2e074ec69A0dBb2997Ba6C7D2E1e");

/// EIP-137 namehash. Empty name hashes to zero. Expects a normalized
/// (lowercased) name.
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut packed = [0u8; 64];
        packed[..32].copy_from_slice(node.as_slice());
        packed[32..].copy_from_slice(label_hash.as_slice());
        node = keccak256(packed);
    }
    node
}

fn node_call(signature: &str, node: B256) -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector(signature));
    data.extend_from_slice(node.as_slice());
    data
}

fn decode_address(out: &[u8]) -> Result<Address, LedgerError> {
    if out.len() != 32 {
        return Err(LedgerError::Decode(format!(
            "expected 32-byte word, got {} bytes",
            out.len()
        )));
    }
    Ok(Address::from_slice(&out[12..]))
}

/// Resolve an ENS name to an address. Fails when the name has no resolver
/// or the resolver has no address record.
pub async fn resolve_name(client: &EthRpcClient, name: &str) -> Result<Address, LedgerError> {
    let normalized = name.trim().to_lowercase();
    let node = namehash(&normalized);
    let out = client
        .call(ENS_REGISTRY, &node_call("resolver(bytes32)", node))
        .await?;
    let resolver = decode_address(&out)?;
    if resolver == Address::ZERO {
        return Err(LedgerError::UnresolvedName(name.to_string()));
    }
    let out = client.call(resolver, &node_call("addr(bytes32)", node)).await?;
    let resolved = decode_address(&out)?;
    if resolved == Address::ZERO {
        return Err(LedgerError::UnresolvedName(name.to_string()));
    }
    debug!(name = %normalized, address = %resolved, "ens resolved");
    Ok(resolved)
}
