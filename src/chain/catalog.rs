//! Well-known chain catalog.
//!
//! Lazily registered chains are synthesized from this table by name. The
//! default endpoints are public RPC nodes; deployments that need a dedicated
//! endpoint supply a custom RPC URL when switching chains.

use crate::chain::types::ChainDefinition;

/// Catalog entries: (name, chain id, display name, currency, default RPC).
const CATALOG: &[(&str, u64, &str, &str, &str)] = &[
    (
        "mainnet",
        1,
        "Ethereum",
        "ETH",
        "https://ethereum-rpc.publicnode.com",
    ),
    (
        "sepolia",
        11155111,
        "Sepolia",
        "ETH",
        "https://ethereum-sepolia-rpc.publicnode.com",
    ),
    ("base", 8453, "Base", "ETH", "https://mainnet.base.org"),
    (
        "baseSepolia",
        84532,
        "Base Sepolia",
        "ETH",
        "https://sepolia.base.org",
    ),
    (
        "arbitrum",
        42161,
        "Arbitrum One",
        "ETH",
        "https://arb1.arbitrum.io/rpc",
    ),
    (
        "optimism",
        10,
        "OP Mainnet",
        "ETH",
        "https://mainnet.optimism.io",
    ),
    (
        "polygon",
        137,
        "Polygon",
        "POL",
        "https://polygon-rpc.com",
    ),
    (
        "avalanche",
        43114,
        "Avalanche",
        "AVAX",
        "https://api.avax.network/ext/bc/C/rpc",
    ),
    (
        "bsc",
        56,
        "BNB Smart Chain",
        "BNB",
        "https://bsc-dataseed.binance.org",
    ),
];

/// Look up a well-known chain definition by name.
pub fn definition(name: &str) -> Option<ChainDefinition> {
    CATALOG
        .iter()
        .find(|(n, ..)| *n == name)
        .map(|(n, id, display, currency, rpc)| ChainDefinition {
            name: (*n).to_string(),
            chain_id: *id,
            display_name: (*display).to_string(),
            currency_symbol: (*currency).to_string(),
            default_rpc_url: (*rpc).to_string(),
            custom_rpc_url: None,
        })
}

/// Names of every catalog chain, used to probe per-chain RPC overrides.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(n, ..)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_resolves() {
        let sepolia = definition("sepolia").unwrap();
        assert_eq!(sepolia.chain_id, 11155111);
        assert_eq!(sepolia.currency_symbol, "ETH");
        assert!(sepolia.custom_rpc_url.is_none());
    }

    #[test]
    fn unknown_chain_is_none() {
        assert!(definition("foonet").is_none());
    }
}
