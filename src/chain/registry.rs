//! Chain registry and wallet session.
//!
//! # Responsibilities
//! - Hold every registered chain definition (first registration wins)
//! - Build RPC transports, read clients, and signer-bound write clients
//! - Track the single active chain for the session
//! - Serve cached native-balance lookups (5 second TTL)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::primitives::utils::format_ether;
use alloy::providers::{Provider, ProviderBuilder};

use crate::cache::LayeredCache;
use crate::chain::catalog;
use crate::chain::types::{ChainDefinition, ChainError, ChainResult};
use crate::chain::wallet::Wallet;

/// Balance cache TTL. Short by design: balances go stale the moment a
/// transaction lands.
const BALANCE_TTL: Duration = Duration::from_secs(5);

/// Registry of chain definitions plus the active wallet session.
///
/// Owns the signing key material and the balance cache; neither is shared
/// across sessions. Exactly one chain is active at any time, mutated only by
/// [`ChainRegistry::switch_active`].
pub struct ChainRegistry {
    chains: HashMap<String, ChainDefinition>,
    active: String,
    wallet: Wallet,
    cache: LayeredCache<String>,
}

impl ChainRegistry {
    /// Create a registry seeded with the given chains.
    ///
    /// The first chain in the list becomes active. An empty list falls back
    /// to the catalog's Sepolia entry so the session always has an active
    /// chain.
    pub fn new(
        wallet: Wallet,
        initial_chains: Vec<ChainDefinition>,
        cache_path: Option<PathBuf>,
    ) -> Self {
        let mut chains = HashMap::new();
        let mut active = None;
        for def in initial_chains {
            if active.is_none() {
                active = Some(def.name.clone());
            }
            chains.entry(def.name.clone()).or_insert(def);
        }
        let active = active.unwrap_or_else(|| {
            let sepolia = catalog::definition("sepolia").expect("sepolia is in the catalog");
            let name = sepolia.name.clone();
            chains.insert(name.clone(), sepolia);
            name
        });

        tracing::info!(
            address = %wallet.address(),
            active_chain = %active,
            chains = chains.len(),
            "Chain registry initialized"
        );

        Self {
            chains,
            active,
            wallet,
            cache: LayeredCache::new(BALANCE_TTL, cache_path),
        }
    }

    /// Register a chain definition. Idempotent: if the name already exists
    /// the existing definition is kept.
    pub fn register(&mut self, definition: ChainDefinition) {
        self.chains
            .entry(definition.name.clone())
            .or_insert(definition);
    }

    /// Resolve a chain name to its RPC transport URL, preferring a custom
    /// RPC URL over the default.
    pub fn resolve(&self, name: &str) -> ChainResult<url::Url> {
        let def = self
            .chains
            .get(name)
            .ok_or_else(|| ChainError::UnsupportedChain(name.to_string()))?;
        def.rpc_url()
            .parse()
            .map_err(|e| ChainError::InvalidRpcUrl {
                url: def.rpc_url().to_string(),
                reason: format!("{}", e),
            })
    }

    /// Build a stateless read (public) client for a registered chain.
    pub fn read_client(&self, name: &str) -> ChainResult<Arc<dyn Provider + Send + Sync>> {
        let url = self.resolve(name)?;
        Ok(Arc::new(ProviderBuilder::new().connect_http(url)) as Arc<dyn Provider + Send + Sync>)
    }

    /// Build a write client for a registered chain, bound to the session
    /// signer.
    pub fn write_client(&self, name: &str) -> ChainResult<Arc<dyn Provider + Send + Sync>> {
        let url = self.resolve(name)?;
        let signer_wallet = EthereumWallet::from(self.wallet.signer().clone());
        Ok(
            Arc::new(ProviderBuilder::new().wallet(signer_wallet).connect_http(url))
                as Arc<dyn Provider + Send + Sync>,
        )
    }

    /// Switch the active chain, lazily registering it from the well-known
    /// catalog if it was never registered. Fails with `InvalidChain` when
    /// the name matches no catalog entry.
    pub fn switch_active(&mut self, name: &str, custom_rpc_url: Option<&str>) -> ChainResult<()> {
        if !self.chains.contains_key(name) {
            let mut def = catalog::definition(name)
                .ok_or_else(|| ChainError::InvalidChain(name.to_string()))?;
            if let Some(url) = custom_rpc_url {
                def = def.with_custom_rpc(url);
            }
            self.register(def);
        }
        self.active = name.to_string();
        tracing::debug!(chain = %name, "Switched active chain");
        Ok(())
    }

    /// The definition of the currently active chain.
    pub fn active_chain(&self) -> &ChainDefinition {
        self.chains
            .get(&self.active)
            .expect("active chain is always registered")
    }

    /// The session signer's address.
    pub fn wallet_address(&self) -> Address {
        self.wallet.address()
    }

    /// The session wallet.
    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Native balance of the session wallet on the active chain, formatted
    /// in whole-token units. Cached for 5 seconds; degrades to `None` on RPC
    /// failure by design.
    pub async fn wallet_balance(&self) -> Option<String> {
        let cache_key = format!("walletBalance_{}", self.active);
        if let Some(cached) = self.cache.get(&cache_key) {
            tracing::debug!(chain = %self.active, "Returning cached wallet balance");
            return Some(cached);
        }

        let balance = self.fetch_balance(&self.active).await?;
        self.cache.set(&cache_key, balance.clone());
        Some(balance)
    }

    /// Uncached native balance on an arbitrary registered chain.
    pub async fn wallet_balance_for_chain(&self, name: &str) -> Option<String> {
        self.fetch_balance(name).await
    }

    /// One-line session summary for agent context.
    pub async fn describe(&self) -> String {
        let chain = self.active_chain().clone();
        let balance = self
            .wallet_balance()
            .await
            .unwrap_or_else(|| "unknown".to_string());
        format!(
            "EVM Wallet Address: {}\nBalance: {} {}\nChain ID: {}, Name: {}",
            self.wallet.address(),
            balance,
            chain.currency_symbol,
            chain.chain_id,
            chain.display_name
        )
    }

    async fn fetch_balance(&self, chain: &str) -> Option<String> {
        let client = match self.read_client(chain) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(chain = %chain, error = %e, "Cannot build read client for balance");
                return None;
            }
        };
        match client.get_balance(self.wallet.address()).await {
            Ok(balance) => Some(format_ether(balance)),
            Err(e) => {
                tracing::warn!(chain = %chain, error = %e, "Error getting wallet balance");
                None
            }
        }
    }
}

impl std::fmt::Debug for ChainRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainRegistry")
            .field("active", &self.active)
            .field("chains", &self.chains.keys().collect::<Vec<_>>())
            .field("address", &self.wallet.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn test_registry() -> ChainRegistry {
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        ChainRegistry::new(wallet, Vec::new(), None)
    }

    #[test]
    fn defaults_to_sepolia_when_unseeded() {
        let registry = test_registry();
        assert_eq!(registry.active_chain().name, "sepolia");
        assert_eq!(registry.active_chain().chain_id, 11155111);
    }

    #[test]
    fn register_is_first_wins() {
        let mut registry = test_registry();
        let original = catalog::definition("base").unwrap();
        registry.register(original.clone());

        let overwrite = original.clone().with_custom_rpc("https://other.example");
        registry.register(overwrite);

        registry.switch_active("base", None).unwrap();
        assert!(registry.active_chain().custom_rpc_url.is_none());
    }

    #[test]
    fn switch_to_catalog_chain_registers_it() {
        let mut registry = test_registry();
        registry
            .switch_active("base", Some("https://base.example"))
            .unwrap();
        assert_eq!(registry.active_chain().name, "base");
        assert_eq!(registry.active_chain().rpc_url(), "https://base.example");
    }

    #[test]
    fn switch_to_unknown_chain_fails() {
        let mut registry = test_registry();
        let err = registry.switch_active("foonet", None).unwrap_err();
        assert!(matches!(err, ChainError::InvalidChain(_)));
        // Session keeps its previous active chain.
        assert_eq!(registry.active_chain().name, "sepolia");
    }

    #[test]
    fn resolve_unregistered_chain_fails() {
        let registry = test_registry();
        let err = registry.resolve("arbitrum").unwrap_err();
        assert!(matches!(err, ChainError::UnsupportedChain(_)));
    }

    #[test]
    fn resolve_prefers_custom_rpc() {
        let mut registry = test_registry();
        registry
            .switch_active("optimism", Some("https://op.example"))
            .unwrap();
        let url = registry.resolve("optimism").unwrap();
        assert_eq!(url.as_str(), "https://op.example/");
    }

    #[test]
    fn clients_fail_for_unregistered_chain() {
        let registry = test_registry();
        assert!(registry.read_client("bsc").is_err());
        assert!(registry.write_client("bsc").is_err());
    }
}
