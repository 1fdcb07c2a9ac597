//! Chain definitions and error types.

use thiserror::Error;

/// A known EVM chain: identity plus RPC endpoints.
///
/// Immutable once registered. A custom RPC URL, when present, always wins
/// over the default endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainDefinition {
    /// Registry key (e.g. "sepolia").
    pub name: String,
    /// Numeric chain id (EIP-155).
    pub chain_id: u64,
    /// Human-readable name (e.g. "Sepolia").
    pub display_name: String,
    /// Native currency symbol (e.g. "ETH").
    pub currency_symbol: String,
    /// Default public RPC endpoint.
    pub default_rpc_url: String,
    /// Optional deployment-specific RPC override.
    pub custom_rpc_url: Option<String>,
}

impl ChainDefinition {
    /// The RPC endpoint to use: custom override first, default otherwise.
    pub fn rpc_url(&self) -> &str {
        self.custom_rpc_url
            .as_deref()
            .unwrap_or(&self.default_rpc_url)
    }

    /// Return a copy with the custom RPC URL set.
    pub fn with_custom_rpc(mut self, url: impl Into<String>) -> Self {
        self.custom_rpc_url = Some(url.into());
        self
    }
}

/// Errors from chain registry and session operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The chain name was never registered with this session.
    #[error("chain {0} is not supported")]
    UnsupportedChain(String),

    /// The chain name matches no entry in the well-known catalog.
    #[error("invalid chain name: {0}")]
    InvalidChain(String),

    /// The session has no signing key bound, so no write client exists.
    #[error("no signing account bound to this session")]
    NoSigningAccount,

    /// Invalid private key format or derivation error.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// A chain definition carries an unparseable RPC URL.
    #[error("invalid RPC URL '{url}': {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
