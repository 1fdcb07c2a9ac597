//! Configuration value types.
//!
//! Per-deployment constants (contract address, secrets slot/version,
//! subscription id) are data loaded at process start, never inline literals
//! at call sites. Unset numeric fields carry an explicit sentinel so a
//! config value is always constructible; the validator rejects sentinels
//! before first use.

use alloy::primitives::Address;
use std::path::PathBuf;

use crate::chain::{ChainDefinition, Wallet};
use crate::secrets::SecretsBundle;

/// Sentinel for an unconfigured numeric field.
pub const UNCONFIGURED_U64: u64 = u64::MAX;

/// Sentinel for an unconfigured secrets slot.
pub const UNCONFIGURED_SLOT: u8 = u8::MAX;

/// How the contract call references the distributed secrets. The two
/// variants correspond to the two deployed `sendRequest` shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsReference {
    /// Secrets uploaded directly to the DON: slot plus version.
    DonHosted { slot_id: u8, version: u64 },
    /// Encrypted reference URLs produced by the indirect strategy.
    EncryptedUrls(Vec<u8>),
}

/// Everything one gift-request dispatch needs to know about its deployment.
///
/// Immutable value object; validated once immediately before first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftContractConfig {
    /// The Functions consumer contract.
    pub contract_address: Address,
    /// Which secrets-distribution artifact populates the call.
    pub secrets: SecretsReference,
    /// Billing/authorization subscription for DON compute.
    pub subscription_id: u64,
    /// Chain the contract is deployed on.
    pub chain_name: String,
}

/// Settings for the gift-dispatch and balance commands.
#[derive(Debug)]
pub struct AgentSettings {
    pub wallet: Wallet,
    /// Sepolia (always present, session default) plus any catalog chain
    /// with an RPC override in the environment.
    pub chains: Vec<ChainDefinition>,
    pub contract: GiftContractConfig,
    /// Durable tier of the balance cache.
    pub cache_path: Option<PathBuf>,
}

/// Settings for a secrets-distribution run.
#[derive(Debug)]
pub struct SecretsDeploySettings {
    pub wallet: Wallet,
    /// The plaintext payload to distribute.
    pub bundle: SecretsBundle,
    /// Target DON identifier, bound into the ciphertext.
    pub don_id: String,
    /// Gateways for the direct strategy.
    pub gateway_urls: Vec<String>,
    /// Blob store token for the indirect strategy.
    pub github_token: Option<String>,
    /// Where the distribution record is persisted.
    pub record_path: PathBuf,
}
