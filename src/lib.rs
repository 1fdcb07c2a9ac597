//! Gift redemption agent backend.
//!
//! Distributes encrypted secrets to a decentralized oracle network (DON)
//! and dispatches the on-chain transaction that triggers the network to
//! validate a gift redemption.

pub mod cache;
pub mod chain;
pub mod config;
pub mod gift;
pub mod secrets;

pub use chain::{ChainDefinition, ChainError, ChainRegistry, Wallet};
pub use config::{GiftContractConfig, SecretsReference};
pub use gift::{GiftError, GiftOrchestrator, GiftRequestParams, GiftTransaction};
pub use secrets::{DistributionRecord, SecretsBundle, SecretsPipeline};
