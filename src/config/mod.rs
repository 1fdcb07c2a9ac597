//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! environment variables
//!     → loader.rs (exhaustive read; all missing vars reported together)
//!     → schema.rs (typed settings; sentinels for unset deployment constants)
//!     → validation.rs (sentinel checks, immediately before first use)
//!     → immutable config values handed to the components
//! ```
//!
//! # Design Decisions
//! - Configs are immutable value objects once loaded
//! - Deployment constants (contract address, slot, version, subscription)
//!   are data, never call-site literals
//! - Validation is a pure function and names the offending field

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_agent_settings, load_secrets_settings, ConfigError};
pub use schema::{
    AgentSettings, GiftContractConfig, SecretsDeploySettings, SecretsReference, UNCONFIGURED_SLOT,
    UNCONFIGURED_U64,
};
pub use validation::{validate_contract_config, ValidationError};
