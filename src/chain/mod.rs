//! Multi-chain connection and session management.
//!
//! # Data Flow
//! ```text
//! Environment variables (private key, RPC overrides)
//!     → wallet.rs (key loading, signer identity)
//!     → catalog.rs (well-known chain definitions)
//!     → registry.rs (registration, active session, read/write clients)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or secret material
//! - The registry owns the key material; it is never shared across sessions

pub mod catalog;
pub mod registry;
pub mod types;
pub mod wallet;

pub use registry::ChainRegistry;
pub use types::{ChainDefinition, ChainError, ChainResult};
pub use wallet::Wallet;
