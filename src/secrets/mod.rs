//! Secrets distribution to the decentralized oracle network (DON).
//!
//! # Data Flow
//! ```text
//! SecretsBundle (plaintext, never persisted or logged)
//!     → encrypt.rs (signer + DON id bound AES-256-GCM)
//!     → publish.rs
//!         direct: ciphertext → DON gateways (slot id + expiration, version out)
//!         indirect: ciphertext JSON → blob store → reference URL → encrypted URL
//!     → record.rs (durable DistributionRecord for idempotent reuse)
//! ```
//!
//! # Design Decisions
//! - No internal retries: publishing failures surface as PublishFailed and
//!   the pipeline is restart-safe from the encryption step
//! - The persisted record is the idempotency boundary; a fresh record is
//!   consumed instead of re-running encryption and publishing

pub mod bundle;
pub mod encrypt;
pub mod pipeline;
pub mod publish;
pub mod record;

pub use bundle::{EncryptedSecrets, SecretsBundle};
pub use encrypt::SecretsCipher;
pub use pipeline::{DirectUploadOptions, PipelineStage, SecretsPipeline};
pub use publish::{BlobStore, GatewayAck, GatewayUploadRequest, GistStore, HttpGateway, SecretsGateway};
pub use record::DistributionRecord;

use thiserror::Error;

/// Errors from the secrets distribution pipeline.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Encrypting the bundle or the reference URLs failed.
    #[error("secrets encryption failed: {0}")]
    Encrypt(String),

    /// A gateway or blob store rejected the publish, including negative
    /// acknowledgements on an otherwise successful HTTP exchange.
    #[error("secrets publish failed: {0}")]
    PublishFailed(String),

    /// The durable distribution record could not be written or read.
    #[error("distribution record error: {0}")]
    Record(String),
}
