//! Contract configuration validation.
//!
//! # Responsibilities
//! - Reject configurations carrying any "unconfigured" sentinel before a
//!   transaction is ever built
//! - Name the offending field (fail-fast: first failure wins)
//!
//! # Design Decisions
//! - Pure function: GiftContractConfig → Result<(), ValidationError>
//! - Runs once, immediately before first use; configs are immutable values

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::{GiftContractConfig, SecretsReference, UNCONFIGURED_SLOT, UNCONFIGURED_U64};

/// A configuration field held its unconfigured sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} is not configured")]
pub struct ValidationError {
    pub field: &'static str,
}

/// Validate a contract configuration for use, naming the first field that
/// still holds its sentinel.
pub fn validate_contract_config(config: &GiftContractConfig) -> Result<(), ValidationError> {
    if config.contract_address == Address::ZERO {
        return Err(ValidationError {
            field: "contract address",
        });
    }

    match &config.secrets {
        SecretsReference::DonHosted { slot_id, version } => {
            if *slot_id == UNCONFIGURED_SLOT {
                return Err(ValidationError {
                    field: "DON hosted secrets slot ID",
                });
            }
            if *version == UNCONFIGURED_U64 || *version == 0 {
                return Err(ValidationError {
                    field: "DON hosted secrets version",
                });
            }
        }
        SecretsReference::EncryptedUrls(bytes) => {
            if bytes.is_empty() {
                return Err(ValidationError {
                    field: "encrypted secrets URLs",
                });
            }
        }
    }

    if config.subscription_id == UNCONFIGURED_U64 || config.subscription_id == 0 {
        return Err(ValidationError {
            field: "subscription ID",
        });
    }

    Ok(())
}
