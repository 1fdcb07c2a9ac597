//! Gift request types and error classification.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use thiserror::Error;

use crate::chain::ChainError;
use crate::config::ValidationError;

/// Validated user intent: a gift code and the recipient address.
///
/// Both fields are mandatory; the upstream parameter extractor's output is
/// trusted for shape but still checked for emptiness here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftRequestParams {
    /// The gift code. Numeric gift ids are carried in decimal string form.
    pub code: String,
    /// Recipient address: 42-character `0x`-prefixed hex string.
    pub address: String,
}

impl GiftRequestParams {
    pub fn new(code: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            address: address.into(),
        }
    }

    /// Reject empty or malformed parameters before anything touches a chain.
    pub fn validate(&self) -> Result<(), GiftError> {
        if self.code.trim().is_empty() {
            return Err(GiftError::InvalidParameters);
        }
        let address = self.address.trim();
        if address.len() != 42
            || !address.starts_with("0x")
            || !address[2..].chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(GiftError::InvalidParameters);
        }
        Ok(())
    }

    /// Parsed recipient address.
    pub fn recipient(&self) -> Result<Address, GiftError> {
        self.address
            .trim()
            .parse()
            .map_err(|_| GiftError::InvalidParameters)
    }
}

/// Handle for a submitted gift-request transaction.
///
/// Created only on successful submission, never mutated afterward. The call
/// moves no native currency, so `value` is always zero; `data` is a marker,
/// the structured arguments having been encoded by the contract binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftTransaction {
    pub hash: TxHash,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
}

/// Errors from gift-request dispatch.
#[derive(Debug, Error)]
pub enum GiftError {
    /// Gift code or recipient address missing/malformed.
    #[error("invalid parameters: gift code and recipient address are required")]
    InvalidParameters,

    /// A configuration field still held its unconfigured sentinel.
    #[error(transparent)]
    Config(#[from] ValidationError),

    /// Chain/session failure: unsupported or invalid chain, no signer.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The signer cannot cover gas for the submission.
    #[error("insufficient funds for the transaction")]
    InsufficientFunds,

    /// The signer refused to authorize the transaction.
    #[error("transaction was rejected by the user")]
    UserRejected,

    /// Stale or colliding nonce; rebuild and resubmit.
    #[error("transaction nonce error - please try again")]
    NonceError,

    /// Anything else, preserving the underlying message.
    #[error("gift request failed: {0}")]
    SubmissionFailed(String),
}

/// Classify an underlying submission error message, in priority order.
///
/// Substring matching is the stable strategy for this transport; structured
/// chain errors bypass this function entirely.
pub fn classify_submission_error(message: &str) -> GiftError {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return GiftError::SubmissionFailed("unknown error".to_string());
    }
    let lower = trimmed.to_lowercase();
    if lower.contains("insufficient funds") {
        GiftError::InsufficientFunds
    } else if lower.contains("user rejected") {
        GiftError::UserRejected
    } else if lower.contains("nonce") {
        GiftError::NonceError
    } else {
        GiftError::SubmissionFailed(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_ADDRESS: &str = "0x1234567890123456789012345678901234567890";

    #[test]
    fn valid_params_pass() {
        let params = GiftRequestParams::new("898770", GOOD_ADDRESS);
        assert!(params.validate().is_ok());
        assert_eq!(
            params.recipient().unwrap().to_string().to_lowercase(),
            GOOD_ADDRESS
        );
    }

    #[test]
    fn empty_code_fails() {
        let params = GiftRequestParams::new("", GOOD_ADDRESS);
        assert!(matches!(
            params.validate(),
            Err(GiftError::InvalidParameters)
        ));
    }

    #[test]
    fn malformed_address_fails() {
        for address in ["", "0x1234", "1234567890123456789012345678901234567890xx"] {
            let params = GiftRequestParams::new("898770", address);
            assert!(
                matches!(params.validate(), Err(GiftError::InvalidParameters)),
                "address {:?} should be rejected",
                address
            );
        }
    }

    #[test]
    fn classification_priority() {
        assert!(matches!(
            classify_submission_error("err: insufficient funds for gas * price + value"),
            GiftError::InsufficientFunds
        ));
        assert!(matches!(
            classify_submission_error("User rejected the request"),
            GiftError::UserRejected
        ));
        assert!(matches!(
            classify_submission_error("nonce too low"),
            GiftError::NonceError
        ));
        match classify_submission_error("execution reverted") {
            GiftError::SubmissionFailed(msg) => assert_eq!(msg, "execution reverted"),
            other => panic!("unexpected classification: {:?}", other),
        }
    }

    #[test]
    fn empty_message_maps_to_unknown() {
        match classify_submission_error("  ") {
            GiftError::SubmissionFailed(msg) => assert_eq!(msg, "unknown error"),
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
