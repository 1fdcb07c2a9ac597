//! Agent-facing replies: natural-language text plus a structured payload.

use alloy::primitives::utils::format_ether;
use serde::Serialize;

use crate::gift::types::{GiftError, GiftRequestParams, GiftTransaction};

/// What the agent says back to the end user.
#[derive(Debug, Clone, Serialize)]
pub struct GiftReply {
    pub text: String,
    pub content: ReplyContent,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReplyContent {
    Success {
        success: bool,
        hash: String,
        amount: String,
        recipient: String,
        chain: String,
    },
    Failure {
        error: String,
    },
}

/// Build the success reply for a submitted gift request.
pub fn success_reply(
    params: &GiftRequestParams,
    transaction: &GiftTransaction,
    chain: &str,
) -> GiftReply {
    GiftReply {
        text: format!(
            "Gift request successful! Code: {}, Address: {}\nTransaction Hash: {}",
            params.code, params.address, transaction.hash
        ),
        content: ReplyContent::Success {
            success: true,
            hash: transaction.hash.to_string(),
            amount: format_ether(transaction.value),
            recipient: transaction.to.to_string(),
            chain: chain.to_string(),
        },
    }
}

/// Build the failure reply. The text carries the classified human-readable
/// message, never the raw transport error.
pub fn failure_reply(error: &GiftError) -> GiftReply {
    tracing::error!(error = %error, "Gift request failed");
    GiftReply {
        text: format!("Gift request failed: {}", error),
        content: ReplyContent::Failure {
            error: error.to_string(),
        },
    }
}
