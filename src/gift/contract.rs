//! Consumer-contract call encoding.
//!
//! The contract interface changed between deployments: DON-hosted secrets
//! take a slot/version pair, URL-reference deployments take the encrypted
//! URLs as bytes. Both shapes live behind the same configuration type and
//! are selected by matching the secrets reference.

use alloy::primitives::{Address, Bytes};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::config::{GiftContractConfig, SecretsReference};

sol! {
    /// `sendRequest` shape for DON-hosted secrets deployments.
    interface GetGiftDonHosted {
        function sendRequest(
            uint8 donHostedSecretsSlotID,
            uint64 donHostedSecretsVersion,
            string[] args,
            uint64 subscriptionId,
            address receiver
        ) external returns (bytes32 requestId);
    }

    /// `sendRequest` shape for encrypted-URL deployments.
    interface GetGiftUrlReference {
        function sendRequest(
            bytes encryptedSecretsUrls,
            string[] args,
            uint64 subscriptionId,
            address receiver
        ) external returns (bytes32 requestId);
    }
}

/// Encode the call arguments in their fixed order: secrets reference,
/// `[code]`, subscription id, recipient.
pub fn encode_send_request(
    config: &GiftContractConfig,
    code: &str,
    recipient: Address,
) -> Bytes {
    let args = vec![code.to_string()];
    match &config.secrets {
        SecretsReference::DonHosted { slot_id, version } => GetGiftDonHosted::sendRequestCall {
            donHostedSecretsSlotID: *slot_id,
            donHostedSecretsVersion: *version,
            args,
            subscriptionId: config.subscription_id,
            receiver: recipient,
        }
        .abi_encode()
        .into(),
        SecretsReference::EncryptedUrls(urls) => GetGiftUrlReference::sendRequestCall {
            encryptedSecretsUrls: urls.clone().into(),
            args,
            subscriptionId: config.subscription_id,
            receiver: recipient,
        }
        .abi_encode()
        .into(),
    }
}
