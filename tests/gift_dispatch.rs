//! End-to-end dispatch behavior through the orchestrator seam.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, Bytes, TxHash};
use async_trait::async_trait;

use gift_agent::config::{GiftContractConfig, SecretsReference};
use gift_agent::gift::{
    failure_reply, GiftCallSender, GiftError, GiftOrchestrator, GiftRequestParams, SubmitFault,
};

const CONTRACT: &str = "0x29EeD516E36f1b71D2a176C64bA0A287e2EaA3E0";
const ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Scripted sender: returns a fixed outcome and counts submissions.
struct ScriptedSender {
    outcome: Result<TxHash, String>,
    submits: Arc<AtomicU32>,
}

#[async_trait]
impl GiftCallSender for ScriptedSender {
    fn account(&self) -> Option<Address> {
        Some(ACCOUNT.parse().unwrap())
    }

    async fn submit(
        &mut self,
        _chain_name: &str,
        _to: Address,
        _calldata: Bytes,
    ) -> Result<TxHash, SubmitFault> {
        self.submits.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(SubmitFault::Submission)
    }
}

fn config() -> GiftContractConfig {
    GiftContractConfig {
        contract_address: CONTRACT.parse().unwrap(),
        secrets: SecretsReference::DonHosted {
            slot_id: 0,
            version: 7,
        },
        subscription_id: 4734,
        chain_name: "sepolia".to_string(),
    }
}

fn orchestrator(
    outcome: Result<TxHash, String>,
) -> (GiftOrchestrator<ScriptedSender>, Arc<AtomicU32>) {
    let submits = Arc::new(AtomicU32::new(0));
    let sender = ScriptedSender {
        outcome,
        submits: submits.clone(),
    };
    (GiftOrchestrator::new(config(), sender).unwrap(), submits)
}

#[tokio::test]
async fn invalid_parameters_never_reach_the_chain() {
    let (mut orchestrator, submits) = orchestrator(Ok(TxHash::ZERO));

    let empty_code = GiftRequestParams::new("", "0x1234567890123456789012345678901234567890");
    let err = orchestrator.dispatch(&empty_code).await.unwrap_err();
    assert!(matches!(err, GiftError::InvalidParameters));

    let bad_address = GiftRequestParams::new("898770", "not-an-address");
    let err = orchestrator.dispatch(&bad_address).await.unwrap_err();
    assert!(matches!(err, GiftError::InvalidParameters));

    assert_eq!(submits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_dispatch_targets_contract_with_zero_value() {
    let hash: TxHash = "0x1111111111111111111111111111111111111111111111111111111111111111"
        .parse()
        .unwrap();
    let (mut orchestrator, submits) = orchestrator(Ok(hash));

    let params = GiftRequestParams::new("898770", "0x1234567890123456789012345678901234567890");
    let tx = orchestrator.dispatch(&params).await.unwrap();

    assert_eq!(tx.hash, hash);
    assert_eq!(tx.to, CONTRACT.parse::<Address>().unwrap());
    assert_eq!(tx.from, ACCOUNT.parse::<Address>().unwrap());
    assert!(tx.value.is_zero());
    assert_eq!(submits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn insufficient_funds_is_classified_and_reworded() {
    let raw = "err: insufficient funds for gas * price + value (supplied gas 21000)";
    let (mut orchestrator, _) = orchestrator(Err(raw.to_string()));

    let params = GiftRequestParams::new("898770", "0x1234567890123456789012345678901234567890");
    let err = orchestrator.dispatch(&params).await.unwrap_err();
    assert!(matches!(err, GiftError::InsufficientFunds));

    // The user-facing text names the problem without echoing the transport error.
    let reply = failure_reply(&err);
    assert!(reply.text.to_lowercase().contains("insufficient funds"));
    assert!(!reply.text.contains("gas * price"));
}

#[tokio::test]
async fn nonce_errors_surface_as_retryable_class() {
    let (mut orchestrator, _) = orchestrator(Err("nonce too low".to_string()));

    let params = GiftRequestParams::new("898770", "0x1234567890123456789012345678901234567890");
    let err = orchestrator.dispatch(&params).await.unwrap_err();
    assert!(matches!(err, GiftError::NonceError));
}

#[tokio::test]
async fn unrecognized_submission_errors_keep_their_message() {
    let (mut orchestrator, _) = orchestrator(Err("execution reverted: EmptyArgs".to_string()));

    let params = GiftRequestParams::new("898770", "0x1234567890123456789012345678901234567890");
    let err = orchestrator.dispatch(&params).await.unwrap_err();
    match err {
        GiftError::SubmissionFailed(message) => assert!(message.contains("EmptyArgs")),
        other => panic!("expected SubmissionFailed, got {other:?}"),
    }
}
