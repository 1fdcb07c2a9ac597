//! Gift request orchestration.
//!
//! # Responsibilities
//! - Validate parameters before anything touches a chain
//! - Keep the session on the configured chain
//! - Encode and submit the contract call with zero native value
//! - Classify submission failures into the stable error taxonomy

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;

use crate::chain::{ChainError, ChainRegistry};
use crate::config::{validate_contract_config, GiftContractConfig};
use crate::gift::contract::encode_send_request;
use crate::gift::types::{classify_submission_error, GiftError, GiftRequestParams, GiftTransaction};

/// A failed submission, before classification.
#[derive(Debug)]
pub enum SubmitFault {
    /// Structured session failure; bypasses message classification.
    Chain(ChainError),
    /// Raw submission error message from the transport.
    Submission(String),
}

/// Seam between the orchestrator and the write path. The production
/// implementation is [`RegistrySender`]; tests substitute counting mocks.
#[async_trait]
pub trait GiftCallSender: Send + Sync {
    /// The signing account, if one is bound.
    fn account(&self) -> Option<Address>;

    /// Submit a zero-value contract call on the named chain and return the
    /// transaction hash. Awaited to completion; no fire-and-forget.
    async fn submit(
        &mut self,
        chain_name: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, SubmitFault>;
}

/// Production sender backed by the chain registry: switches the session to
/// the requested chain, builds the signer-bound write client, submits.
pub struct RegistrySender<'a> {
    registry: &'a mut ChainRegistry,
}

impl<'a> RegistrySender<'a> {
    pub fn new(registry: &'a mut ChainRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl GiftCallSender for RegistrySender<'_> {
    fn account(&self) -> Option<Address> {
        Some(self.registry.wallet_address())
    }

    async fn submit(
        &mut self,
        chain_name: &str,
        to: Address,
        calldata: Bytes,
    ) -> Result<TxHash, SubmitFault> {
        if self.registry.active_chain().name != chain_name {
            self.registry
                .switch_active(chain_name, None)
                .map_err(SubmitFault::Chain)?;
        }

        let client = self
            .registry
            .write_client(chain_name)
            .map_err(SubmitFault::Chain)?;

        let tx = TransactionRequest::default()
            .with_from(self.registry.wallet_address())
            .with_to(to)
            .with_value(U256::ZERO)
            .with_input(calldata);

        let pending = client
            .send_transaction(tx)
            .await
            .map_err(|e| SubmitFault::Submission(e.to_string()))?;

        Ok(*pending.tx_hash())
    }
}

/// Orchestrates one gift-request dispatch against a validated configuration.
#[derive(Debug)]
pub struct GiftOrchestrator<S: GiftCallSender> {
    config: GiftContractConfig,
    sender: S,
}

impl<S: GiftCallSender> GiftOrchestrator<S> {
    /// Validate the configuration once; the instance is immutable
    /// afterwards and needs no re-validation.
    pub fn new(config: GiftContractConfig, sender: S) -> Result<Self, GiftError> {
        validate_contract_config(&config)?;
        Ok(Self { config, sender })
    }

    pub fn config(&self) -> &GiftContractConfig {
        &self.config
    }

    /// Process a gift request: validate, encode, submit, classify.
    pub async fn dispatch(
        &mut self,
        params: &GiftRequestParams,
    ) -> Result<GiftTransaction, GiftError> {
        params.validate()?;
        tracing::info!(code = %params.code, address = %params.address, "Processing gift request");

        let from = self.sender.account().ok_or(ChainError::NoSigningAccount)?;
        let recipient = params.recipient()?;
        let calldata = encode_send_request(&self.config, &params.code, recipient);

        match self
            .sender
            .submit(
                &self.config.chain_name,
                self.config.contract_address,
                calldata,
            )
            .await
        {
            Ok(hash) => {
                tracing::info!(hash = %hash, chain = %self.config.chain_name, "Gift request submitted");
                Ok(GiftTransaction {
                    hash,
                    from,
                    to: self.config.contract_address,
                    value: U256::ZERO,
                    data: Bytes::new(),
                })
            }
            Err(SubmitFault::Chain(e)) => Err(GiftError::Chain(e)),
            Err(SubmitFault::Submission(message)) => Err(classify_submission_error(&message)),
        }
    }
}
