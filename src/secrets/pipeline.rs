//! The distribution pipeline state machine.

use std::path::PathBuf;

use crate::secrets::bundle::SecretsBundle;
use crate::secrets::encrypt::SecretsCipher;
use crate::secrets::publish::{
    upload_to_gateways, BlobStore, GatewayUploadRequest, SecretsGateway,
};
use crate::secrets::record::DistributionRecord;
use crate::secrets::SecretsError;

/// Stages of one distribution run. `Failed` is reachable from any
/// non-terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Encrypting,
    Publishing,
    Finalizing,
    Done,
    Failed,
}

/// Options for the direct DON-upload strategy.
#[derive(Debug, Clone)]
pub struct DirectUploadOptions {
    /// The fixed list of DON gateway endpoints.
    pub gateway_urls: Vec<String>,
    /// Caller-chosen slot; stable across re-uploads, superseded per version.
    pub slot_id: u8,
    /// Gateway-held lifetime. No auto-renewal: a re-run is a distinct,
    /// externally triggered event.
    pub expiration_minutes: u64,
}

/// One secrets distribution run: encrypt, publish, persist the record.
pub struct SecretsPipeline {
    cipher: SecretsCipher,
    record_path: PathBuf,
    stage: PipelineStage,
}

impl SecretsPipeline {
    pub fn new(cipher: SecretsCipher, record_path: PathBuf) -> Self {
        Self {
            cipher,
            record_path,
            stage: PipelineStage::Idle,
        }
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Direct strategy: upload the ciphertext to the DON gateways and record
    /// the slot/version the configuration will later carry.
    pub async fn run_direct(
        &mut self,
        bundle: &SecretsBundle,
        gateway: &dyn SecretsGateway,
        options: &DirectUploadOptions,
    ) -> Result<DistributionRecord, SecretsError> {
        let result = self.direct_inner(bundle, gateway, options).await;
        if result.is_err() {
            self.enter(PipelineStage::Failed);
        }
        result
    }

    /// Direct strategy with the idempotent reuse path: a fresh persisted
    /// record short-circuits encryption and publishing entirely.
    pub async fn run_direct_or_reuse(
        &mut self,
        bundle: &SecretsBundle,
        gateway: &dyn SecretsGateway,
        options: &DirectUploadOptions,
    ) -> Result<DistributionRecord, SecretsError> {
        if let Some(record) = DistributionRecord::load_fresh(&self.record_path) {
            tracing::info!(
                path = %self.record_path.display(),
                "Reusing fresh distribution record, skipping upload"
            );
            self.enter(PipelineStage::Done);
            return Ok(record);
        }
        self.run_direct(bundle, gateway, options).await
    }

    /// Indirect strategy: store the ciphertext at a blob endpoint and record
    /// the encrypted reference URL.
    pub async fn run_indirect(
        &mut self,
        bundle: &SecretsBundle,
        store: &dyn BlobStore,
    ) -> Result<DistributionRecord, SecretsError> {
        let result = self.indirect_inner(bundle, store).await;
        if result.is_err() {
            self.enter(PipelineStage::Failed);
        }
        result
    }

    async fn direct_inner(
        &mut self,
        bundle: &SecretsBundle,
        gateway: &dyn SecretsGateway,
        options: &DirectUploadOptions,
    ) -> Result<DistributionRecord, SecretsError> {
        self.enter(PipelineStage::Encrypting);
        let encrypted = self.cipher.encrypt_bundle(bundle)?;

        self.enter(PipelineStage::Publishing);
        let request = GatewayUploadRequest {
            slot_id: options.slot_id,
            minutes_until_expiration: options.expiration_minutes,
            encrypted_secrets_hexstring: encrypted.to_hexstring(),
        };
        tracing::info!(
            slot_id = options.slot_id,
            expiration_minutes = options.expiration_minutes,
            gateways = options.gateway_urls.len(),
            "Uploading encrypted secrets to DON gateways"
        );
        let version = upload_to_gateways(gateway, &options.gateway_urls, &request).await?;

        self.enter(PipelineStage::Finalizing);
        let record =
            DistributionRecord::don_hosted(version, options.slot_id, options.expiration_minutes);
        record.save(&self.record_path)?;

        self.enter(PipelineStage::Done);
        tracing::info!(version, path = %self.record_path.display(), "Distribution record saved");
        Ok(record)
    }

    async fn indirect_inner(
        &mut self,
        bundle: &SecretsBundle,
        store: &dyn BlobStore,
    ) -> Result<DistributionRecord, SecretsError> {
        self.enter(PipelineStage::Encrypting);
        let encrypted = self.cipher.encrypt_bundle(bundle)?;

        self.enter(PipelineStage::Publishing);
        let url = store.put(&encrypted.to_json()?).await?;
        tracing::info!("Encrypted secrets stored at blob endpoint");
        let encrypted_urls = self.cipher.encrypt_urls(&[url])?;

        self.enter(PipelineStage::Finalizing);
        let record = DistributionRecord::url_reference(&encrypted_urls);
        record.save(&self.record_path)?;

        self.enter(PipelineStage::Done);
        tracing::info!(path = %self.record_path.display(), "Distribution record saved");
        Ok(record)
    }

    fn enter(&mut self, stage: PipelineStage) {
        tracing::debug!(from = ?self.stage, to = ?stage, "Pipeline stage transition");
        self.stage = stage;
    }
}
