//! Signer-bound secrets encryption.
//!
//! The AES-256-GCM key is derived from the signer's key bytes and the target
//! DON id, so the same plaintext encrypted for a different signer/DON pair
//! yields a ciphertext that is meaningless to the other network.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::chain::Wallet;
use crate::secrets::bundle::{EncryptedSecrets, SecretsBundle};
use crate::secrets::SecretsError;

/// Cipher bound to one signer identity and one DON.
pub struct SecretsCipher {
    key: [u8; 32],
    don_id: String,
}

impl SecretsCipher {
    /// Derive the cipher for a signer/DON pair.
    pub fn new(wallet: &Wallet, don_id: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(wallet.key_bytes());
        hasher.update(don_id.as_bytes());
        Self {
            key: hasher.finalize().into(),
            don_id: don_id.to_string(),
        }
    }

    /// Encrypt a secrets bundle.
    pub fn encrypt_bundle(&self, bundle: &SecretsBundle) -> Result<EncryptedSecrets, SecretsError> {
        let plaintext = bundle.to_json()?;
        self.seal(plaintext.as_bytes())
    }

    /// Encrypt a list of reference URLs for the indirect strategy. The
    /// resulting bytes are opaque to on-path observers and are what the
    /// contract call carries.
    pub fn encrypt_urls(&self, urls: &[String]) -> Result<Vec<u8>, SecretsError> {
        let plaintext =
            serde_json::to_string(urls).map_err(|e| SecretsError::Encrypt(e.to_string()))?;
        let sealed = self.seal(plaintext.as_bytes())?;
        let mut out = hex::decode(&sealed.nonce).map_err(|e| SecretsError::Encrypt(e.to_string()))?;
        out.extend(hex::decode(&sealed.ciphertext).map_err(|e| SecretsError::Encrypt(e.to_string()))?);
        Ok(out)
    }

    fn seal(&self, plaintext: &[u8]) -> Result<EncryptedSecrets, SecretsError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SecretsError::Encrypt(e.to_string()))?;

        let mut nonce_bytes = [0u8; 12];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| SecretsError::Encrypt(e.to_string()))?;

        Ok(EncryptedSecrets {
            don_id: self.don_id.clone(),
            nonce: hex::encode(nonce_bytes),
            ciphertext: hex::encode(ciphertext),
        })
    }
}

#[cfg(test)]
impl SecretsCipher {
    /// Test-only decryption, standing in for the DON side.
    fn open(&self, encrypted: &EncryptedSecrets) -> Result<Vec<u8>, SecretsError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SecretsError::Encrypt(e.to_string()))?;
        let nonce_bytes =
            hex::decode(&encrypted.nonce).map_err(|e| SecretsError::Encrypt(e.to_string()))?;
        let ciphertext =
            hex::decode(&encrypted.ciphertext).map_err(|e| SecretsError::Encrypt(e.to_string()))?;
        cipher
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
            .map_err(|e| SecretsError::Encrypt(e.to_string()))
    }
}
