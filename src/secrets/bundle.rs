//! Secret payloads and their encrypted form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::secrets::SecretsError;

/// A mapping of secret names to plaintext values.
///
/// Never persisted in plaintext and never logged; `Debug` redacts the
/// contents.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct SecretsBundle(BTreeMap<String, String>);

impl SecretsBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Plaintext JSON form, used only as cipher input.
    pub(crate) fn to_json(&self) -> Result<String, SecretsError> {
        serde_json::to_string(&self.0).map_err(|e| SecretsError::Encrypt(e.to_string()))
    }
}

impl std::fmt::Debug for SecretsBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretsBundle({} entries, redacted)", self.0.len())
    }
}

/// Ciphertext plus the metadata the DON needs to locate and decrypt it.
///
/// A value type: produced once per bundle and signer identity, never
/// partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecrets {
    /// The DON the ciphertext is bound to.
    pub don_id: String,
    /// Hex-encoded 96-bit nonce.
    pub nonce: String,
    /// Hex-encoded AES-256-GCM ciphertext.
    pub ciphertext: String,
}

impl EncryptedSecrets {
    /// Wire form for gateway upload: `0x` followed by nonce and ciphertext.
    pub fn to_hexstring(&self) -> String {
        format!("0x{}{}", self.nonce, self.ciphertext)
    }

    /// JSON form stored at the blob endpoint for the indirect strategy.
    pub fn to_json(&self) -> Result<String, SecretsError> {
        serde_json::to_string(self).map_err(|e| SecretsError::Encrypt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_values() {
        let bundle = SecretsBundle::new().with_secret("apikey", "super-secret");
        let debug = format!("{:?}", bundle);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("1 entries"));
    }

    #[test]
    fn hexstring_concatenates_nonce_and_ciphertext() {
        let enc = EncryptedSecrets {
            don_id: "fun-ethereum-sepolia-1".into(),
            nonce: "aabb".into(),
            ciphertext: "ccdd".into(),
        };
        assert_eq!(enc.to_hexstring(), "0xaabbccdd");
    }
}
