//! Durable distribution records.
//!
//! The persisted JSON uses string-encoded fields and the exact key names the
//! deployment tooling expects, so the file can be consumed by scripts as
//! well as by this process.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, SystemTime};

use crate::secrets::SecretsError;

/// The durable artifact of one secrets distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistributionRecord {
    /// Direct DON upload: addressable slot plus monotonically increasing
    /// version.
    DonHosted {
        #[serde(rename = "donHostedSecretsVersion")]
        version: String,
        #[serde(rename = "slotId")]
        slot_id: String,
        #[serde(rename = "expirationTimeMinutes")]
        expiration_minutes: String,
    },
    /// Indirect strategy: encrypted reference URL, hex-encoded.
    UrlReference {
        #[serde(rename = "encryptedSecretsUrls")]
        encrypted_urls: String,
    },
}

impl DistributionRecord {
    pub fn don_hosted(version: u64, slot_id: u8, expiration_minutes: u64) -> Self {
        Self::DonHosted {
            version: version.to_string(),
            slot_id: slot_id.to_string(),
            expiration_minutes: expiration_minutes.to_string(),
        }
    }

    pub fn url_reference(encrypted_urls: &[u8]) -> Self {
        Self::UrlReference {
            encrypted_urls: format!("0x{}", hex::encode(encrypted_urls)),
        }
    }

    /// Persist the record wholesale.
    pub fn save(&self, path: &Path) -> Result<(), SecretsError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| SecretsError::Record(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| SecretsError::Record(e.to_string()))
    }

    /// Load a previously persisted record. `Ok(None)` when no file exists.
    pub fn load(path: &Path) -> Result<Option<Self>, SecretsError> {
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path).map_err(|e| SecretsError::Record(e.to_string()))?;
        let record = serde_json::from_str(&raw).map_err(|e| SecretsError::Record(e.to_string()))?;
        Ok(Some(record))
    }

    /// Load the record only if it is still usable.
    ///
    /// Direct-upload records expire `expirationTimeMinutes` after they were
    /// written (judged from the file's modification time); URL references do
    /// not expire. Any read or parse problem is treated as "no record".
    pub fn load_fresh(path: &Path) -> Option<Self> {
        let record = Self::load(path).ok().flatten()?;
        match &record {
            Self::UrlReference { .. } => Some(record),
            Self::DonHosted {
                expiration_minutes, ..
            } => {
                let minutes: u64 = expiration_minutes.parse().ok()?;
                let written = std::fs::metadata(path).ok()?.modified().ok()?;
                let age = SystemTime::now().duration_since(written).ok()?;
                if age < Duration::from_secs(minutes * 60) {
                    Some(record)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn don_hosted_record_uses_string_fields() {
        let record = DistributionRecord::don_hosted(7, 0, 1440);
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["donHostedSecretsVersion"], "7");
        assert_eq!(json["slotId"], "0");
        assert_eq!(json["expirationTimeMinutes"], "1440");
    }

    #[test]
    fn save_load_round_trip() {
        let path = PathBuf::from("test_record_round_trip.json");
        let record = DistributionRecord::don_hosted(12, 3, 60);
        record.save(&path).unwrap();

        let loaded = DistributionRecord::load(&path).unwrap().unwrap();
        assert_eq!(loaded, record);

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn missing_file_is_none() {
        assert!(DistributionRecord::load(Path::new("does_not_exist.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn fresh_record_is_reusable() {
        let path = PathBuf::from("test_record_fresh.json");
        DistributionRecord::don_hosted(7, 0, 1440)
            .save(&path)
            .unwrap();

        // Just written: well inside its 1440 minute lifetime.
        assert!(DistributionRecord::load_fresh(&path).is_some());

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn zero_expiration_record_is_never_fresh() {
        let path = PathBuf::from("test_record_expired.json");
        DistributionRecord::don_hosted(7, 0, 0).save(&path).unwrap();

        assert!(DistributionRecord::load_fresh(&path).is_none());

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn url_reference_round_trip() {
        let record = DistributionRecord::url_reference(&[0xaa, 0xbb]);
        let json: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(json["encryptedSecretsUrls"], "0xaabb");

        let back: DistributionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
