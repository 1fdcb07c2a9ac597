//! Publishing encrypted secrets: DON gateways and the blob store.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::secrets::SecretsError;

/// Upload payload sent to each DON gateway.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayUploadRequest {
    #[serde(rename = "slotId")]
    pub slot_id: u8,
    #[serde(rename = "minutesUntilExpiration")]
    pub minutes_until_expiration: u64,
    #[serde(rename = "encryptedSecrets")]
    pub encrypted_secrets_hexstring: String,
}

/// Gateway acknowledgement. `success: false` on an HTTP-level success is
/// still a failed publish.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayAck {
    pub success: bool,
    #[serde(default)]
    pub version: String,
}

/// One DON gateway endpoint.
#[async_trait]
pub trait SecretsGateway: Send + Sync {
    async fn upload(
        &self,
        gateway_url: &str,
        request: &GatewayUploadRequest,
    ) -> Result<GatewayAck, SecretsError>;
}

/// Write-once off-chain blob endpoint for the indirect strategy.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store the content and return its public reference URL.
    async fn put(&self, content: &str) -> Result<String, SecretsError>;
}

/// HTTP gateway client.
pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretsGateway for HttpGateway {
    async fn upload(
        &self,
        gateway_url: &str,
        request: &GatewayUploadRequest,
    ) -> Result<GatewayAck, SecretsError> {
        let response = self
            .client
            .post(gateway_url)
            .json(request)
            .send()
            .await
            .map_err(|e| SecretsError::PublishFailed(format!("gateway {}: {}", gateway_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretsError::PublishFailed(format!(
                "gateway {} returned HTTP {}",
                gateway_url, status
            )));
        }

        response.json::<GatewayAck>().await.map_err(|e| {
            SecretsError::PublishFailed(format!("gateway {}: malformed ack: {}", gateway_url, e))
        })
    }
}

/// Upload to every configured gateway. All gateways must acknowledge; the
/// returned version is the highest acknowledged one.
pub async fn upload_to_gateways(
    gateway: &dyn SecretsGateway,
    gateway_urls: &[String],
    request: &GatewayUploadRequest,
) -> Result<u64, SecretsError> {
    if gateway_urls.is_empty() {
        return Err(SecretsError::PublishFailed(
            "no gateway URLs configured".to_string(),
        ));
    }

    let mut version = 0u64;
    for url in gateway_urls {
        let ack = gateway.upload(url, request).await?;
        if !ack.success {
            return Err(SecretsError::PublishFailed(format!(
                "gateway {} rejected the upload",
                url
            )));
        }
        let acked: u64 = ack.version.parse().map_err(|_| {
            SecretsError::PublishFailed(format!(
                "gateway {} acknowledged with non-numeric version '{}'",
                url, ack.version
            ))
        })?;
        tracing::debug!(gateway = %url, version = acked, "Gateway accepted encrypted secrets");
        version = version.max(acked);
    }
    Ok(version)
}

/// GitHub-gist-backed blob store.
pub struct GistStore {
    client: reqwest::Client,
    token: String,
    endpoint: String,
}

impl GistStore {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
            endpoint: "https://api.github.com/gists".to_string(),
        }
    }
}

#[async_trait]
impl BlobStore for GistStore {
    async fn put(&self, content: &str) -> Result<String, SecretsError> {
        let body = serde_json::json!({
            "description": "Encrypted secrets reference",
            "public": true,
            "files": {
                "encrypted-secrets.json": { "content": content }
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, "gift-agent")
            .json(&body)
            .send()
            .await
            .map_err(|e| SecretsError::PublishFailed(format!("blob store: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SecretsError::PublishFailed(format!(
                "blob store returned HTTP {}",
                status
            )));
        }

        let created: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SecretsError::PublishFailed(format!("blob store: {}", e)))?;
        created
            .get("html_url")
            .and_then(|url| url.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                SecretsError::PublishFailed("blob store response missing html_url".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct ScriptedGateway {
        acks: Vec<GatewayAck>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl SecretsGateway for ScriptedGateway {
        async fn upload(
            &self,
            _gateway_url: &str,
            _request: &GatewayUploadRequest,
        ) -> Result<GatewayAck, SecretsError> {
            let idx = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            Ok(self.acks[idx].clone())
        }
    }

    fn request() -> GatewayUploadRequest {
        GatewayUploadRequest {
            slot_id: 0,
            minutes_until_expiration: 1440,
            encrypted_secrets_hexstring: "0xdead".into(),
        }
    }

    #[tokio::test]
    async fn all_gateways_must_acknowledge() {
        let gateway = ScriptedGateway {
            acks: vec![
                GatewayAck {
                    success: true,
                    version: "7".into(),
                },
                GatewayAck {
                    success: false,
                    version: String::new(),
                },
            ],
            calls: AtomicU32::new(0),
        };
        let urls = vec!["https://g1.example".to_string(), "https://g2.example".to_string()];

        let err = upload_to_gateways(&gateway, &urls, &request())
            .await
            .unwrap_err();
        assert!(matches!(err, SecretsError::PublishFailed(_)));
        assert!(err.to_string().contains("rejected"));
    }

    #[tokio::test]
    async fn version_is_highest_acknowledged() {
        let gateway = ScriptedGateway {
            acks: vec![
                GatewayAck {
                    success: true,
                    version: "6".into(),
                },
                GatewayAck {
                    success: true,
                    version: "7".into(),
                },
            ],
            calls: AtomicU32::new(0),
        };
        let urls = vec!["https://g1.example".to_string(), "https://g2.example".to_string()];

        let version = upload_to_gateways(&gateway, &urls, &request()).await.unwrap();
        assert_eq!(version, 7);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_gateway_list_fails() {
        let gateway = ScriptedGateway {
            acks: vec![],
            calls: AtomicU32::new(0),
        };
        let err = upload_to_gateways(&gateway, &[], &request()).await.unwrap_err();
        assert!(err.to_string().contains("no gateway URLs"));
    }
}
