//! The environment-variable loading boundary.
//!
//! # Design Decisions
//! - One place reads the environment; components receive values, not var names
//! - Missing required variables are collected and reported together, not
//!   one at a time
//! - Optional deployment constants default to their sentinel; the validator
//!   rejects them before first use

use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::chain::{catalog, ChainDefinition, Wallet};
use crate::config::schema::{
    AgentSettings, GiftContractConfig, SecretsDeploySettings, SecretsReference, UNCONFIGURED_U64,
};
use crate::secrets::SecretsBundle;

/// Sepolia testnet defaults. These are public, deployment-independent
/// endpoints; everything deployment-specific comes from the environment.
const DEFAULT_DON_ID: &str = "fun-ethereum-sepolia-1";
const DEFAULT_GATEWAY_URLS: &[&str] = &[
    "https://01.functions-gateway.testnet.chain.link/",
    "https://02.functions-gateway.testnet.chain.link/",
];
const DEFAULT_RECORD_PATH: &str = "donSecretsInfo.txt";
const DEFAULT_CACHE_PATH: &str = "wallet_cache.json";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn require(missing: &mut Vec<String>, var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            missing.push(var.to_string());
            None
        }
    }
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
            var: var.to_string(),
            reason: format!("{}", e),
        }),
        None => Ok(default),
    }
}

/// Load settings for gift dispatch and balance queries.
pub fn load_agent_settings() -> Result<AgentSettings, ConfigError> {
    let mut missing = Vec::new();
    let private_key = require(&mut missing, "EVM_PRIVATE_KEY");
    let sepolia_rpc = require(&mut missing, "SEPOLIA_RPC_URL");
    let (Some(private_key), Some(sepolia_rpc)) = (private_key, sepolia_rpc) else {
        return Err(ConfigError::MissingEnv(missing));
    };

    let wallet = Wallet::from_private_key(&private_key).map_err(|e| ConfigError::Invalid {
        var: "EVM_PRIVATE_KEY".to_string(),
        reason: e.to_string(),
    })?;

    Ok(AgentSettings {
        wallet,
        chains: chain_definitions(&sepolia_rpc),
        contract: load_contract_config()?,
        cache_path: Some(PathBuf::from(
            optional("WALLET_CACHE_PATH").unwrap_or_else(|| DEFAULT_CACHE_PATH.to_string()),
        )),
    })
}

/// Load settings for a secrets-distribution run. The blob-store token is
/// required only for the indirect (gist) strategy.
pub fn load_secrets_settings(require_blob_token: bool) -> Result<SecretsDeploySettings, ConfigError> {
    let mut missing = Vec::new();
    let private_key = require(&mut missing, "EVM_PRIVATE_KEY");
    let api_key = require(&mut missing, "SUPABASE_API_KEY");
    let github_token = if require_blob_token {
        require(&mut missing, "GITHUB_API_TOKEN")
    } else {
        optional("GITHUB_API_TOKEN")
    };
    // A missing blob token lands in `missing` without failing the tuple
    // match, so the emptiness check stays explicit.
    let (Some(private_key), Some(api_key), true) =
        (private_key, api_key, missing.is_empty())
    else {
        return Err(ConfigError::MissingEnv(missing));
    };

    let wallet = Wallet::from_private_key(&private_key).map_err(|e| ConfigError::Invalid {
        var: "EVM_PRIVATE_KEY".to_string(),
        reason: e.to_string(),
    })?;

    let gateway_urls = optional("GATEWAY_URLS")
        .map(|raw| {
            raw.split(',')
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect()
        })
        .unwrap_or_else(|| {
            DEFAULT_GATEWAY_URLS
                .iter()
                .map(|url| url.to_string())
                .collect()
        });

    Ok(SecretsDeploySettings {
        wallet,
        bundle: SecretsBundle::new().with_secret("apikey", api_key),
        don_id: optional("DON_ID").unwrap_or_else(|| DEFAULT_DON_ID.to_string()),
        gateway_urls,
        github_token,
        record_path: PathBuf::from(
            optional("DON_SECRETS_INFO_PATH").unwrap_or_else(|| DEFAULT_RECORD_PATH.to_string()),
        ),
    })
}

fn load_contract_config() -> Result<GiftContractConfig, ConfigError> {
    let contract_address = match optional("GIFT_CONTRACT_ADDRESS") {
        Some(raw) => raw.parse::<Address>().map_err(|e| ConfigError::Invalid {
            var: "GIFT_CONTRACT_ADDRESS".to_string(),
            reason: format!("{}", e),
        })?,
        // Zero-address sentinel; the validator rejects it before use.
        None => Address::ZERO,
    };

    let secrets = match optional("ENCRYPTED_SECRETS_URLS") {
        Some(raw) => {
            let bytes =
                hex::decode(raw.trim_start_matches("0x")).map_err(|e| ConfigError::Invalid {
                    var: "ENCRYPTED_SECRETS_URLS".to_string(),
                    reason: format!("{}", e),
                })?;
            SecretsReference::EncryptedUrls(bytes)
        }
        None => SecretsReference::DonHosted {
            slot_id: parse_or("DON_HOSTED_SECRETS_SLOT_ID", 0u8)?,
            version: parse_or("DON_HOSTED_SECRETS_VERSION", UNCONFIGURED_U64)?,
        },
    };

    Ok(GiftContractConfig {
        contract_address,
        secrets,
        subscription_id: parse_or("SUBSCRIPTION_ID", UNCONFIGURED_U64)?,
        chain_name: optional("GIFT_CHAIN_NAME").unwrap_or_else(|| "sepolia".to_string()),
    })
}

fn chain_definitions(sepolia_rpc: &str) -> Vec<ChainDefinition> {
    let mut chains = vec![catalog::definition("sepolia")
        .expect("sepolia is in the catalog")
        .with_custom_rpc(sepolia_rpc)];

    for name in catalog::names() {
        if name == "sepolia" {
            continue;
        }
        let var = format!("{}_RPC_URL", name.to_uppercase());
        if let Some(url) = optional(&var) {
            if let Some(def) = catalog::definition(name) {
                chains.push(def.with_custom_rpc(url));
            }
        }
    }
    chains
}
