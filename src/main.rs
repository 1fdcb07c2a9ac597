//! gift-agent CLI.
//!
//! Three entry points over the library:
//! - `send` dispatches a gift-request transaction
//! - `upload-secrets` runs the secrets-distribution pipeline
//! - `balance` shows the session wallet on the active chain

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gift_agent::chain::ChainRegistry;
use gift_agent::config::{load_agent_settings, load_secrets_settings};
use gift_agent::gift::{failure_reply, success_reply, GiftOrchestrator, GiftRequestParams, RegistrySender};
use gift_agent::secrets::{DirectUploadOptions, GistStore, HttpGateway, SecretsCipher, SecretsPipeline};

#[derive(Parser)]
#[command(name = "gift-agent", version, about = "Gift redemption agent backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch a gift request to the consumer contract.
    Send {
        /// Gift code or id.
        #[arg(long)]
        code: String,
        /// Recipient address (0x-prefixed).
        #[arg(long)]
        address: String,
        /// Chain to submit on; overrides the configured chain name.
        #[arg(long)]
        chain: Option<String>,
    },
    /// Encrypt the secrets payload and distribute it for the DON.
    UploadSecrets {
        #[arg(long, value_enum, default_value_t = UploadMode::Don)]
        mode: UploadMode,
        /// DON storage slot (direct mode).
        #[arg(long, default_value_t = 0)]
        slot_id: u8,
        /// Gateway-held lifetime in minutes (direct mode).
        #[arg(long, default_value_t = 1440)]
        expiration_minutes: u64,
    },
    /// Show the session wallet address and native balance.
    Balance {
        /// Chain to query; defaults to the active chain.
        #[arg(long)]
        chain: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum UploadMode {
    /// Upload ciphertext directly to the DON gateways.
    Don,
    /// Store ciphertext at a blob endpoint and encrypt the reference URL.
    Gist,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gift_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Send {
            code,
            address,
            chain,
        } => send(code, address, chain).await,
        Command::UploadSecrets {
            mode,
            slot_id,
            expiration_minutes,
        } => upload_secrets(mode, slot_id, expiration_minutes).await,
        Command::Balance { chain } => balance(chain).await,
    }
}

async fn send(
    code: String,
    address: String,
    chain: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = load_agent_settings()?;
    if let Some(chain) = chain {
        settings.contract.chain_name = chain;
    }
    let mut registry = ChainRegistry::new(settings.wallet, settings.chains, settings.cache_path);

    let chain_name = settings.contract.chain_name.clone();
    let mut orchestrator =
        GiftOrchestrator::new(settings.contract, RegistrySender::new(&mut registry))?;

    let params = GiftRequestParams::new(code, address);
    let reply = match orchestrator.dispatch(&params).await {
        Ok(transaction) => success_reply(&params, &transaction, &chain_name),
        Err(error) => {
            let reply = failure_reply(&error);
            println!("{}", reply.text);
            println!("{}", serde_json::to_string_pretty(&reply.content)?);
            std::process::exit(1);
        }
    };

    println!("{}", reply.text);
    println!("{}", serde_json::to_string_pretty(&reply.content)?);
    Ok(())
}

async fn upload_secrets(
    mode: UploadMode,
    slot_id: u8,
    expiration_minutes: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_secrets_settings(mode == UploadMode::Gist)?;
    let cipher = SecretsCipher::new(&settings.wallet, &settings.don_id);
    let mut pipeline = SecretsPipeline::new(cipher, settings.record_path.clone());

    let record = match mode {
        UploadMode::Don => {
            let gateway = HttpGateway::new();
            let options = DirectUploadOptions {
                gateway_urls: settings.gateway_urls.clone(),
                slot_id,
                expiration_minutes,
            };
            pipeline
                .run_direct_or_reuse(&settings.bundle, &gateway, &options)
                .await?
        }
        UploadMode::Gist => {
            let token = settings
                .github_token
                .clone()
                .ok_or("GITHUB_API_TOKEN is required for gist mode")?;
            let store = GistStore::new(token);
            pipeline.run_indirect(&settings.bundle, &store).await?
        }
    };

    println!(
        "Distribution record written to {}:\n{}",
        settings.record_path.display(),
        serde_json::to_string_pretty(&record)?
    );
    Ok(())
}

async fn balance(chain: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_agent_settings()?;
    let mut registry = ChainRegistry::new(settings.wallet, settings.chains, settings.cache_path);

    if let Some(name) = chain {
        registry.switch_active(&name, None)?;
    }

    println!("{}", registry.describe().await);
    Ok(())
}
