//! Spindle gateway binary

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use spindle_gateway::profiles::{InMemoryProfileStore, ProfileSeed};
use spindle_gateway::server::{start_gateway, BindMode, GatewayConfig};
use spindle_gateway::turn::AppContext;
use spindle_gateway::OrchestratorFactory;
use spindle_graph::default_registry;
use spindle_llm::{OpenAiClient, OpenAiConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spindle", about = "Spindle chat-turn orchestration gateway")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        #[arg(short, long, default_value = "8075")]
        port: u16,
        #[arg(short, long, default_value = "loopback")]
        bind: String,
        /// OpenAI-compatible endpoint for outbound model calls
        #[arg(long, default_value = "http://127.0.0.1:8000/v1")]
        base_url: String,
        /// JSON file with graph and model profiles to load at startup
        #[arg(long)]
        profiles: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            bind,
            base_url,
            profiles,
        } => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "spindle=info,tower_http=info".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            let bind_mode = match bind.as_str() {
                "lan" | "0.0.0.0" => BindMode::Lan,
                _ => BindMode::Loopback,
            };

            let store = match profiles {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading profile seed {}", path.display()))?;
                    let seed: ProfileSeed = serde_json::from_str(&raw)
                        .with_context(|| format!("parsing profile seed {}", path.display()))?;
                    InMemoryProfileStore::from_seed(seed)
                }
                None => InMemoryProfileStore::new(),
            };

            let client = OpenAiClient::new(OpenAiConfig {
                base_url,
                api_key: std::env::var("SPINDLE_API_KEY").ok(),
                ..Default::default()
            });

            let context = AppContext {
                profiles: Arc::new(store),
                registry: default_registry(),
                factory: OrchestratorFactory::new(Arc::new(client)),
            };

            start_gateway(
                GatewayConfig {
                    port,
                    bind: bind_mode,
                },
                context,
            )
            .await?;
        }

        Commands::Version => {
            println!("spindle v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
