mod api;
mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::classify::ClassifyCommandArgs;
use crate::config::{AppConfig, parse_bind_addr};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::openai::OpenAiClient;
use crate::services::CompletionService;

#[derive(Parser)]
#[command(name = "triage", author, version, about = "Support-ticket classification service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST /classify-ticket/ over HTTP.
    Serve(ServeArgs),
    /// Classify a single ticket and print the result as JSON.
    Classify(ClassifyArgs),
    /// Show the effective configuration (secrets masked).
    Config,
}

#[derive(Args)]
struct ServeArgs {
    /// Override TRIAGE_BIND_ADDR.
    #[arg(short, long)]
    bind: Option<String>,
    /// Override OPENAI_MODEL.
    #[arg(short, long)]
    model: Option<String>,
}

#[derive(Args)]
struct ClassifyArgs {
    /// Ticket text. Read from stdin when omitted.
    ticket_text: Option<String>,
    /// Override OPENAI_MODEL.
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("triage=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<bool> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config => {
            cmd::config::run()?;
            Ok(true)
        }
        Commands::Serve(args) => {
            let mut config = AppConfig::load()?;
            if let Some(bind) = args.bind {
                config.bind_addr = parse_bind_addr(&bind)?;
            }
            if let Some(model) = args.model {
                config.openai_model = model;
            }
            cmd::serve::run(build_context(config)).await?;
            Ok(true)
        }
        Commands::Classify(args) => {
            let mut config = AppConfig::load()?;
            if let Some(model) = args.model {
                config.openai_model = model;
            }
            let ctx = build_context(config);
            cmd::classify::run(
                &ctx,
                ClassifyCommandArgs {
                    ticket_text: args.ticket_text,
                },
            )
            .await
        }
    }
}

fn build_context(config: AppConfig) -> AppContext {
    let completion: Arc<dyn CompletionService> = Arc::new(OpenAiClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    ));
    AppContext::new(config, completion)
}
