//! CryptoPulse terminal client
//!
//! Renders the dashboard, records votes, and drives login and onboarding
//! against the configured backend.

mod commands;
mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_core::session::FileTokenStore;
use pulse_core::{InvestorType, PulseConfig, Section, Session, Vote};
use pulse_runtime::{ApiClient, Clients};

const DEFAULT_TOKEN_FILE: &str = ".pulse-token";

#[derive(Parser, Debug)]
#[command(name = "pulse", author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch prices, news and the daily insight
    Dashboard,

    /// Log in and keep the token for later commands
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored token
    Logout,

    /// Thumbs up or down on a dashboard section
    Vote {
        /// news, prices, ai or meme
        section: Section,

        /// up or down
        vote: Vote,
    },

    /// Answer the onboarding questions and save them
    Onboard {
        /// Asset of interest (repeatable), e.g. "Bitcoin (BTC)" or bitcoin
        #[arg(long = "asset")]
        assets: Vec<String>,

        /// hodler, trader or nft
        #[arg(long)]
        investor: InvestorType,

        /// Preferred content type (repeatable), e.g. "Market News"
        #[arg(long = "content")]
        content: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Feed credentials are only checked for the dashboard
    let config = PulseConfig::backend_from_env().context("invalid configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    let token_file = std::env::var("PULSE_TOKEN_FILE").unwrap_or_else(|_| DEFAULT_TOKEN_FILE.into());
    let session = Arc::new(
        Session::with_store(Arc::new(FileTokenStore::new(&token_file)))
            .with_context(|| format!("failed to read token file {token_file}"))?,
    );
    let api = || ApiClient::from_config(&config, session.clone()).map(Arc::new);

    match cli.command {
        Command::Dashboard => {
            let clients = Clients::from_config(&config, session.clone()).context("invalid configuration")?;
            commands::dashboard(&clients, &config).await
        }
        Command::Login { email, password } => commands::login(&api()?, &email, &password).await,
        Command::Logout => commands::logout(&api()?),
        Command::Vote { section, vote } => commands::vote(&api()?, section, vote).await,
        Command::Onboard {
            assets,
            investor,
            content,
        } => commands::onboard(&*api()?, &assets, investor, &content).await,
    }
}
