//! Shopfront CLI - browse the catalog and drive a shop session from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List sale items under 500
//! shop-cli products --max-price 500 --sale
//!
//! # Best sellers
//! shop-cli most-bought
//!
//! # Interactive session (default)
//! shop-cli --api-url http://127.0.0.1:8000/api shell
//! ```
//!
//! # Commands
//!
//! - `products` - List products matching the given filters
//! - `most-bought` - List the best-selling products
//! - `shell` - Read session commands from stdin, one per line

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_client::{ClientConfig, Shop, telemetry};

mod commands;

use commands::{CliError, FilterArgs};

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Shopfront command-line client")]
struct Cli {
    /// Base URL of the shop API
    #[arg(long, global = true, env = "SHOPFRONT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List products matching the given filters
    Products(FilterArgs),
    /// List the best-selling products
    MostBought,
    /// Interactive session reading commands from stdin
    Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            commands::render::print_error(&format!("Invalid configuration: {e}"));
            std::process::exit(2);
        }
    };

    let _sentry = telemetry::init(&config.telemetry);

    if let Err(e) = run(cli.command.unwrap_or(Commands::Shell), &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn load_config(api_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_env()?;
    match api_url {
        Some(url) => Ok(config.with_api_url(url)?),
        None => Ok(config),
    }
}

async fn run(command: Commands, config: &ClientConfig) -> Result<(), CliError> {
    let mut shop = Shop::new(config)?;

    match command {
        Commands::Products(filters) => commands::catalog::products(&shop, filters).await?,
        Commands::MostBought => commands::catalog::most_bought(&shop).await?,
        Commands::Shell => commands::shell::run(&mut shop).await?,
    }
    Ok(())
}
