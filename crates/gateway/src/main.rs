//! Users API - HTTP server for the users resource.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::config::GatewayConfig;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(author, version, about = "CRUD HTTP API for users", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Host to bind to, overrides HOST
        #[arg(short = 'H', long)]
        host: Option<String>,
        /// Port to listen on, overrides PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check connectivity, create the users table and seed it if empty
    InitDb,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::from_filename("config.env").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GatewayConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => gateway_lib::run(config.with_bind(host, port)).await,
        Commands::InitDb => gateway_lib::prepare_database(&config.database)
            .await
            .map(|(_, report)| {
                tracing::info!(seeded = report.seeded, "Database initialized");
            }),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
