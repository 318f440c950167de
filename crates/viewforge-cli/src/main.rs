//! ViewForge command line
//!
//! `viewforge run` generates the configured views; `viewforge list-buckets`
//! prints the available source buckets as JSON for UI pickers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use viewforge_core::Config;
use viewforge_storage::HttpStorageClient;
use viewforge_warehouse::SnowflakeSession;

/// ViewForge - read-only warehouse views over storage-platform tables
#[derive(Parser)]
#[command(name = "viewforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, default_value = "viewforge.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate views for the configured buckets
    Run,

    /// List available source buckets as JSON
    ListBuckets,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let mut config = Config::from_file(&cli.config)?;
    config.apply_env_overrides();

    let storage = HttpStorageClient::new(&config.storage.url, &config.storage.token);

    match cli.command {
        Commands::Run => run_command(&config, &storage).await,
        Commands::ListBuckets => list_buckets_command(&storage).await,
    }
}

async fn run_command(config: &Config, storage: &HttpStorageClient) -> Result<()> {
    let mut session = SnowflakeSession::open(&config.warehouse, config.run_id.as_deref()).await?;
    let summary = viewforge_engine::run(storage, &mut session, config).await?;

    eprintln!(
        "{} {} views across {} schemas in {}",
        "Created".green(),
        summary.views_created,
        summary.schemas_created,
        config.destination_db
    );
    if summary.buckets_skipped > 0 || summary.tables_skipped > 0 {
        eprintln!(
            "{} {} buckets and {} tables (shared sources)",
            "Skipped".yellow(),
            summary.buckets_skipped,
            summary.tables_skipped
        );
    }
    Ok(())
}

async fn list_buckets_command(storage: &HttpStorageClient) -> Result<()> {
    let buckets = viewforge_engine::list_buckets(storage).await?;
    println!("{}", serde_json::to_string(&buckets)?);
    Ok(())
}
