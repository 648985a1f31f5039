use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::cli::ExportArgs;

/// larder - shopping lists from recipe selections
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Aggregate recipe ingredients into a shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a shopping list for a user
    Export(ExportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(
        "larder",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let result = match cli.command {
        Commands::Export(args) => larder::cli::export(config, args).await,
    };

    if let Err(err) = &result {
        tracing::error!(err = %err, "command failed");
    }

    result
}
