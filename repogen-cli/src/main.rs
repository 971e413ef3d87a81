use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::*;

#[derive(Parser)]
#[command(name = "repogen")]
#[command(about = "Generate DTO, model and repository sources from database tables")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./repogen.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a DTO from a table's columns
    Dto(dto::DtoArgs),

    /// Generate a model from DTO source
    Model(model::ModelArgs),

    /// Generate a repository stub from model source
    Repository(repository::RepositoryArgs),

    /// Generate DTO, model and repository files for a table
    All(all::AllArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dto(args) => args.execute(config).await,
        Commands::Model(args) => args.execute(config).await,
        Commands::Repository(args) => args.execute(config).await,
        Commands::All(args) => args.execute(config).await,
    }
}
