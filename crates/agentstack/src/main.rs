//! AgentStack CLI - scaffold and manage AI agent projects
//!
//! This is the main entry point for the agentstack command-line interface.

mod cli;
mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let path = cli.path.as_path();

    // Run command
    match cli.command {
        Commands::Init(args) => commands::init::run(args, path).await,
        Commands::Install => commands::install::run(path).await,
        Commands::Add(args) => commands::deps::add(path, &args.package).await,
        Commands::Remove(args) => commands::deps::remove(path, &args.package).await,
        Commands::Upgrade(args) => commands::deps::upgrade(path, &args.package).await,
        Commands::Model(args) => commands::model::run(path, args),
        Commands::Undo => commands::undo::run(path).await,
        Commands::Templates => commands::templates::run(),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
