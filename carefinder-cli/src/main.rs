//! carefinder CLI - Command-line interface
//!
//! This binary provides a command-line interface to the carefinder library.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::search::SearchArgs;

#[derive(Parser)]
#[command(name = "carefinder")]
#[command(version = carefinder::VERSION)]
#[command(about = "Find nearby hospitals and clinics, ranked for pediatric care", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find and rank facilities near a point
    Search(SearchArgs),

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file (default: ~/.carefinder/config.ini)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args).await,
        Commands::InitConfig { path, force } => commands::init::run(path, force),
    };

    if let Err(e) = result {
        e.exit();
    }
}
