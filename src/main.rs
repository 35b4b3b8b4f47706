//! `x-ui` control plane binary.
//!
//! - `x-ui run` - bootstrap, then reconcile proxy traffic until stopped (default)
//! - `x-ui init` - bootstrap the install directory and store, then exit
//! - `x-ui paths` - print the resolved configuration

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use xui::cli::RunArgs;

/// x-ui control plane.
#[derive(Parser)]
#[command(
    name = "x-ui",
    version,
    about = "Proxy control plane runtime",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Bootstrap and run the traffic scheduler.
    #[command(name = "run", alias = "serve")]
    Run(RunArgs),

    /// Create the install directory, default config and database.
    #[command(name = "init")]
    Init,

    /// Print resolved configuration and paths.
    #[command(name = "paths")]
    Paths,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => xui::cli::run(args).await,
        Commands::Init => xui::cli::init().await,
        Commands::Paths => xui::cli::paths(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
