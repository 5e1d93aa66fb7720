// ABOUTME: Entry point for the keypairs CLI
// ABOUTME: Loads .env, sets up logging, and dispatches the parsed command

use anyhow::Result;
use clap::Parser;
use keypairs_cli::commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    keypairs_log::init_for("keypairs-cli");

    let cli = Cli::parse();
    keypairs_cli::run(cli).await
}
