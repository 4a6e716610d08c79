//! CCR CLI - Command line tool for assessing crop climate risk from
//! 3-hour weather forecasts.

use clap::Parser;
use log::debug;

#[derive(Parser)]
#[command(
    name = "ccr-cli",
    version,
    about = "Crop climate risk from 5-day weather forecasts"
)]
struct Cli {
    #[command(subcommand)]
    command: ccr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may set RUST_LOG, so load it before the logger reads the environment
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }
    let cli = Cli::parse();
    ccr_cmd::run(cli.command).await
}
