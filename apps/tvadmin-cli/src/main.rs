//! tvadmin - bulk administration for a TeamViewer company account
//!
//! - `group-sync`: put each mapped device into a personal group of its user
//!   and share that group with the user
//! - `remove-duplicates`: delete offline copies of devices that share a name

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tvadmin_cli::commands::{group_sync, remove_duplicates};
use tvadmin_cli::config::load_config;
use tvadmin_cli::error::CliResult;
use tvadmin_cli::logging::init_logging;
use tvadmin_cli::prompt::TerminalConfirm;
use tvadmin_webapi::WebApiClient;

#[derive(Parser)]
#[command(name = "tvadmin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API token (overrides TEAMVIEWER_API_TOKEN)
    #[arg(long, global = true)]
    api_token: Option<String>,

    /// API base URL (overrides TEAMVIEWER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Append JSON log events to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move mapped devices into per-user groups and share them
    GroupSync(group_sync::GroupSyncArgs),

    /// Delete stale duplicates of same-named devices
    RemoveDuplicates(remove_duplicates::RemoveDuplicatesArgs),
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let config = load_config(cli.api_token.as_deref(), cli.api_url.as_deref(), |key| {
        std::env::var(key)
    })?;
    let client = WebApiClient::new(&config)?;

    match cli.command {
        Commands::GroupSync(args) => group_sync::execute(&client, args).await,
        Commands::RemoveDuplicates(args) => {
            remove_duplicates::execute(&client, &TerminalConfirm, args).await
        }
    }
}
