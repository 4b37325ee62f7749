//! Roster CLI - command-line interface for the contributor sync engine.

mod commands;
mod config;
mod progress;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Keep the showcase page's contributor snapshot in sync")]
#[command(
    long_about = "Roster resolves the contributors linked from a static showcase page \
against the GitHub users API and maintains their profile snapshot on disk. \
Fresh cache entries skip their fetch, failed fetches fall back to the last \
known record, and the snapshot is rewritten in a single terminal write."
)]
#[command(after_long_help = r#"EXAMPLES
    Refresh every contributor linked from index.html:
        $ roster sync

    Refresh two specific logins, ignoring cache freshness:
        $ roster sync alice bob --force

    Show what a run would change without writing the snapshot:
        $ roster sync --dry-run

    List the identities the page links to:
        $ roster extract --page index.html

CONFIGURATION
    Roster reads configuration from:
      1. ~/.config/roster/config.toml (or $XDG_CONFIG_HOME/roster/config.toml)
      2. ./roster.toml in the current directory
      3. Environment variables (ROSTER_* prefix, e.g., ROSTER_GITHUB__TOKEN)
      4. .env file in current directory
    Command-line flags override all of them.

ENVIRONMENT VARIABLES
    GITHUB_TOKEN                  API credential used when --token is not given
    ROSTER_GITHUB__TOKEN          Same credential via the config layer
    ROSTER_SYNC__SNAPSHOT_PATH    Snapshot file to read and write
    ROSTER_SYNC__PAGE_PATH        Page scanned for profile links
    RUST_LOG                      Log filter for non-interactive output
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the contributor snapshot from the directory
    Sync(commands::sync::SyncArgs),
    /// List the profile identities linked from a page
    Extract(commands::extract::ExtractArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing for non-TTY mode (structured logging)
    // Only initialize if not connected to a TTY
    if !Term::stdout().is_term() {
        let env_filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("roster=info,roster_cli=info"),
        };

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    // Load configuration (config file -> env vars -> defaults)
    let config = config::load_config();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sync(args) => commands::sync::handle_sync(args, &config).await,
        Commands::Extract(args) => commands::extract::handle_extract(args, &config),
    }
}
