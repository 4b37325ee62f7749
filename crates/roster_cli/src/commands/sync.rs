//! The `sync` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use console::{Term, style};

use roster::extract::extract_identities_from_file;
use roster::github::GitHubDirectory;
use roster::store::SnapshotStore;
use roster::sync::{SyncOptions, SyncReport, sync_contributors};

use crate::config::RosterConfig;
use crate::progress::ProgressReporter;

/// Arguments for `roster sync`.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Logins to sync; when omitted, the page is scanned for profile links
    pub identities: Vec<String>,

    /// Refetch every login even when its cached record is fresh
    #[arg(short, long)]
    pub force: bool,

    /// Compute the new snapshot without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// API credential; falls back to config, then GITHUB_TOKEN
    #[arg(long)]
    pub token: Option<String>,

    /// Snapshot file to read and write
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Page scanned for profile links
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,
}

pub async fn handle_sync(
    args: SyncArgs,
    config: &RosterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let is_tty = Term::stdout().is_term();
    let snapshot_path = args
        .snapshot
        .unwrap_or_else(|| config.sync.snapshot_path.clone());
    let page_path = args.page.unwrap_or_else(|| config.sync.page_path.clone());

    let identities = if args.identities.is_empty() {
        extract_identities_from_file(&page_path, &config.github.host)
    } else {
        args.identities
    };
    if identities.is_empty() {
        eprintln!(
            "{} no identities to sync ({} yielded no profile links and none were given)",
            style("error:").red().bold(),
            page_path.display()
        );
        return Err("empty identity set".into());
    }

    let token = resolve_token(
        args.token,
        config.github.token.as_deref(),
        std::env::var("GITHUB_TOKEN").ok(),
    );
    if token.is_none() {
        eprintln!(
            "{} no API token configured; unauthenticated limits are much lower",
            style("warning:").yellow().bold()
        );
    }

    let client = GitHubDirectory::with_base_url(&config.github.api_url, token)?;
    let store = SnapshotStore::new(&snapshot_path);
    let options = SyncOptions {
        force: args.force || config.sync.force,
        dry_run: args.dry_run,
    };

    let reporter = Arc::new(ProgressReporter::new());
    let callback = reporter.as_callback();

    let report = sync_contributors(&client, &identities, &store, &options, Some(&callback)).await?;
    reporter.finish();

    display_summary(&report, &options, &snapshot_path, is_tty);
    display_rate_budget(&client, is_tty).await;

    Ok(())
}

/// Token precedence: explicit flag, then config file, then environment.
fn resolve_token(
    flag: Option<String>,
    config_token: Option<&str>,
    env_token: Option<String>,
) -> Option<String> {
    flag.or_else(|| config_token.map(str::to_string))
        .or(env_token)
        .filter(|token| !token.trim().is_empty())
}

fn display_summary(report: &SyncReport, options: &SyncOptions, snapshot_path: &Path, is_tty: bool) {
    if is_tty {
        println!();
        println!(
            "{} {} refreshed, {} from cache, {} carried forward, {} unresolved",
            style("Sync complete:").green().bold(),
            report.refreshed,
            report.from_cache,
            report.carried_forward,
            report.unresolved
        );
        if options.dry_run {
            println!(
                "{} dry run, {} was not written",
                style("note:").yellow().bold(),
                snapshot_path.display()
            );
        }
    } else if options.dry_run {
        tracing::info!(snapshot = %snapshot_path.display(), "Dry run, snapshot not written");
    }
}

/// Display the remaining call budget after the run.
async fn display_rate_budget(client: &GitHubDirectory, is_tty: bool) {
    let budget = client.budget().await;
    if is_tty {
        match budget.reset_at() {
            Some(reset_at) => {
                let minutes = (reset_at - chrono::Utc::now()).num_minutes().max(0);
                println!(
                    "Rate budget: {} calls remaining, resets in {}m ({})",
                    budget.remaining(),
                    minutes,
                    reset_at.format("%H:%M:%S UTC")
                );
            }
            None => println!("Rate budget: {} calls remaining", budget.remaining()),
        }
    } else {
        tracing::info!(
            remaining = budget.remaining(),
            reset_at = ?budget.reset_at(),
            "Rate budget status"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_config_and_environment() {
        let token = resolve_token(
            Some("from-flag".to_string()),
            Some("from-config"),
            Some("from-env".to_string()),
        );
        assert_eq!(token.as_deref(), Some("from-flag"));
    }

    #[test]
    fn config_wins_over_environment() {
        let token = resolve_token(None, Some("from-config"), Some("from-env".to_string()));
        assert_eq!(token.as_deref(), Some("from-config"));
    }

    #[test]
    fn environment_is_the_last_fallback() {
        let token = resolve_token(None, None, Some("from-env".to_string()));
        assert_eq!(token.as_deref(), Some("from-env"));
    }

    #[test]
    fn blank_tokens_count_as_absent() {
        assert_eq!(resolve_token(Some("  ".to_string()), None, None), None);
        assert_eq!(resolve_token(None, None, None), None);
    }
}
