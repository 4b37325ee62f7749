//! The `extract` command.

use std::path::PathBuf;

use clap::Args;
use console::style;

use roster::extract::extract_identities_from_file;

use crate::config::RosterConfig;

/// Arguments for `roster extract`.
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Page scanned for profile links
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,
}

/// Print the identities the page links to, one per line, in first
/// occurrence order. Exits non-zero when nothing is found so scripts
/// can tell an empty page from a working pipeline.
pub fn handle_extract(
    args: ExtractArgs,
    config: &RosterConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_path = args.page.unwrap_or_else(|| config.sync.page_path.clone());

    let identities = extract_identities_from_file(&page_path, &config.github.host);
    if identities.is_empty() {
        eprintln!(
            "{} no profile links found in {}",
            style("error:").red().bold(),
            page_path.display()
        );
        return Err("empty identity set".into());
    }

    for login in &identities {
        println!("{login}");
    }
    Ok(())
}
