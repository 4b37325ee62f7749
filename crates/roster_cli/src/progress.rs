//! Progress reporting for sync runs.
//!
//! Two modes:
//! - Interactive mode (TTY): an animated per-identity bar using indicatif
//! - Logging mode (non-TTY): structured logging using tracing

use std::sync::{Arc, Mutex};

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roster::sync::{ProgressCallback, SyncProgress};

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress bar for a TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY output (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter::new())
        }
    }

    /// Handle a progress event.
    pub fn handle(&self, event: SyncProgress) {
        match self {
            Self::Interactive(reporter) => reporter.handle(event),
            Self::Logging(reporter) => reporter.handle(event),
        }
    }

    /// Convert to a callback the sync engine can drive.
    pub fn as_callback(self: &Arc<Self>) -> ProgressCallback {
        let reporter = Arc::clone(self);
        Box::new(move |event| {
            reporter.handle(event);
        })
    }

    /// Finish the progress bar (interactive mode only).
    pub fn finish(&self) {
        if let Self::Interactive(reporter) = self {
            reporter.finish();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ProgressState {
    /// Bar over the identity loop, created on SyncingContributors.
    sync_bar: Option<ProgressBar>,
}

/// Interactive progress reporter using indicatif.
///
/// One bar tracks the identity loop; each identity advances it exactly
/// once, whichever outcome it lands in. Warnings print above the bar.
pub struct InteractiveReporter {
    multi: MultiProgress,
    state: Mutex<ProgressState>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            state: Mutex::new(ProgressState::default()),
        }
    }

    pub fn handle(&self, event: SyncProgress) {
        let mut state = self.state.lock().unwrap();

        match event {
            SyncProgress::SnapshotLoaded { contributors } => {
                drop(state);
                self.multi
                    .println(format!("Loaded snapshot with {contributors} contributors"))
                    .ok();
            }

            SyncProgress::SyncingContributors { count } => {
                let bar = self.multi.add(ProgressBar::new(count as u64));
                bar.set_style(Self::bar_style());
                bar.set_prefix(format!("{:12}", "Syncing"));
                state.sync_bar = Some(bar);
            }

            SyncProgress::CacheFresh { login, age_hours } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.inc(1);
                    bar.set_message(format!("· {login} (cached {age_hours}h ago)"));
                }
            }

            SyncProgress::Refreshing { login } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.set_message(format!("{login}..."));
                }
            }

            SyncProgress::Refreshed { login } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.inc(1);
                    bar.set_message(format!("★ {login}"));
                }
            }

            SyncProgress::CarriedForward { login, error } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.inc(1);
                    bar.set_message(format!("✗ {login}: {error} (kept last known)"));
                }
            }

            SyncProgress::Unresolved { login, error } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.inc(1);
                    bar.set_message(format!("✗ {login}: {error}"));
                }
            }

            SyncProgress::SnapshotSaved { contributors } => {
                if let Some(ref bar) = state.sync_bar {
                    bar.set_message(format!("{contributors} contributors saved"));
                }
            }

            SyncProgress::SyncComplete {
                refreshed,
                from_cache,
                carried_forward,
                unresolved,
            } => {
                if let Some(ref bar) = state.sync_bar {
                    let mut parts = vec![format!("✓ {refreshed} refreshed, {from_cache} cached")];
                    if carried_forward > 0 {
                        parts.push(format!("{carried_forward} kept"));
                    }
                    if unresolved > 0 {
                        parts.push(format!("{unresolved} unresolved"));
                    }
                    bar.finish_with_message(parts.join(", "));
                }
            }

            SyncProgress::Warning { message } => {
                // Release the lock before printing to avoid holding it
                // during I/O.
                drop(state);
                self.multi.println(format!("⚠ {message}")).ok();
            }

            _ => {}
        }
    }

    pub fn finish(&self) {
        let state = self.state.lock().unwrap();
        if let Some(ref bar) = state.sync_bar
            && !bar.is_finished()
        {
            bar.finish();
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}/{len:3} {msg}")
            .expect("Invalid template")
            .progress_chars("█▓░")
    }
}

impl Default for InteractiveReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }

    /// Handle a progress event.
    pub fn handle(&self, event: SyncProgress) {
        match event {
            SyncProgress::SnapshotLoaded { contributors } => {
                tracing::info!(contributors, "Loaded snapshot");
            }

            SyncProgress::SyncingContributors { count } => {
                tracing::info!(count, "Syncing contributors");
            }

            SyncProgress::CacheFresh { login, age_hours } => {
                tracing::debug!(login = %login, age_hours, "Cache fresh, skipping fetch");
            }

            SyncProgress::Refreshing { login } => {
                tracing::debug!(login = %login, "Refreshing");
            }

            SyncProgress::Refreshed { login } => {
                tracing::info!(login = %login, "Refreshed");
            }

            SyncProgress::CarriedForward { login, error } => {
                tracing::warn!(login = %login, error = %error, "Kept last known record");
            }

            SyncProgress::Unresolved { login, error } => {
                tracing::warn!(login = %login, error = %error, "Unresolved");
            }

            SyncProgress::SnapshotSaved { contributors } => {
                tracing::info!(contributors, "Snapshot saved");
            }

            SyncProgress::SyncComplete {
                refreshed,
                from_cache,
                carried_forward,
                unresolved,
            } => {
                tracing::info!(
                    refreshed,
                    from_cache,
                    carried_forward,
                    unresolved,
                    "Sync complete"
                );
            }

            SyncProgress::Warning { message } => {
                tracing::warn!(message = %message, "Warning");
            }

            _ => {}
        }
    }
}

impl Default for LoggingReporter {
    fn default() -> Self {
        Self::new()
    }
}
