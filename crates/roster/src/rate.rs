//! Call budget gating against the directory's rate limit.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Calls held in reserve. At or below this the budget stops spending.
pub const SAFETY_BUFFER: usize = 10;

/// Longest the budget will sleep waiting for a reset.
pub const MAX_RESET_WAIT: Duration = Duration::from_secs(3600);

/// The directory's ceiling for authenticated callers, used as the
/// starting allowance until a response reports the real value.
pub const AUTHENTICATED_CEILING: usize = 5000;

/// Remaining call allowance and the next reset, as last reported by the
/// directory.
///
/// The budget never counts calls itself; it only mirrors what response
/// headers said. Between responses it is optimistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateBudget {
    remaining: usize,
    reset_at: Option<DateTime<Utc>>,
}

impl RateBudget {
    /// A budget with `remaining` calls and no known reset.
    #[must_use]
    pub fn new(remaining: usize) -> Self {
        Self {
            remaining,
            reset_at: None,
        }
    }

    /// Last reported remaining allowance.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Last reported reset instant, if any response carried one.
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        self.reset_at
    }

    /// Overwrite budget state with the freshest reported values.
    ///
    /// Each provided value replaces the stored one even when it is larger,
    /// since a reset may legitimately raise the allowance. There is no
    /// averaging or ratcheting.
    pub fn observe(&mut self, remaining: Option<usize>, reset_at: Option<DateTime<Utc>>) {
        if let Some(remaining) = remaining {
            self.remaining = remaining;
        }
        if let Some(reset_at) = reset_at {
            self.reset_at = Some(reset_at);
        }
    }

    /// Ask permission to spend one call.
    ///
    /// Returns `true` immediately while the allowance sits above
    /// [`SAFETY_BUFFER`]. At or below the buffer, a known future reset is
    /// waited out (capped at [`MAX_RESET_WAIT`]) and the call is then
    /// allowed optimistically. With no known reset this returns `false`
    /// rather than guessing a wait.
    pub async fn acquire(&mut self) -> bool {
        if self.remaining > SAFETY_BUFFER {
            return true;
        }
        let Some(reset_at) = self.reset_at else {
            tracing::warn!(
                remaining = self.remaining,
                "rate budget exhausted with no known reset"
            );
            return false;
        };
        let now = Utc::now();
        if reset_at > now {
            let until_reset = (reset_at - now).to_std().unwrap_or(MAX_RESET_WAIT);
            let wait = until_reset.min(MAX_RESET_WAIT);
            tracing::warn!(
                remaining = self.remaining,
                wait_secs = wait.as_secs(),
                "rate budget low, waiting for reset"
            );
            tokio::time::sleep(wait).await;
        }
        true
    }
}

impl Default for RateBudget {
    fn default() -> Self {
        Self::new(AUTHENTICATED_CEILING)
    }
}
