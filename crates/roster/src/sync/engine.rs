//! The sync state machine.

use chrono::{Duration, Utc};

use crate::contributor::Snapshot;
use crate::directory::{DirectoryClient, short_error_message};
use crate::store::{SnapshotStore, StoreError};

use super::progress::{ProgressCallback, SyncProgress, emit};
use super::types::{FRESHNESS_WINDOW_HOURS, IDENTITY_PAUSE_MS, SyncOptions, SyncReport};

/// Synchronize `identities` against the directory, merging with the
/// prior snapshot at `store` and writing the result back.
///
/// Each identity lands in exactly one outcome:
///
/// - fresh cache: the prior record is younger than the freshness window
///   and is copied unchanged without any directory call (unless
///   `options.force`);
/// - refreshed: the profile is fetched and, when available, summary
///   counters are merged over it;
/// - carried forward: the fetch failed but a prior record exists, so it
///   is kept unchanged regardless of its age;
/// - unresolved: the fetch failed with no prior record, so the identity
///   is absent from the output.
///
/// Identities in the prior snapshot but not in `identities` are dropped.
/// The loop is strictly sequential with a politeness pause between
/// identities. The snapshot is written once, after the loop; only that
/// terminal write can fail the run. An unreadable prior snapshot is
/// reported and treated as empty rather than aborting.
#[tracing::instrument(skip_all, fields(identities = identities.len()))]
pub async fn sync_contributors<C: DirectoryClient>(
    client: &C,
    identities: &[String],
    store: &SnapshotStore,
    options: &SyncOptions,
    on_progress: Option<&ProgressCallback>,
) -> Result<SyncReport, StoreError> {
    let prior = match store.load() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            tracing::warn!(error = %err, "prior snapshot unusable, starting empty");
            emit(
                on_progress,
                SyncProgress::Warning {
                    message: format!("{err}; starting from an empty snapshot"),
                },
            );
            Snapshot::new()
        }
    };
    emit(
        on_progress,
        SyncProgress::SnapshotLoaded {
            contributors: prior.len(),
        },
    );
    emit(
        on_progress,
        SyncProgress::SyncingContributors {
            count: identities.len(),
        },
    );

    let mut next = Snapshot::new();
    let mut report = SyncReport::default();

    for (index, login) in identities.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(IDENTITY_PAUSE_MS)).await;
        }

        let cached = prior.get(login);
        if !options.force
            && let Some(record) = cached
        {
            let age = record.age(Utc::now());
            if age < Duration::hours(FRESHNESS_WINDOW_HOURS) {
                next.insert(login.clone(), record.clone());
                report.from_cache += 1;
                tracing::debug!(login, age_hours = age.num_hours(), "cache fresh");
                emit(
                    on_progress,
                    SyncProgress::CacheFresh {
                        login: login.clone(),
                        age_hours: age.num_hours(),
                    },
                );
                continue;
            }
        }

        emit(
            on_progress,
            SyncProgress::Refreshing {
                login: login.clone(),
            },
        );
        match client.fetch_profile(login).await {
            Ok(mut record) => {
                match client.fetch_contribution_summary(login).await {
                    Ok(summary) => record.apply_summary(&summary),
                    Err(err) => {
                        tracing::debug!(login, error = %err, "summary unavailable, keeping bare profile");
                        emit(
                            on_progress,
                            SyncProgress::Warning {
                                message: format!(
                                    "{login}: summary unavailable ({})",
                                    short_error_message(&err)
                                ),
                            },
                        );
                    }
                }
                next.insert(login.clone(), record);
                report.refreshed += 1;
                emit(
                    on_progress,
                    SyncProgress::Refreshed {
                        login: login.clone(),
                    },
                );
            }
            Err(err) => {
                let reason = short_error_message(&err);
                if let Some(record) = cached {
                    next.insert(login.clone(), record.clone());
                    report.carried_forward += 1;
                    tracing::warn!(login, error = %err, "fetch failed, keeping last known record");
                    emit(
                        on_progress,
                        SyncProgress::CarriedForward {
                            login: login.clone(),
                            error: reason,
                        },
                    );
                } else {
                    report.unresolved += 1;
                    tracing::warn!(login, error = %err, "fetch failed with no prior record");
                    emit(
                        on_progress,
                        SyncProgress::Unresolved {
                            login: login.clone(),
                            error: reason,
                        },
                    );
                }
            }
        }
    }

    if options.dry_run {
        tracing::info!(contributors = next.len(), "dry run, snapshot not written");
    } else {
        store.save(&next)?;
        emit(
            on_progress,
            SyncProgress::SnapshotSaved {
                contributors: next.len(),
            },
        );
    }

    tracing::info!(
        refreshed = report.refreshed,
        from_cache = report.from_cache,
        carried_forward = report.carried_forward,
        unresolved = report.unresolved,
        "sync complete"
    );
    emit(
        on_progress,
        SyncProgress::SyncComplete {
            refreshed: report.refreshed,
            from_cache: report.from_cache,
            carried_forward: report.carried_forward,
            unresolved: report.unresolved,
        },
    );
    Ok(report)
}
