use super::client::AccountsClient;
use crate::errors::DashboardResult;
use crate::report::build_reports;
use crate::state::{AppState, DashboardSnapshot, WsMessage};
use chrono::{DateTime, Utc};
use portable_atomic::Ordering;
use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior};

/// Re-fetches the account list on a fixed interval and republishes reports.
///
/// Cycles never overlap: each fetch is awaited before the next tick, and a
/// fetch that outlives the interval delays the schedule instead of bursting.
pub async fn run_refresh_loop(state: Arc<AppState>, client: AccountsClient) {
    let period = Duration::from_secs(state.config.refresh_interval_secs);
    tracing::info!(
        url = %client.url(),
        interval_secs = period.as_secs(),
        "refresh loop started"
    );

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        if let Err(e) = refresh_once(&state, &client, Utc::now()).await {
            tracing::error!(error = %e, "snapshot channel closed, refresh loop shutting down");
            return;
        }
    }
}

/// One fetch-and-recompute cycle.
///
/// A failed fetch is logged and leaves the published accounts as they were.
/// Returns Err only when the snapshot can no longer be published.
pub async fn refresh_once(
    state: &AppState,
    client: &AccountsClient,
    now: DateTime<Utc>,
) -> DashboardResult<()> {
    let cycle_id = uuid::Uuid::new_v4();
    state.counters.cycles_started.fetch_add(1, Ordering::Relaxed);

    let accounts = match client.fetch_accounts().await {
        Ok(a) => a,
        Err(e) => {
            let failures = state.counters.fetch_failures.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::warn!(
                cycle = %cycle_id,
                error = %e,
                failures = failures,
                "accounts fetch failed, keeping previous snapshot"
            );
            state.record_failure(&e.to_string());
            state.broadcast(WsMessage::RefreshFailed {
                cycle_id,
                error: e.to_string(),
            });
            return Ok(());
        }
    };

    let reports = build_reports(
        &accounts,
        &state.config.placeholder,
        &state.config.report,
        now,
    );

    let refreshed_at = now.to_rfc3339();
    let account_count = reports.len();

    state.publish(DashboardSnapshot {
        loading: false,
        cycle_id: Some(cycle_id),
        refreshed_at: Some(refreshed_at.clone()),
        last_error: None,
        accounts: reports,
    })?;

    state.counters.cycles_succeeded.fetch_add(1, Ordering::Relaxed);
    state
        .counters
        .accounts_processed
        .fetch_add(account_count as u64, Ordering::Relaxed);

    tracing::info!(cycle = %cycle_id, accounts = account_count, "snapshot refreshed");
    state.broadcast(WsMessage::SnapshotUpdated {
        cycle_id,
        refreshed_at,
        account_count,
    });

    Ok(())
}
