use crate::report::format::{dashboard_view, DashboardView};
use crate::report::AccountReport;
use crate::state::{AppState, DashboardSnapshot};
use axum::extract::{Query, State};
use axum::response::Json;
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct DashboardQuery {
    pub account: Option<usize>,
}

/// GET /api/snapshot -- full current snapshot (from watch channel, no lock)
pub async fn get_snapshot(
    State(state): State<Arc<AppState>>,
) -> Json<DashboardSnapshot> {
    Json(state.snapshot())
}

/// GET /api/accounts -- account reports only
pub async fn get_accounts(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<AccountReport>> {
    Json(state.snapshot_rx.borrow().accounts.clone())
}

/// GET /api/dashboard -- display-ready view of one account (first by default)
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> Json<serde_json::Value> {
    let idx = params.account.unwrap_or(0);
    let view: Option<DashboardView> = {
        let snapshot = state.snapshot_rx.borrow();
        snapshot
            .accounts
            .get(idx)
            .map(|report| dashboard_view(report, &state.config.report))
    };

    match view {
        Some(v) => Json(serde_json::json!(v)),
        None => {
            let loading = state.snapshot_rx.borrow().loading;
            let error = if loading { "loading" } else { "no account connected" };
            Json(serde_json::json!({ "error": error, "loading": loading }))
        }
    }
}

/// GET /api/counters -- refresh counters (lock-free reads)
pub async fn get_counters(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "cycles_started": state.counters.cycles_started.load(Relaxed),
        "cycles_succeeded": state.counters.cycles_succeeded.load(Relaxed),
        "fetch_failures": state.counters.fetch_failures.load(Relaxed),
        "accounts_processed": state.counters.accounts_processed.load(Relaxed),
        "ws_messages_sent": state.counters.ws_messages_sent.load(Relaxed),
    }))
}
