use crate::config::AppConfig;
use crate::errors::{DashboardError, DashboardResult};
use crate::report::AccountReport;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};

// ── Dashboard snapshot (sent via watch channel) ──

/// Everything the rendering layer sees. Replaced whole on every successful
/// refresh; a failed refresh only touches `last_error`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DashboardSnapshot {
    /// True until the first refresh finishes, successfully or not.
    pub loading: bool,
    pub cycle_id: Option<uuid::Uuid>,
    pub refreshed_at: Option<String>,
    pub last_error: Option<String>,
    pub accounts: Vec<AccountReport>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            loading: true,
            cycle_id: None,
            refreshed_at: None,
            last_error: None,
            accounts: Vec::new(),
        }
    }
}

// ── Messages pushed to WS clients ──

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type")]
pub enum WsMessage {
    #[serde(rename = "snapshot_updated")]
    SnapshotUpdated {
        cycle_id: uuid::Uuid,
        refreshed_at: String,
        account_count: usize,
    },

    #[serde(rename = "refresh_failed")]
    RefreshFailed {
        cycle_id: uuid::Uuid,
        error: String,
    },
}

// ── Refresh counters (lock-free) ──

pub struct RefreshCounters {
    pub cycles_started: AtomicU64,
    pub cycles_succeeded: AtomicU64,
    pub fetch_failures: AtomicU64,
    pub accounts_processed: AtomicU64,
    pub ws_messages_sent: AtomicU64,
}

impl RefreshCounters {
    pub fn new() -> Self {
        Self {
            cycles_started: AtomicU64::new(0),
            cycles_succeeded: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            accounts_processed: AtomicU64::new(0),
            ws_messages_sent: AtomicU64::new(0),
        }
    }
}

// ── Application shared state (channels, not locks) ──

pub struct AppState {
    pub config: AppConfig,

    // Refresh task -> readers: latest snapshot
    pub snapshot_tx: watch::Sender<DashboardSnapshot>,
    pub snapshot_rx: watch::Receiver<DashboardSnapshot>,

    // Refresh task -> WS clients
    pub ws_tx: broadcast::Sender<WsMessage>,

    pub counters: RefreshCounters,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let (ws_tx, _) = broadcast::channel(64);
        let (snapshot_tx, snapshot_rx) = watch::channel(DashboardSnapshot::default());

        Arc::new(Self {
            config,
            snapshot_tx,
            snapshot_rx,
            ws_tx,
            counters: RefreshCounters::new(),
        })
    }

    /// Replace the visible snapshot in one step.
    pub fn publish(&self, snapshot: DashboardSnapshot) -> DashboardResult<()> {
        self.snapshot_tx
            .send(snapshot)
            .map_err(|_| DashboardError::ChannelClosed("snapshot".into()))
    }

    /// Record a failed refresh without touching the published accounts.
    pub fn record_failure(&self, error: &str) {
        self.snapshot_tx.send_modify(|s| {
            s.loading = false;
            s.last_error = Some(error.to_string());
        });
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    #[inline]
    pub fn broadcast(&self, msg: WsMessage) {
        self.counters.ws_messages_sent.fetch_add(1, Ordering::Relaxed);
        let _ = self.ws_tx.send(msg);
    }
}
