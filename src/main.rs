mod config;
mod errors;
mod feed;
mod report;
mod series;
mod server;
mod state;

use crate::feed::client::AccountsClient;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Structured logging (line-buffered to stderr)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("equity_dash starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        window_start = %cfg.placeholder.start_date,
        window_end = %cfg.placeholder.end_date,
        min_profit = cfg.placeholder.min_profit,
        max_profit = cfg.placeholder.max_profit,
        "placeholder backfill configured"
    );

    let port = cfg.server_port;
    let client = AccountsClient::new(&cfg.accounts_url, cfg.http_timeout_secs);
    let app_state = AppState::new(cfg);

    // ── Spawn tasks ──

    // 1. Refresh task (sole writer of the snapshot)
    let refresh_state = app_state.clone();
    tokio::spawn(async move {
        feed::poller::run_refresh_loop(refresh_state, client).await;
    });

    // 2. Axum HTTP + WS server
    let app = server::build_router(app_state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("server listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {e}");
    }
}
