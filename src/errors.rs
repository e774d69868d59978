/// Error types for the dashboard service.
/// Nothing here is fatal once the service is running:
/// - Fetch failures keep the last good snapshot visible
/// - Only startup errors (config, bind) stop the process
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("accounts API error: {status} {body}")]
    Upstream { status: u16, body: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        DashboardError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Parse(e.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
