use super::types::RawAccount;
use crate::errors::{DashboardError, DashboardResult};
use reqwest::Client;

/// Client for the accounts endpoint. All methods return Result, never panic.
#[derive(Clone)]
pub struct AccountsClient {
    client: Client,
    url: String,
}

impl AccountsClient {
    pub fn new(url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .pool_max_idle_per_host(2)
                .build()
                .unwrap_or_default(),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the full account list.
    pub async fn fetch_accounts(&self) -> DashboardResult<Vec<RawAccount>> {
        let resp = self.client.get(&self.url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DashboardError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice::<Vec<RawAccount>>(&bytes)
            .map_err(|e| DashboardError::Parse(format!("GET {}: {e}", self.url)))
    }
}
