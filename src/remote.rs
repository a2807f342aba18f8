use crate::config::ApiConfig;
use crate::error::RetrievalError;
use crate::window::TimeWindow;
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};

pub const ERROR_LOG: &str = "error-log";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogListing {
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub id: String,
    /// `<service_id>/<...>`; the leading segment names the owning service.
    #[serde(default)]
    pub server_data_source_id: String,
    #[serde(default)]
    pub size: u64,
}

impl LogEntry {
    pub fn owner(&self) -> &str {
        self.server_data_source_id.split('/').next().unwrap_or_default()
    }
}

/// The two calls a retrieval needs from a remote log store.
pub trait LogArchiveSource {
    /// Ids of the `log_type` files belonging to `service_id` inside `window`, after the size
    /// budget has been enforced.
    fn list(&self, service_id: &str, log_type: &str, window: &TimeWindow) -> Result<Vec<String>, RetrievalError>;

    /// Zip archive holding the raw files for `log_ids`.
    fn download(&self, log_type: &str, log_ids: &[String]) -> Result<Vec<u8>, RetrievalError>;
}

/// Pick the entries owned by `service_id`, failing when their summed size exceeds `budget`
/// or when there are none. Entries without an id cannot be downloaded and are ignored.
pub fn select_log_ids(
    listing: &LogListing,
    service_id: &str,
    log_type: &str,
    budget: u64,
) -> Result<Vec<String>, RetrievalError> {
    let mut total: u64 = 0;
    let mut ids = Vec::new();
    for entry in listing.logs.iter().filter(|e| e.owner() == service_id && !e.id.is_empty()) {
        total = total.saturating_add(entry.size);
        ids.push(entry.id.clone());
    }
    if total > budget {
        return Err(RetrievalError::QuotaExceeded { log_type: log_type.to_string(), total, budget });
    }
    if ids.is_empty() {
        return Err(RetrievalError::NotFound(format!("no {log_type} files available for service_id {service_id}")));
    }
    Ok(ids)
}

/// Blocking client for the hosted log API.
pub struct LogApiClient {
    http: Client,
    config: ApiConfig,
}

impl LogApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, RetrievalError> {
        let http = Client::builder().build()?;
        Ok(Self { http, config })
    }

    fn get(&self, endpoint: &'static str, url: &str, query: &[(&str, &str)], timeout: Duration) -> Result<Response, RetrievalError> {
        let resp = self
            .http
            .get(url)
            .header("X-API-Key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .query(query)
            .timeout(timeout)
            .send()
            .map_err(|e| {
                warn!(endpoint, error = %e, "log api request failed");
                RetrievalError::Transport(e)
            })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            warn!(endpoint, status = status.as_u16(), "log api returned an error status");
            return Err(RetrievalError::Upstream { endpoint, status: status.as_u16(), body });
        }
        Ok(resp)
    }
}

impl LogArchiveSource for LogApiClient {
    fn list(&self, service_id: &str, log_type: &str, window: &TimeWindow) -> Result<Vec<String>, RetrievalError> {
        let (from, to) = window.api_bounds();
        let query = [("logType", log_type), ("fromDate", from.as_str()), ("toDate", to.as_str())];
        let listing: LogListing = self.get("info", &self.config.api_url, &query, self.config.list_timeout)?.json()?;
        let ids = select_log_ids(&listing, service_id, log_type, self.config.max_total_size)?;
        info!(service_id, log_type, listed = listing.logs.len(), selected = ids.len(), "log files listed");
        Ok(ids)
    }

    fn download(&self, log_type: &str, log_ids: &[String]) -> Result<Vec<u8>, RetrievalError> {
        let joined = log_ids.join(",");
        let query = [("logType", log_type), ("logIds", joined.as_str()), ("logFormat", "raw")];
        let url = self.config.archive_url();
        let bytes = self.get("archive", &url, &query, self.config.download_timeout)?.bytes()?;
        info!(log_type, files = log_ids.len(), bytes = bytes.len(), "log archive downloaded");
        Ok(bytes.to_vec())
    }
}
