use crate::error::RetrievalError;
use std::time::Duration;

pub const API_KEY_ENV: &str = "SKYSQL_API_KEY";
pub const API_URL_ENV: &str = "SKYSQL_LOG_API_URL";
pub const MAX_TOTAL_SIZE_ENV: &str = "SKYSQL_LOG_MAX_TOTAL_SIZE";

pub const DEFAULT_API_URL: &str = "https://api.skysql.com/observability/v2/logs";
pub const DEFAULT_MAX_TOTAL_SIZE: u64 = 10 * 1024 * 1024;

/// Settings for the remote log API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_key: String,
    pub api_url: String,
    /// Upper bound on the summed size of listed log files.
    pub max_total_size: u64,
    pub list_timeout: Duration,
    pub download_timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            max_total_size: DEFAULT_MAX_TOTAL_SIZE,
            list_timeout: Duration::from_secs(30),
            download_timeout: Duration::from_secs(60),
        }
    }

    pub fn from_env() -> Result<Self, RetrievalError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RetrievalError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let api_key = non_empty(API_KEY_ENV).ok_or_else(|| {
            RetrievalError::Config(format!("remote log access requires {API_KEY_ENV} to be set"))
        })?;
        let mut cfg = Self::new(api_key);
        if let Some(url) = non_empty(API_URL_ENV) {
            cfg.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty(MAX_TOTAL_SIZE_ENV) {
            cfg.max_total_size = raw
                .parse()
                .map_err(|_| RetrievalError::Config(format!("{MAX_TOTAL_SIZE_ENV} is not a byte count: {raw}")))?;
        }
        Ok(cfg)
    }

    pub fn archive_url(&self) -> String {
        format!("{}/archive", self.api_url)
    }
}
