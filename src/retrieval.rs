use crate::archive;
use crate::config::ApiConfig;
use crate::error::RetrievalError;
use crate::patterns::{self, ErrorPattern, PatternAggregator};
use crate::remote::{LogApiClient, LogArchiveSource, ERROR_LOG};
use crate::tail;
use crate::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    LocalFile,
    RemoteApi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RetrievalResult {
    Patterns { patterns: Vec<ErrorPattern>, total_lines: usize, source: Source },
    Content { content: String, total_lines: usize, source: Source },
}

impl RetrievalResult {
    pub fn total_lines(&self) -> usize {
        match self {
            RetrievalResult::Patterns { total_lines, .. } | RetrievalResult::Content { total_lines, .. } => *total_lines,
        }
    }

    pub fn source(&self) -> Source {
        match self {
            RetrievalResult::Patterns { source, .. } | RetrievalResult::Content { source, .. } => *source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TailRequest {
    /// Remote service to pull archived logs for; takes precedence over `path`.
    pub service_id: Option<String>,
    pub path: Option<PathBuf>,
    pub max_bytes: u64,
    /// Local mode: trailing lines kept. Remote mode: cap on collected lines. `0` means no limit.
    pub tail_lines: usize,
    pub extract_patterns: bool,
    pub max_patterns: usize,
    /// Remote mode only; defaults to the last 24 hours.
    pub window: Option<TimeWindow>,
}

impl Default for TailRequest {
    fn default() -> Self {
        Self {
            service_id: None,
            path: None,
            max_bytes: 1_000_000,
            tail_lines: 5000,
            extract_patterns: true,
            max_patterns: 20,
            window: None,
        }
    }
}

impl TailRequest {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()), ..Self::default() }
    }

    pub fn remote(service_id: impl Into<String>) -> Self {
        Self { service_id: Some(service_id.into()), ..Self::default() }
    }

    fn service(&self) -> Option<&str> {
        self.service_id.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Snapshot the recent error log of a remote service or a local file.
pub fn tail_error_log_file(request: &TailRequest) -> Result<RetrievalResult, RetrievalError> {
    if let Some(service_id) = request.service() {
        let client = LogApiClient::new(ApiConfig::from_env()?)?;
        return tail_remote(&client, service_id, request, Utc::now());
    }
    if let Some(path) = request.path.as_ref() {
        return tail_local(path, request);
    }
    Err(RetrievalError::InvalidArgument(
        "either service_id (remote log API) or path (local file) must be provided".to_string(),
    ))
}

pub fn tail_remote<S: LogArchiveSource + ?Sized>(
    api: &S,
    service_id: &str,
    request: &TailRequest,
    now: DateTime<Utc>,
) -> Result<RetrievalResult, RetrievalError> {
    let window = match request.window {
        Some(window) => window,
        None => TimeWindow::last_hours(now, DEFAULT_LOOKBACK_HOURS)
            .ok_or_else(|| RetrievalError::InvalidArgument(format!("cannot look back {DEFAULT_LOOKBACK_HOURS} hours from {now}")))?,
    };
    let log_ids = api.list(service_id, ERROR_LOG, &window)?;
    let payload = api.download(ERROR_LOG, &log_ids)?;
    let lines = archive::collect_archive_errors(&payload, &window, request.tail_lines)?;
    info!(service_id, lines = lines.len(), "remote error log lines collected");

    let total_lines = lines.len();
    let source = Source::RemoteApi;
    if request.extract_patterns {
        let mut agg = PatternAggregator::new();
        for line in &lines {
            agg.push(line);
        }
        return Ok(RetrievalResult::Patterns { patterns: agg.finish(request.max_patterns), total_lines, source });
    }
    Ok(RetrievalResult::Content { content: lines.join("\n"), total_lines, source })
}

pub fn tail_local(path: &std::path::Path, request: &TailRequest) -> Result<RetrievalResult, RetrievalError> {
    let tail = tail::read_tail(path, request.max_bytes, request.tail_lines)?;
    let source = Source::LocalFile;
    info!(path = %path.display(), lines = tail.total_lines, "local error log tail read");
    if request.extract_patterns {
        let patterns = patterns::extract_patterns(&tail.content, request.max_patterns);
        return Ok(RetrievalResult::Patterns { patterns, total_lines: tail.total_lines, source });
    }
    Ok(RetrievalResult::Content { content: tail.content, total_lines: tail.total_lines, source })
}
