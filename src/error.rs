use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("total size of {log_type} files ({total} bytes) exceeds maximum ({budget} bytes); narrow the time window")]
    QuotaExceeded { log_type: String, total: u64, budget: u64 },
    #[error("unexpected response code {status} from log {endpoint} service: {body}")]
    Upstream { endpoint: &'static str, status: u16, body: String },
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
}

impl RetrievalError {
    pub fn kind(&self) -> &'static str {
        match self {
            RetrievalError::NotFound(_) => "not_found",
            RetrievalError::InvalidArgument(_) => "invalid_argument",
            RetrievalError::QuotaExceeded { .. } => "quota_exceeded",
            RetrievalError::Upstream { .. } => "upstream_error",
            RetrievalError::Transport(_) => "transport",
            RetrievalError::Archive(_) => "archive",
            RetrievalError::Io(_) => "io",
            RetrievalError::Config(_) => "config",
        }
    }
}
