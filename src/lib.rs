pub mod error;
pub mod config;
pub mod masking;
pub mod severity;
pub mod parser;
pub mod patterns;
pub mod tail;
pub mod reverse;
pub mod window;
pub mod remote;
pub mod archive;
pub mod retrieval;

pub use error::RetrievalError;
pub use patterns::{extract_patterns, ErrorPattern, PatternAggregator};
pub use retrieval::{tail_error_log_file, RetrievalResult, Source, TailRequest};
pub use severity::Severity;
