use chrono::{DateTime, Utc};
use clap::Parser;
use errlogscope::retrieval::{self, TailRequest};
use errlogscope::window::TimeWindow;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ten years; the log API keeps far less than that.
const MAX_LOOKBACK_HOURS: i64 = 24 * 366 * 10;

#[derive(Parser, Debug)]
#[command(name = "errlogscope", version, about = "Recurring error patterns from recent database error logs")]
struct Cli {
    /// Remote service id; logs are pulled from the hosted log API
    #[arg(long = "service-id", conflicts_with = "path")]
    service_id: Option<String>,
    /// Local error log file
    #[arg(long = "path")]
    path: Option<PathBuf>,

    #[arg(long = "max-bytes", default_value_t = 1_000_000)] max_bytes: u64,
    #[arg(long = "tail-lines", default_value_t = 5000)] tail_lines: usize,
    #[arg(long = "max-patterns", default_value_t = 20)] max_patterns: usize,
    /// Print the collected lines instead of grouping them into patterns
    #[arg(long = "raw", default_value_t = false)] raw: bool,

    /// Look-back for remote logs when no explicit bounds are given
    #[arg(long = "hours", default_value_t = retrieval::DEFAULT_LOOKBACK_HOURS, value_parser = clap::value_parser!(i64).range(1..=MAX_LOOKBACK_HOURS))]
    hours: i64,
    /// RFC 3339 window start (remote only)
    #[arg(long = "start", requires = "end")] start: Option<DateTime<Utc>>,
    /// RFC 3339 window end (remote only)
    #[arg(long = "end", requires = "start")] end: Option<DateTime<Utc>>,
}

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    errlogscope::masking::prewarm_regexes();

    let cli = Cli::parse();
    let window = match (cli.start, cli.end) {
        (Some(start), Some(end)) => TimeWindow::new(start, end),
        _ => TimeWindow::last_hours(Utc::now(), cli.hours)
            .ok_or_else(|| anyhow::anyhow!("--hours {} reaches past the supported date range", cli.hours))?,
    };
    let request = TailRequest {
        service_id: cli.service_id,
        path: cli.path,
        max_bytes: cli.max_bytes,
        tail_lines: cli.tail_lines,
        extract_patterns: !cli.raw,
        max_patterns: cli.max_patterns,
        window: Some(window),
    };

    match retrieval::tail_error_log_file(&request) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::to_string_pretty(&serde_json::json!({"error": e.kind(), "message": e.to_string()}))?);
            std::process::exit(1);
        }
    }
}
