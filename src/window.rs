use crate::parser;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

const REPORTABLE_MARKERS: &[&str] = &["[ERROR]", "[Warning]"];
const NOISE_MARKERS: &[&str] = &["Aborted connection", "Access denied for user"];

fn rest_of_day() -> Duration {
    Duration::hours(23) + Duration::minutes(59) + Duration::seconds(59)
}

/// Inclusive `[start, end]` range a retrieval call is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// `start == end` is shorthand for the whole day beginning at `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let end = if start == end { start + rest_of_day() } else { end };
        Self { start, end }
    }

    /// The `hours` leading up to `now`; `None` when the start falls outside the representable range.
    pub fn last_hours(now: DateTime<Utc>, hours: i64) -> Option<Self> {
        let start = now.checked_sub_signed(Duration::try_hours(hours)?)?;
        Some(Self::new(start, now))
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Whole-second `YYYY-MM-DDTHH:MM:SSZ` bounds as the log API expects them.
    pub fn api_bounds(&self) -> (String, String) {
        let fmt = "%Y-%m-%dT%H:%M:%SZ";
        (self.start.format(fmt).to_string(), self.end.format(fmt).to_string())
    }
}

/// Date of a day-partitioned member named `<service>_<db>_<host>_<logtype>_<YYYY-MM-DD>.log`.
pub fn member_date(name: &str) -> Option<NaiveDate> {
    let base = name.rsplit('/').next().unwrap_or(name);
    let last = base.rsplit('_').next()?;
    let date_part = last.split('.').next()?;
    let mut parts = date_part.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() { return None; }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

/// Whether a member name follows the day-partitioned naming scheme at all.
pub fn is_log_member(name: &str) -> bool {
    let base = name.rsplit('/').next().unwrap_or(name);
    base.split('_').count() >= 4
}

/// File-level admission: the member is read unless neither end of its day falls inside the
/// window. Unparsable dates are admitted.
pub fn admits_member(name: &str, window: &TimeWindow) -> bool {
    let Some(date) = member_date(name) else { return true };
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else { return true };
    let day_start = Utc.from_utc_datetime(&midnight);
    let day_end = day_start + rest_of_day();
    window.contains(day_start) || window.contains(day_end)
}

/// Content filter: error or warning markers only, minus the high-volume benign noise.
pub fn is_reportable(line: &str) -> bool {
    REPORTABLE_MARKERS.iter().any(|m| line.contains(m)) && !NOISE_MARKERS.iter().any(|m| line.contains(m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    Keep,
    /// Newer than the window; older lines may still qualify.
    Skip,
    /// Older than the window; nothing earlier in this file can qualify.
    Stop,
}

/// Line-level windowing for a newest-first scan. Lines without a leading timestamp are kept.
pub fn classify_line(line: &str, window: &TimeWindow) -> LineVerdict {
    match parser::parse_leading_timestamp(line) {
        Some(ts) if ts > window.end => LineVerdict::Skip,
        Some(ts) if ts < window.start => LineVerdict::Stop,
        _ => LineVerdict::Keep,
    }
}
