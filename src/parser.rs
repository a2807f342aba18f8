use crate::masking::{RE_ISO_TIMESTAMP, RE_SERVER_TIMESTAMP};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse the first whitespace-delimited token of a line as a timestamp.
pub fn parse_leading_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let token = line.split_whitespace().next()?;
    parse_ts_string(token)
}

pub fn parse_ts_string(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset-less forms are taken as UTC
    let fmts = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for f in fmts.iter() {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, f) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    date.and_hms_opt(0, 0, 0).map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Timestamp text embedded anywhere in a line, as written. The server-native form wins over
/// the container-shipping ISO form when both are present.
pub fn extract_line_timestamp(line: &str) -> Option<&str> {
    RE_SERVER_TIMESTAMP
        .find(line)
        .or_else(|| RE_ISO_TIMESTAMP.find(line))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_token_forms() {
        let want = Utc.with_ymd_and_hms(2025, 12, 17, 20, 41, 23).unwrap();
        let ts = parse_leading_timestamp("2025-12-17T20:41:23.711701291Z stdout F boom").unwrap();
        assert_eq!(ts.timestamp(), want.timestamp());
        assert_eq!(parse_leading_timestamp("2025-12-17T20:41:23 boom"), Some(want));
        assert_eq!(
            parse_leading_timestamp("2025-12-17 20:41:25 0 [ERROR] x"),
            Some(Utc.with_ymd_and_hms(2025, 12, 17, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_leading_timestamp("InnoDB: [ERROR] x"), None);
        assert_eq!(parse_leading_timestamp("   "), None);
    }

    #[test]
    fn embedded_timestamp_prefers_server_form() {
        let line = "2025-12-17T20:41:23.711701291Z stdout F 2025-12-17 20:41:25 0 [ERROR] x";
        assert_eq!(extract_line_timestamp(line), Some("2025-12-17 20:41:25"));
        let line = "2025-12-17T20:41:23.5Z stdout F [ERROR] x";
        assert_eq!(extract_line_timestamp(line), Some("2025-12-17T20:41:23.5Z"));
        assert_eq!(extract_line_timestamp("[ERROR] no time"), None);
    }
}
