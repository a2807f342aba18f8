use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Unknown,
}

const ERROR_KEYWORDS: &[&str] = &["ERROR", "FATAL", "CRITICAL", "PANIC"];
const WARNING_KEYWORDS: &[&str] = &["WARNING", "WARN"];
const INFO_KEYWORDS: &[&str] = &["INFO", "NOTE"];

impl Severity {
    /// Sort rank used to break count ties: lower ranks first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Unknown => 3,
        }
    }
}

/// Keyword scan over the raw line. Must see the line before masking.
pub fn classify(line: &str) -> Severity {
    let upper = line.to_uppercase();
    let has_any = |keywords: &[&str]| keywords.iter().any(|kw| upper.contains(kw));
    if has_any(ERROR_KEYWORDS) {
        Severity::Error
    } else if has_any(WARNING_KEYWORDS) {
        Severity::Warning
    } else if has_any(INFO_KEYWORDS) {
        Severity::Info
    } else {
        Severity::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_keywords_win_over_warning() {
        assert_eq!(classify("[Warning] fatal: giving up"), Severity::Error);
    }

    #[test]
    fn keyword_scan_ignores_case() {
        assert_eq!(classify("2024-01-01 00:00:00 0 [Warning] slow"), Severity::Warning);
        assert_eq!(classify("[note] starting"), Severity::Info);
        assert_eq!(classify("panic in handler"), Severity::Error);
        assert_eq!(classify("plain text"), Severity::Unknown);
    }

    #[test]
    fn rank_follows_declaration_order() {
        let mut all = vec![Severity::Unknown, Severity::Info, Severity::Error, Severity::Warning];
        all.sort();
        assert_eq!(all, vec![Severity::Error, Severity::Warning, Severity::Info, Severity::Unknown]);
        assert!(all.windows(2).all(|w| w[0].rank() < w[1].rank()));
    }
}
