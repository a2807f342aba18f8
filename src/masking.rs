use once_cell::sync::Lazy;
use regex::Regex;

// Container log-shipping prefix: 2025-12-17T20:41:23.711701291Z stdout F
static RE_SHIPPING_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z\s+(stdout|stderr)\s+[A-Z]\s+").unwrap()
});

pub(crate) static RE_ISO_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z").unwrap()
});

// Server-native timestamp: 2025-12-17 20:41:25
pub(crate) static RE_SERVER_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}").unwrap()
});

static RE_PID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());

static RE_CONN_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[0x[0-9a-fA-F]+\]").unwrap());

static RE_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+\b").unwrap());

static RE_BRACKETED_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[<NUM>\]").unwrap());

// database.table or `database`.`table`; also hits version strings and dotted sizes
static RE_DB_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`?([a-zA-Z_]\w*)`?\.`?([a-zA-Z_]\w*)`?").unwrap()
});

static RE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"/[^\s]+").unwrap());

/// Reduce a raw error-log line to the template used as its dedup key.
pub fn mask_line(input: &str) -> String {
    // Order matters: numbers must be masked before the error-code restore and db.table pass
    let s = RE_SHIPPING_PREFIX.replace_all(input, "");
    let s = RE_ISO_TIMESTAMP.replace_all(&s, "<TIMESTAMP>");
    let s = RE_SERVER_TIMESTAMP.replace_all(&s, "<TIMESTAMP>");
    let s = RE_PID.replace_all(&s, "<PID>");
    let s = RE_CONN_ID.replace_all(&s, "<CONN_ID>");
    let s = RE_NUM.replace_all(&s, "<NUM>");
    let s = RE_BRACKETED_NUM.replace_all(&s, "[<ERR_CODE>]");
    let s = RE_DB_TABLE.replace_all(&s, "<DB>.<TABLE>");
    let s = RE_PATH.replace_all(&s, "<PATH>");
    s.into_owned()
}

/// Compile every rule up front so the first call does not pay for it.
pub fn prewarm_regexes() {
    Lazy::force(&RE_SHIPPING_PREFIX);
    Lazy::force(&RE_ISO_TIMESTAMP);
    Lazy::force(&RE_SERVER_TIMESTAMP);
    Lazy::force(&RE_PID);
    Lazy::force(&RE_CONN_ID);
    Lazy::force(&RE_NUM);
    Lazy::force(&RE_BRACKETED_NUM);
    Lazy::force(&RE_DB_TABLE);
    Lazy::force(&RE_PATH);
}
