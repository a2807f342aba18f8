use crate::{masking, parser, severity, window};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SAMPLE_MAX_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPattern {
    #[serde(rename = "pattern")]
    pub template: String,
    pub count: usize,
    pub severity: Severity,
    pub first_seen: Option<String>,
    pub last_seen: Option<String>,
    pub sample_message: String,
}

/// Groups raw lines by masked template. Owned by a single retrieval call.
#[derive(Default)]
pub struct PatternAggregator {
    index: HashMap<String, usize>,
    records: Vec<ErrorPattern>,
    total: usize,
}

impl PatternAggregator {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, line: &str) {
        if line.trim().is_empty() { return; }
        let template = masking::mask_line(line);
        let severity = severity::classify(line);
        let timestamp = parser::extract_line_timestamp(line);
        let idx = match self.index.get(&template) {
            Some(&i) => i,
            None => {
                let i = self.records.len();
                self.index.insert(template.clone(), i);
                self.records.push(ErrorPattern {
                    template,
                    count: 0,
                    severity,
                    first_seen: None,
                    last_seen: None,
                    sample_message: line.chars().take(SAMPLE_MAX_CHARS).collect(),
                });
                i
            }
        };
        let rec = &mut self.records[idx];
        rec.count += 1;
        rec.severity = severity;
        if let Some(ts) = timestamp {
            if rec.first_seen.is_none() { rec.first_seen = Some(ts.to_string()); }
            rec.last_seen = Some(ts.to_string());
        }
        self.total += 1;
    }

    /// Lines counted so far across every template.
    pub fn total(&self) -> usize { self.total }

    pub fn distinct(&self) -> usize { self.records.len() }

    /// Rank by count, then severity; insertion order settles the rest.
    pub fn finish(self, max_patterns: usize) -> Vec<ErrorPattern> {
        let mut out = self.records;
        out.sort_by(|a, b| b.count.cmp(&a.count).then(a.severity.rank().cmp(&b.severity.rank())));
        out.truncate(max_patterns);
        out
    }
}

/// Aggregate the reportable lines of a text blob.
pub fn extract_patterns(content: &str, max_patterns: usize) -> Vec<ErrorPattern> {
    if content.trim().is_empty() { return Vec::new(); }
    let mut agg = PatternAggregator::new();
    for line in content.split('\n').filter(|l| window::is_reportable(l)) {
        agg.push(line);
    }
    agg.finish(max_patterns)
}
