use crate::error::RetrievalError;
use crate::reverse::ReverseLineReader;
use crate::window::{self, LineVerdict, TimeWindow};
use std::io::{Cursor, Read};
use tracing::{debug, trace};

/// Newest-first error and warning lines from a downloaded archive, at most `max_lines` of them
/// (`0` for no cap).
///
/// Members are visited in archive order. Each admitted member is decompressed on its own and
/// scanned backward; the scan of a member ends as soon as a line older than the window shows up.
pub fn collect_archive_errors(payload: &[u8], window: &TimeWindow, max_lines: usize) -> Result<Vec<String>, RetrievalError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(payload))?;
    let mut out = Vec::new();
    let cap = if max_lines == 0 { usize::MAX } else { max_lines };

    for idx in 0..archive.len() {
        let mut member = archive.by_index(idx)?;
        let name = member.name().to_string();
        if member.is_dir() || !window::is_log_member(&name) {
            trace!(member = %name, "not a day-partitioned log member");
            continue;
        }
        if !window::admits_member(&name, window) {
            debug!(member = %name, "member date outside window");
            continue;
        }

        // The header's declared size is untrusted; let the buffer grow with what actually decodes.
        let mut data = Vec::new();
        member.read_to_end(&mut data)?;
        drop(member);

        let before = out.len();
        for line in ReverseLineReader::new(Cursor::new(data)) {
            let line = line?;
            if !window::is_reportable(&line) {
                continue;
            }
            match window::classify_line(&line, window) {
                LineVerdict::Skip => continue,
                LineVerdict::Stop => {
                    debug!(member = %name, "reached lines older than window start");
                    break;
                }
                LineVerdict::Keep => out.push(line),
            }
            if out.len() >= cap {
                break;
            }
        }
        debug!(member = %name, kept = out.len() - before, "member scanned");
        if out.len() >= cap {
            break;
        }
    }
    Ok(out)
}
