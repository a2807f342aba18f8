use crate::error::RetrievalError;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailText {
    pub content: String,
    pub total_lines: usize,
}

/// Read at most `max_bytes` from the end of a local file and keep the trailing `tail_lines`
/// lines (`0` keeps every line read). When the read starts mid-file the first line is dropped,
/// so the result never begins with a fragment.
pub fn read_tail(path: &Path, max_bytes: u64, tail_lines: usize) -> Result<TailText, RetrievalError> {
    let meta = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RetrievalError::NotFound(format!("error log file not found: {}", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    if !meta.is_file() {
        return Err(RetrievalError::InvalidArgument(format!("path is not a file: {}", path.display())));
    }

    let file_size = meta.len();
    let bytes_to_read = max_bytes.min(file_size);
    let mut f = File::open(path)?;
    let mut buf = Vec::with_capacity(bytes_to_read as usize);
    if bytes_to_read < file_size {
        f.seek(SeekFrom::Start(file_size - bytes_to_read))?;
    }
    f.take(bytes_to_read).read_to_end(&mut buf)?;

    let start = if bytes_to_read < file_size {
        match buf.iter().position(|&b| b == b'\n') {
            Some(nl) => nl + 1,
            None => buf.len(),
        }
    } else {
        0
    };
    let text = String::from_utf8_lossy(&buf[start..]);

    let lines: Vec<&str> = text.split('\n').collect();
    if tail_lines > 0 && lines.len() > tail_lines {
        let kept = &lines[lines.len() - tail_lines..];
        return Ok(TailText { content: kept.join("\n"), total_lines: tail_lines });
    }
    Ok(TailText { total_lines: lines.len(), content: text.into_owned() })
}
