use std::collections::VecDeque;
use std::io::{self, Read, Seek, SeekFrom};

pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Yields the lines of a seekable source newest-first, reading backward in fixed-size chunks.
///
/// Memory stays at one chunk plus the longest line: the unfinished leading fragment of each
/// chunk is carried into the next (earlier) read instead of being decoded. Lines are split on
/// raw `\n` bytes and decoded lossily one at a time, so a multi-byte character straddling a
/// chunk boundary survives intact. Callers stop early by simply not pulling more lines.
pub struct ReverseLineReader<R> {
    inner: R,
    position: u64,
    chunk_size: usize,
    carry: Vec<u8>,
    ready: VecDeque<String>,
    started: bool,
    finished: bool,
    nonempty: bool,
}

impl<R: Read + Seek> ReverseLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            position: 0,
            chunk_size: chunk_size.max(1),
            carry: Vec::new(),
            ready: VecDeque::new(),
            started: false,
            finished: false,
            nonempty: false,
        }
    }

    fn read_previous_chunk(&mut self) -> io::Result<()> {
        let read_size = (self.chunk_size as u64).min(self.position);
        self.position -= read_size;
        self.inner.seek(SeekFrom::Start(self.position))?;
        let mut chunk = vec![0u8; read_size as usize];
        self.inner.read_exact(&mut chunk)?;
        chunk.extend_from_slice(&self.carry);

        // Everything before the first newline may continue in the earlier chunk.
        let Some(first_nl) = chunk.iter().position(|&b| b == b'\n') else {
            self.carry = chunk;
            return Ok(());
        };
        for piece in chunk[first_nl + 1..].rsplit(|&b| b == b'\n') {
            self.ready.push_back(String::from_utf8_lossy(piece).into_owned());
        }
        chunk.truncate(first_nl);
        self.carry = chunk;
        Ok(())
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        if !self.started {
            self.started = true;
            self.position = self.inner.seek(SeekFrom::End(0))?;
            self.nonempty = self.position > 0;
        }
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Ok(Some(line));
            }
            if self.finished {
                return Ok(None);
            }
            if self.position == 0 {
                self.finished = true;
                if !self.nonempty {
                    return Ok(None);
                }
                let oldest = std::mem::take(&mut self.carry);
                return Ok(Some(String::from_utf8_lossy(&oldest).into_owned()));
            }
            self.read_previous_chunk()?;
        }
    }
}

impl<R: Read + Seek> Iterator for ReverseLineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => None,
            Err(e) => {
                self.finished = true;
                self.ready.clear();
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reversed_forward_split(text: &str) -> Vec<String> {
        text.split('\n').rev().map(str::to_string).collect()
    }

    fn read_back(text: &str, chunk: usize) -> Vec<String> {
        ReverseLineReader::with_chunk_size(Cursor::new(text.as_bytes().to_vec()), chunk)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn matches_reversed_forward_split_for_every_chunk_size() {
        let texts = [
            "one\ntwo\nthree",
            "one\ntwo\nthree\n",
            "\nleading blank\n\n\nrun of blanks\n",
            "single line without newline",
            "\n",
            "a much longer line that will certainly straddle several small chunks\nshort\n",
        ];
        for text in texts {
            for chunk in [1, 2, 3, 5, 7, 16, 8192] {
                assert_eq!(read_back(text, chunk), reversed_forward_split(text), "text={text:?} chunk={chunk}");
            }
        }
    }

    #[test]
    fn empty_source_yields_nothing() {
        assert!(read_back("", 4).is_empty());
    }

    #[test]
    fn multibyte_characters_survive_chunk_boundaries() {
        let text = "Ünïcödé ✓ line\nzweite Zeile ß\n";
        for chunk in 1..12 {
            assert_eq!(read_back(text, chunk), reversed_forward_split(text));
        }
    }

    #[test]
    fn stops_reading_when_caller_stops_pulling() {
        let text: String = (0..10_000).map(|i| format!("line {i}\n")).collect();
        let mut reader = ReverseLineReader::with_chunk_size(Cursor::new(text.into_bytes()), 64);
        assert_eq!(reader.next().unwrap().unwrap(), "");
        assert_eq!(reader.next().unwrap().unwrap(), "line 9999");
        assert_eq!(reader.next().unwrap().unwrap(), "line 9998");
        assert!(reader.position > 60_000);
    }
}
