//! PPDB dump parsing
//!
//! Reads the plain-text rule dumps of the Paraphrase Database. Each line has
//! `|||`-separated fields:
//!
//! ```text
//! [X] ||| poder legislativo ||| legislatura ||| features ||| alignment
//! ```
//!
//! Only the LHS (field 1) and RHS (field 2) are used. Gzip-compressed dumps
//! are detected from their magic bytes and decompressed on the fly.

use bstr::ByteSlice;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bytes::{bs_is_damaged, bs_split_fields, bs_tokens};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Error while reading a PPDB dump
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("Failed to open file {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error at line {line_num}: {source}")]
    Io {
        line_num: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed rule at line {line_num}: expected at least 3 fields, found {fields}")]
    Malformed { line_num: usize, fields: usize },
}

/// One rule as it appears in the dump, before any filtering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRule {
    pub line_num: usize,
    pub lhs: Vec<String>,
    pub rhs: Vec<String>,
}

/// PPDB reader that iterates over rules
///
/// Blank lines, lines with encoding damage and lines with invalid UTF-8 are
/// skipped. Each kind is counted separately, so that together with the
/// yielded rules and errors they add up to `line_num()`.
pub struct PpdbReader<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    line_num: usize,
    blank: usize,
    damaged: usize,
    invalid_utf8: usize,
}

impl PpdbReader<Box<dyn BufRead + Send>> {
    /// Create a reader from a file path
    ///
    /// Automatically detects and handles gzip-compressed files.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReaderError> {
        let path = path.as_ref();
        let open_error = |source| ReaderError::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_error)?;
        let mut reader = BufReader::new(file);
        let is_gzip = reader.fill_buf().map_err(open_error)?.starts_with(&GZIP_MAGIC);

        let reader: Box<dyn BufRead + Send> = if is_gzip {
            Box::new(BufReader::new(MultiGzDecoder::new(reader)))
        } else {
            Box::new(reader)
        };
        Ok(Self::from_reader(reader))
    }
}

impl PpdbReader<Cursor<Vec<u8>>> {
    /// Create a reader from a string
    pub fn from_string(text: &str) -> Self {
        Self::from_reader(Cursor::new(text.as_bytes().to_vec()))
    }
}

impl<R: BufRead> PpdbReader<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_num: 0,
            blank: 0,
            damaged: 0,
            invalid_utf8: 0,
        }
    }

    /// Number of empty or whitespace-only lines
    pub fn blank(&self) -> usize {
        self.blank
    }

    /// Number of lines skipped because of encoding damage (`\ x`, `xc3`)
    pub fn damaged(&self) -> usize {
        self.damaged
    }

    /// Number of lines skipped because the LHS or RHS is not valid UTF-8
    pub fn invalid_utf8(&self) -> usize {
        self.invalid_utf8
    }

    /// Number of lines read so far
    pub fn line_num(&self) -> usize {
        self.line_num
    }
}

impl<R: BufRead> Iterator for PpdbReader<R> {
    type Item = Result<RawRule, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(ReaderError::Io {
                        line_num: self.line_num + 1,
                        source,
                    }));
                }
            }
            self.line_num += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                self.blank += 1;
                continue;
            }
            if bs_is_damaged(line) {
                tracing::debug!(line_num = self.line_num, "skipping damaged line");
                self.damaged += 1;
                continue;
            }

            match parse_rule(line, self.line_num) {
                Ok(Some(rule)) => return Some(Ok(rule)),
                Ok(None) => {
                    tracing::debug!(line_num = self.line_num, "skipping line with invalid UTF-8");
                    self.invalid_utf8 += 1;
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse a single dump line into a rule
/// Returns None if the LHS or RHS is not valid UTF-8
fn parse_rule(line: &[u8], line_num: usize) -> Result<Option<RawRule>, ReaderError> {
    let fields = bs_split_fields(line);
    if fields.len() < 3 {
        return Err(ReaderError::Malformed {
            line_num,
            fields: fields.len(),
        });
    }

    let (Some(lhs), Some(rhs)) = (bs_tokens(fields[1]), bs_tokens(fields[2])) else {
        return Ok(None);
    };
    Ok(Some(RawRule { line_num, lhs, rhs }))
}
