//! Sorted lists text source.
//!
//! The input starts with the number of lists `N` followed by `N` lines, each one holding
//! a whitespace-separated list of integers. A blank line stands for an empty list.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::io::{self, prelude::*};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// Source reading error.
#[derive(Debug)]
pub enum SourceError {
    /// Input file opening error.
    Open { path: PathBuf, source: io::Error },
    /// Common I/O error.
    IO(io::Error),
    /// Lists number is not a non-negative integer.
    InvalidCount { token: String, source: ParseIntError },
    /// Input ended before all the declared lists were read.
    UnexpectedEof { expected: usize, read: usize },
    /// List item is not an integer.
    InvalidItem {
        line: usize,
        token: String,
        source: ParseIntError,
    },
    /// List is not sorted in ascending order, `list` is counted from 1.
    Unsorted { list: usize, line: usize },
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self {
            SourceError::Open { source, .. } => Some(source),
            SourceError::IO(err) => Some(err),
            SourceError::InvalidCount { source, .. } => Some(source),
            SourceError::InvalidItem { source, .. } => Some(source),
            SourceError::UnexpectedEof { .. } | SourceError::Unsorted { .. } => None,
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            SourceError::Open { path, source } => write!(f, "input file {} not opened: {}", path.display(), source),
            SourceError::IO(err) => write!(f, "I/O operation failed: {}", err),
            SourceError::InvalidCount { token, source } => {
                write!(f, "lists number '{}' format error: {}", token, source)
            }
            SourceError::UnexpectedEof { expected, read } => {
                write!(f, "unexpected end of input: {} of {} lists read", read, expected)
            }
            SourceError::InvalidItem { line, token, source } => {
                write!(f, "line {}: item '{}' format error: {}", line, token, source)
            }
            SourceError::Unsorted { list, line } => {
                write!(f, "line {}: list {} is not sorted in ascending order", line, list)
            }
        }
    }
}

/// Sorted lists reader.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    /// Reject lists that are not sorted in ascending order.
    sorted_check: bool,
}

impl SequenceSource {
    /// Creates a source with the sorted check disabled.
    pub fn new() -> Self {
        SequenceSource::default()
    }

    /// Enables or disables the sorted check.
    /// The merge result is undefined for unsorted lists, the check makes them an error instead.
    pub fn with_sorted_check(mut self, sorted_check: bool) -> Self {
        self.sorted_check = sorted_check;
        return self;
    }

    /// Reads lists from a file.
    ///
    /// # Arguments
    /// * `path` - Input file path
    /// * `buf_size` - File read buffer size, default one is used if [`None`]
    pub fn read_file(&self, path: &Path, buf_size: Option<usize>) -> Result<Vec<Vec<i64>>, SourceError> {
        let file = fs::File::open(path).map_err(|err| SourceError::Open {
            path: path.to_path_buf(),
            source: err,
        })?;

        let reader = match buf_size {
            Some(buf_size) => io::BufReader::with_capacity(buf_size, file),
            None => io::BufReader::new(file),
        };

        log::debug!("reading lists from {}", path.display());
        return self.read(reader);
    }

    /// Reads lists from a buffered reader.
    /// An input without any token is treated as zero lists.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Vec<Vec<i64>>, SourceError> {
        let mut lines = reader.lines().enumerate().map(|(idx, line)| (idx + 1, line));

        let lists_number = loop {
            let line = match lines.next() {
                Some((_, line)) => line.map_err(SourceError::IO)?,
                None => {
                    log::debug!("empty input, no lists to read");
                    return Ok(Vec::new());
                }
            };

            let mut tokens = line.split_whitespace();
            if let Some(token) = tokens.next() {
                if tokens.next().is_some() {
                    log::debug!("ignoring the rest of the lists number line");
                }
                break token.parse::<usize>().map_err(|err| SourceError::InvalidCount {
                    token: token.to_string(),
                    source: err,
                })?;
            }
        };

        log::debug!("reading {} lists", lists_number);

        let mut lists = Vec::with_capacity(lists_number);
        for list_idx in 0..lists_number {
            let (line_no, line) = match lines.next() {
                Some((line_no, line)) => (line_no, line.map_err(SourceError::IO)?),
                None => {
                    return Err(SourceError::UnexpectedEof {
                        expected: lists_number,
                        read: list_idx,
                    })
                }
            };

            let list = parse_list(&line, line_no)?;
            if self.sorted_check && !list.windows(2).all(|w| w[0] <= w[1]) {
                return Err(SourceError::Unsorted {
                    list: list_idx + 1,
                    line: line_no,
                });
            }
            lists.push(list);
        }

        if lines.next().is_some() {
            log::debug!("ignoring input after the last list");
        }

        return Ok(lists);
    }
}

fn parse_list(line: &str, line_no: usize) -> Result<Vec<i64>, SourceError> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|err| SourceError::InvalidItem {
                line: line_no,
                token: token.to_string(),
                source: err,
            })
        })
        .collect()
}
