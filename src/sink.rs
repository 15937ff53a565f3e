//! Merged list text sink.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs;
use std::io::{self, prelude::*};
use std::path::{Path, PathBuf};

/// Sink writing error.
#[derive(Debug)]
pub enum SinkError {
    /// Output file creation error.
    Create { path: PathBuf, source: io::Error },
    /// Common I/O error.
    IO(io::Error),
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(match &self {
            SinkError::Create { source, .. } => source,
            SinkError::IO(err) => err,
        })
    }
}

impl Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            SinkError::Create { path, source } => {
                write!(f, "output file {} not created: {}", path.display(), source)
            }
            SinkError::IO(err) => write!(f, "I/O operation failed: {}", err),
        }
    }
}

/// Writes items on a single space separated line terminated by a line break.
pub struct SequenceSink<W: Write> {
    writer: W,
}

impl SequenceSink<io::BufWriter<fs::File>> {
    /// Creates (or truncates) an output file and wraps it into a buffered sink.
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `buf_size` - File write buffer size, default one is used if [`None`]
    pub fn create_file(path: &Path, buf_size: Option<usize>) -> Result<Self, SinkError> {
        let file = fs::File::create(path).map_err(|err| SinkError::Create {
            path: path.to_path_buf(),
            source: err,
        })?;

        let writer = match buf_size {
            Some(buf_size) => io::BufWriter::with_capacity(buf_size, file),
            None => io::BufWriter::new(file),
        };

        return Ok(SequenceSink::new(writer));
    }
}

impl<W: Write> SequenceSink<W> {
    pub fn new(writer: W) -> Self {
        SequenceSink { writer }
    }

    /// Writes items and flushes the underlying writer.
    /// Returns the number of written items.
    pub fn write<T, I>(&mut self, items: I) -> Result<usize, SinkError>
    where
        T: Display,
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for item in items.into_iter() {
            if count > 0 {
                self.writer.write_all(b" ").map_err(SinkError::IO)?;
            }
            write!(self.writer, "{}", item).map_err(SinkError::IO)?;
            count += 1;
        }

        self.writer.write_all(b"\n").map_err(SinkError::IO)?;
        self.writer.flush().map_err(SinkError::IO)?;

        log::debug!("{} items written", count);
        return Ok(count);
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
