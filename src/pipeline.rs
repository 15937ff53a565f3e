//! N-way merge pipeline: reads sorted lists, merges them and writes the result.

use std::error::Error;
use std::fmt::{self, Display};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::merger::merge;
use crate::sink::{SequenceSink, SinkError};
use crate::source::{SequenceSource, SourceError};

/// Merging error.
#[derive(Debug)]
pub enum MergeError {
    /// Input reading or parsing error.
    Source(SourceError),
    /// Output writing error.
    Sink(SinkError),
}

impl Error for MergeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(match &self {
            MergeError::Source(err) => err,
            MergeError::Sink(err) => err,
        })
    }
}

impl Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self {
            MergeError::Source(err) => write!(f, "input error: {}", err),
            MergeError::Sink(err) => write!(f, "output error: {}", err),
        }
    }
}

impl From<SourceError> for MergeError {
    fn from(err: SourceError) -> Self {
        MergeError::Source(err)
    }
}

impl From<SinkError> for MergeError {
    fn from(err: SinkError) -> Self {
        MergeError::Sink(err)
    }
}

/// Path standing for the standard input or output stream.
pub const STD_STREAM: &str = "-";

/// Merge run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of lists read.
    pub lists: usize,
    /// Number of items written.
    pub items: usize,
}

/// N-way merger builder. Provides methods for [`NWayMerger`] initialization.
#[derive(Debug, Clone, Default)]
pub struct NWayMergerBuilder {
    /// Reject unsorted input lists.
    sorted_check: bool,
    /// File read/write buffer size.
    rw_buf_size: Option<usize>,
}

impl NWayMergerBuilder {
    /// Creates an instance of a builder with default parameters.
    pub fn new() -> Self {
        NWayMergerBuilder::default()
    }

    /// Builds an [`NWayMerger`] instance using provided configuration.
    pub fn build(self) -> NWayMerger {
        NWayMerger {
            source: SequenceSource::new().with_sorted_check(self.sorted_check),
            rw_buf_size: self.rw_buf_size,
        }
    }

    /// Makes unsorted input lists an error instead of an undefined result.
    pub fn with_sorted_check(mut self, sorted_check: bool) -> NWayMergerBuilder {
        self.sorted_check = sorted_check;
        return self;
    }

    /// Sets file read/write buffer size.
    pub fn with_rw_buf_size(mut self, buf_size: usize) -> NWayMergerBuilder {
        self.rw_buf_size = Some(buf_size);
        return self;
    }
}

/// N-way merger.
#[derive(Debug, Clone)]
pub struct NWayMerger {
    source: SequenceSource,
    /// File read/write buffer size.
    rw_buf_size: Option<usize>,
}

impl NWayMerger {
    /// Merges lists read from the input file and writes the result to the output file.
    /// The input is completely read before the output file is created,
    /// so an input error never truncates an existing output.
    ///
    /// # Arguments
    /// * `input` - File holding the lists to be merged
    /// * `output` - File the merged list is written to
    pub fn merge_files(&self, input: &Path, output: &Path) -> Result<MergeSummary, MergeError> {
        let lists = self.source.read_file(input, self.rw_buf_size)?;
        let mut sink = SequenceSink::create_file(output, self.rw_buf_size)?;

        let summary = self.merge_lists(&lists, &mut sink)?;
        log::info!(
            "{} lists merged into {} ({} items)",
            summary.lists,
            output.display(),
            summary.items
        );

        return Ok(summary);
    }

    /// Merges lists read from the input path and writes the result to the output path,
    /// [`STD_STREAM`] stands for the standard input or output respectively.
    /// The input is completely read before the output is opened.
    ///
    /// # Arguments
    /// * `input` - File holding the lists to be merged or [`STD_STREAM`]
    /// * `output` - File the merged list is written to or [`STD_STREAM`]
    pub fn merge_paths(&self, input: &Path, output: &Path) -> Result<MergeSummary, MergeError> {
        if input == Path::new(STD_STREAM) {
            self.merge_stream_into(io::stdin().lock(), output)
        } else {
            let lists = self.source.read_file(input, self.rw_buf_size)?;
            self.write_lists(&lists, output)
        }
    }

    /// Merges lists read from the reader and writes the result to the output path
    /// ([`STD_STREAM`] for the standard output).
    /// The reader is consumed completely before the output file is created,
    /// so an input error never truncates an existing output.
    ///
    /// # Arguments
    /// * `reader` - Input stream the lists are fetched from
    /// * `output` - File the merged list is written to or [`STD_STREAM`]
    pub fn merge_stream_into<R: BufRead>(&self, reader: R, output: &Path) -> Result<MergeSummary, MergeError> {
        let lists = self.source.read(reader)?;
        self.write_lists(&lists, output)
    }

    fn write_lists(&self, lists: &[Vec<i64>], output: &Path) -> Result<MergeSummary, MergeError> {
        let summary = if output == Path::new(STD_STREAM) {
            let mut sink = SequenceSink::new(io::stdout().lock());
            self.merge_lists(lists, &mut sink)?
        } else {
            let mut sink = SequenceSink::create_file(output, self.rw_buf_size)?;
            self.merge_lists(lists, &mut sink)?
        };
        log::info!(
            "{} lists merged into {} ({} items)",
            summary.lists,
            output.display(),
            summary.items
        );

        return Ok(summary);
    }

    /// Merges lists read from the reader and writes the result to the writer.
    ///
    /// # Arguments
    /// * `reader` - Input stream the lists are fetched from
    /// * `writer` - Output stream the merged list is written to
    pub fn merge_streams<R, W>(&self, reader: R, writer: W) -> Result<MergeSummary, MergeError>
    where
        R: BufRead,
        W: Write,
    {
        let lists = self.source.read(reader)?;
        let mut sink = SequenceSink::new(writer);

        let summary = self.merge_lists(&lists, &mut sink)?;
        log::info!("{} lists merged ({} items)", summary.lists, summary.items);

        return Ok(summary);
    }

    fn merge_lists<W: Write>(
        &self,
        lists: &[Vec<i64>],
        sink: &mut SequenceSink<W>,
    ) -> Result<MergeSummary, MergeError> {
        log::debug!("merging {} lists ...", lists.len());
        let merged: Vec<i64> = merge(lists);

        log::debug!("saving merged data");
        let items = sink.write(&merged)?;

        return Ok(MergeSummary {
            lists: lists.len(),
            items,
        });
    }
}

#[cfg(test)]
mod test {
    use std::error::Error;
    use std::fs;
    use std::path::{Path, PathBuf};

    use rstest::*;

    use super::{MergeError, MergeSummary, NWayMergerBuilder, STD_STREAM};
    use crate::source::SourceError;

    #[fixture]
    fn tmp_dir() -> tempfile::TempDir {
        tempfile::tempdir_in("./").unwrap()
    }

    fn create_input_file(dir: &tempfile::TempDir, name: &str, lists_number: usize, lists: &[&str]) -> PathBuf {
        let path = dir.path().join(name);
        let mut content = format!("{}\n", lists_number);
        for list in lists {
            content.push_str(list);
            content.push('\n');
        }
        fs::write(&path, content).unwrap();

        return path;
    }

    #[rstest]
    #[case::basic(3, vec!["1 4 5", "2 6 8 9", "0 3 7 10 11"], "0 1 2 3 4 5 6 7 8 9 10 11")]
    #[case::negatives_and_duplicates(
        4,
        vec!["-5 -1 0", "-10 0 0 1", "5 10", "2 3 3"],
        "-10 -5 -1 0 0 0 1 2 3 3 5 10",
    )]
    #[case::empty_list(3, vec!["10 20", "", "5 15"], "5 10 15 20")]
    #[case::single_list(1, vec!["1 2 3 4 5"], "1 2 3 4 5")]
    #[case::all_empty(2, vec!["", ""], "")]
    #[case::demo(3, vec!["-5 0 5 10 15", "1 2 3", "7 9 11"], "-5 0 1 2 3 5 7 9 10 11 15")]
    fn test_merge_files(
        tmp_dir: tempfile::TempDir,
        #[case] lists_number: usize,
        #[case] lists: Vec<&str>,
        #[case] expected_result: &str,
    ) {
        let input = create_input_file(&tmp_dir, "input.txt", lists_number, &lists);
        let output = tmp_dir.path().join("output.txt");

        let merger = NWayMergerBuilder::new().with_rw_buf_size(64).build();
        let summary = merger.merge_files(&input, &output).unwrap();

        let actual_result = fs::read_to_string(&output).unwrap();
        assert_eq!(actual_result, format!("{}\n", expected_result));
        assert_eq!(summary.lists, lists_number);
        assert_eq!(summary.items, expected_result.split_whitespace().count());
    }

    #[rstest]
    fn test_merge_files_empty_input(tmp_dir: tempfile::TempDir) {
        let input = tmp_dir.path().join("input.txt");
        fs::write(&input, "").unwrap();
        let output = tmp_dir.path().join("output.txt");

        let summary = NWayMergerBuilder::new().build().merge_files(&input, &output).unwrap();

        assert_eq!(summary, MergeSummary { lists: 0, items: 0 });
        assert_eq!(fs::read_to_string(&output).unwrap(), "\n");
    }

    #[rstest]
    fn test_merge_files_input_error_keeps_output(tmp_dir: tempfile::TempDir) {
        let input = create_input_file(&tmp_dir, "input.txt", 3, &["1 2", "3"]);
        let output = tmp_dir.path().join("output.txt");
        fs::write(&output, "previous\n").unwrap();

        let result = NWayMergerBuilder::new().build().merge_files(&input, &output);

        match result {
            Err(err @ MergeError::Source(SourceError::UnexpectedEof { .. })) => {
                assert!(err.source().is_some());
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[rstest]
    #[case::truncated("3\n1 2\n3\n")]
    #[case::invalid_count("three\n1 2\n")]
    #[case::invalid_item("1\n1 x\n")]
    fn test_merge_stream_into_input_error_keeps_output(tmp_dir: tempfile::TempDir, #[case] input: &str) {
        let output = tmp_dir.path().join("output.txt");
        fs::write(&output, "previous\n").unwrap();

        let result = NWayMergerBuilder::new().build().merge_stream_into(input.as_bytes(), &output);

        assert!(matches!(result, Err(MergeError::Source(_))), "{:?}", result);
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[rstest]
    fn test_merge_stream_into_file(tmp_dir: tempfile::TempDir) {
        let output = tmp_dir.path().join("output.txt");
        fs::write(&output, "previous\n").unwrap();

        let summary = NWayMergerBuilder::new()
            .with_rw_buf_size(8)
            .build()
            .merge_stream_into("2\n10 20\n5 15\n".as_bytes(), &output)
            .unwrap();

        assert_eq!(summary, MergeSummary { lists: 2, items: 4 });
        assert_eq!(fs::read_to_string(&output).unwrap(), "5 10 15 20\n");
    }

    #[rstest]
    fn test_merge_paths_files(tmp_dir: tempfile::TempDir) {
        let input = create_input_file(&tmp_dir, "input.txt", 2, &["1 3", "2"]);
        let output = tmp_dir.path().join("output.txt");

        let summary = NWayMergerBuilder::new().build().merge_paths(&input, &output).unwrap();

        assert_eq!(summary, MergeSummary { lists: 2, items: 3 });
        assert_eq!(fs::read_to_string(&output).unwrap(), "1 2 3\n");
    }

    #[rstest]
    fn test_merge_paths_input_error_keeps_output(tmp_dir: tempfile::TempDir) {
        let input = create_input_file(&tmp_dir, "input.txt", 2, &["1 3"]);
        let output = tmp_dir.path().join("output.txt");
        fs::write(&output, "previous\n").unwrap();

        let result = NWayMergerBuilder::new().build().merge_paths(&input, &output);

        assert!(matches!(result, Err(MergeError::Source(_))), "{:?}", result);
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous\n");
    }

    #[rstest]
    fn test_merge_paths_missing_input_to_stdout(tmp_dir: tempfile::TempDir) {
        let input = tmp_dir.path().join("missing.txt");

        let result = NWayMergerBuilder::new().build().merge_paths(&input, Path::new(STD_STREAM));

        assert!(
            matches!(result, Err(MergeError::Source(SourceError::Open { .. }))),
            "{:?}",
            result
        );
    }

    #[rstest]
    fn test_merge_files_output_error(tmp_dir: tempfile::TempDir) {
        let input = create_input_file(&tmp_dir, "input.txt", 1, &["1 2"]);
        let output = tmp_dir.path().join("missing").join("output.txt");

        let result = NWayMergerBuilder::new().build().merge_files(&input, &output);

        assert!(matches!(result, Err(MergeError::Sink(_))), "{:?}", result);
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn test_merge_streams_sorted_check(#[case] sorted_check: bool) {
        let merger = NWayMergerBuilder::new().with_sorted_check(sorted_check).build();
        let mut output = Vec::new();

        let result = merger.merge_streams("2\n3 1\n2\n".as_bytes(), &mut output);

        if sorted_check {
            assert!(matches!(result, Err(MergeError::Source(SourceError::Unsorted { .. }))));
            assert!(output.is_empty());
        } else {
            assert_eq!(result.unwrap(), MergeSummary { lists: 2, items: 3 });
            assert_eq!(output.len(), "x x x\n".len());
        }
    }

    #[test]
    fn test_merge_streams_in_parallel() {
        let handles = Vec::from_iter((0..4).map(|idx| {
            std::thread::spawn(move || {
                let input = format!("2\n{} {}\n{}\n", idx, idx + 2, idx + 1);
                let mut output = Vec::new();
                NWayMergerBuilder::new()
                    .build()
                    .merge_streams(input.as_bytes(), &mut output)
                    .unwrap();
                (idx, String::from_utf8(output).unwrap())
            })
        }));

        for handle in handles {
            let (idx, output) = handle.join().unwrap();
            assert_eq!(output, format!("{} {} {}\n", idx, idx + 1, idx + 2));
        }
    }
}
