//! `nway-merge` is a rust N-way merge implementation.
//!
//! N-way merging combines N individually sorted lists into a single sorted one. The lists' current
//! heads are kept in a binary min-heap: the smallest one is popped and replaced by the next item of
//! the same list until every list is exhausted. The heap never grows above one item per list, so the
//! merge takes *m* \* log(*n*) time for *m* items in *n* lists.
//! For more information see [K-way merge algorithm](https://en.wikipedia.org/wiki/K-way_merge_algorithm).
//!
//! # Overview
//!
//! `nway-merge` supports the following features:
//!
//! * **Type agnostic merging:**
//!   the merger works with any [`Ord`] items, either lazily ([`BinaryHeapMerger`]) or collected into
//!   a vector ([`merge`]).
//! * **Text format support:**
//!   lists are read from a plain text input whose first token is the number of lists `N` followed by `N`
//!   lines of whitespace-separated integers. The merged list is written on a single line.
//! * **Input validation:**
//!   malformed input is reported with a line number, unsorted lists can optionally be rejected.
//!
//! # Example
//!
//! ```no_run
//! use std::path;
//!
//! use env_logger;
//! use log;
//!
//! use nway_merge::NWayMergerBuilder;
//!
//! fn main() {
//!     env_logger::Builder::new().filter_level(log::LevelFilter::Debug).init();
//!
//!     let merger = NWayMergerBuilder::new().with_sorted_check(true).build();
//!
//!     let summary = merger
//!         .merge_files(path::Path::new("input.txt"), path::Path::new("output.txt"))
//!         .unwrap();
//!
//!     println!("{} items merged", summary.items);
//! }
//! ```

pub mod merger;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use merger::{merge, BinaryHeapMerger};
pub use pipeline::{MergeError, MergeSummary, NWayMerger, NWayMergerBuilder, STD_STREAM};
pub use sink::{SequenceSink, SinkError};
pub use source::{SequenceSource, SourceError};
