//! Measures how long a tokenizer takes over a corpus repeated at increasing scales.
//!
//! For every scale factor the corpus is repeated that many times, the tokenizer is run over the result in a number of
//! timed trials, and the fastest trial is reported in nanoseconds.

pub mod corpus;
pub mod harness;
pub mod report;
pub mod tokenizer;

use std::{io, path::PathBuf};

use thiserror::Error;

pub use corpus::{Corpus, DEFAULT_CORPUS_PATH};
pub use harness::{measure, repeat_count, Benchmark, Measurement, SCALE_FACTORS, TRIAL_BUDGET};
pub use report::format_grouped;
pub use tokenizer::{TokenizeError, Tokenizer};

/// Defines a benchmark error.
#[derive(Error, Debug)]
pub enum BenchError {
	/// The corpus file is missing or unreadable.
	#[error("unable to read the corpus '{}'", .path.display())]
	Fixture {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("the corpus {origin} is empty")]
	EmptyCorpus { origin: String },

	#[error("scale factors must be positive, got {0}")]
	InvalidScale(usize),

	/// The tokenizer failed during a trial; no later scale is measured.
	#[error("the tokenizer failed during trial {trial} at scale {scale}")]
	Tokenize {
		scale: usize,
		trial: usize,
		#[source]
		source: TokenizeError,
	},

	#[error("unable to write the report")]
	Output(#[source] io::Error),
}
