use std::path::PathBuf;

use lexbench::BenchError;
use thiserror::Error;

pub(crate) mod bench;
pub(crate) mod highlight;

/// Defines a command invocation error.
#[derive(Error, Debug)]
pub enum CommandInvocationError {
	/// The benchmark could not load its corpus, or the tokenizer failed.
	#[error(transparent)]
	Benchmark(#[from] BenchError),

	#[error("unable to highlight '{}'", .path.display())]
	Highlight {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
}

/// A rugments command.
pub(crate) trait Command {
	/// Runs the command.
	fn run(&self) -> Result<(), CommandInvocationError>;
}
