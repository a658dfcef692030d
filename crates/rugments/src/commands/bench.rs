use std::io::{stdout, Write};
use std::path::Path;

use lexbench::{Benchmark, Corpus, DEFAULT_CORPUS_PATH};
use tracing::info;

use crate::cli::flags::Bench;
use crate::tokenizer::HtmlTokenizer;
use crate::{Command, CommandInvocationError};

/// A rugments command that times the HTML lexer over a repeated corpus.
pub struct BenchCommand {
	config: Bench,
}

impl BenchCommand {
	/// Initializes a new [`BenchCommand`] instance.
	pub fn new(config: Bench) -> Self {
		BenchCommand { config }
	}

	/// Loads the corpus and writes one report line per scale factor to `out`.
	pub fn execute<W: Write>(&self, out: W) -> Result<(), CommandInvocationError> {
		let path = self.config.input.as_deref().unwrap_or(Path::new(DEFAULT_CORPUS_PATH));
		let corpus = Corpus::load(path)?;
		let tokenizer = HtmlTokenizer::new(self.config.strict);

		let measurements = Benchmark::new(&tokenizer, &corpus).run(out)?;
		info!(scales = measurements.len(), "benchmark finished");
		Ok(())
	}
}

impl Command for BenchCommand {
	fn run(&self) -> Result<(), CommandInvocationError> {
		self.execute(stdout().lock())
	}
}
