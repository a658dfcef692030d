use std::{
	fmt,
	hint::black_box,
	io::Write,
	time::{Duration, Instant},
};

use tracing::debug;

use crate::{report::format_grouped, BenchError, Corpus, Tokenizer};

/// The scale factors measured by default, in reporting order.
pub const SCALE_FACTORS: [usize; 6] = [1, 2, 3, 5, 10, 100];

/// The number of trials at scale 1; larger scales run proportionally fewer.
pub const TRIAL_BUDGET: usize = 200;

/// The number of timed trials at `scale`: `TRIAL_BUDGET / scale`, but at least one.
pub fn repeat_count(scale: usize) -> usize {
	TRIAL_BUDGET.checked_div(scale).unwrap_or(TRIAL_BUDGET).max(1)
}

/// The fastest of the trials run at one scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
	pub scale: usize,
	pub trials: usize,
	pub min: Duration,
	/// The number of tokens the last trial produced.
	pub tokens: usize,
}

impl Measurement {
	pub fn min_nanos(&self) -> u128 {
		self.min.as_nanos()
	}
}

impl fmt::Display for Measurement {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} times: {} ns", self.scale, format_grouped(self.min_nanos()))
	}
}

/// Times `tokenizer` over the corpus repeated `scale` times.
///
/// Each trial drains the token sequence into a `Vec`, so the cost of a lazy tokenizer is measured in full. The first
/// tokenizer error aborts the measurement.
pub fn measure<T: Tokenizer>(tokenizer: &T, corpus: &Corpus, scale: usize) -> Result<Measurement, BenchError> {
	if scale == 0 {
		return Err(BenchError::InvalidScale(scale));
	}

	let text = corpus.repeat(scale);
	let trials = repeat_count(scale);
	let mut min = Duration::MAX;
	let mut tokens = 0;
	for trial in 0..trials {
		let start = Instant::now();
		let produced = tokenizer
			.tokenize(&text)
			.collect::<Result<Vec<_>, _>>()
			.map(|produced| black_box(produced).len());
		let elapsed = start.elapsed();

		tokens = produced.map_err(|source| BenchError::Tokenize { scale, trial, source })?;
		min = min.min(elapsed);
	}

	Ok(Measurement { scale, trials, min, tokens })
}

/// Runs [`measure`] for each scale factor in turn, reporting every result as soon as it is known.
pub struct Benchmark<'a, T> {
	tokenizer: &'a T,
	corpus: &'a Corpus,
	scales: Vec<usize>,
}

impl<'a, T: Tokenizer> Benchmark<'a, T> {
	/// Initializes a new [`Benchmark`] over the default [`SCALE_FACTORS`].
	pub fn new(tokenizer: &'a T, corpus: &'a Corpus) -> Self {
		Benchmark { tokenizer, corpus, scales: SCALE_FACTORS.to_vec() }
	}

	pub fn with_scales(mut self, scales: impl Into<Vec<usize>>) -> Self {
		self.scales = scales.into();
		self
	}

	pub fn scales(&self) -> &[usize] {
		&self.scales
	}

	/// Measures every scale in order and writes one line per scale to `out`.
	///
	/// Lines already written stay written when a later scale fails.
	pub fn run<W: Write>(&self, mut out: W) -> Result<Vec<Measurement>, BenchError> {
		let mut measurements = Vec::with_capacity(self.scales.len());
		for &scale in &self.scales {
			debug!(scale, trials = repeat_count(scale), bytes = scale * self.corpus.len(), "measuring");
			let measurement = measure(self.tokenizer, self.corpus, scale)?;
			debug!(scale, min_ns = %measurement.min_nanos(), tokens = measurement.tokens, "measured");

			writeln!(out, "{measurement}").map_err(BenchError::Output)?;
			out.flush().map_err(BenchError::Output)?;
			measurements.push(measurement);
		}
		Ok(measurements)
	}
}
