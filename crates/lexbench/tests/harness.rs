extern crate lexbench;

use std::cell::Cell;

use lexbench::*;
use pretty_assertions::assert_eq;

/// Emits one token per character and counts how often it was invoked.
#[derive(Default)]
struct CharTokenizer {
	calls: Cell<usize>,
}

impl Tokenizer for CharTokenizer {
	type Token<'t> = &'t str;

	fn tokenize<'t>(&self, text: &'t str) -> impl Iterator<Item = Result<&'t str, TokenizeError>> + 't {
		self.calls.set(self.calls.get() + 1);
		text.char_indices().map(move |(i, ch)| Ok(&text[i..i + ch.len_utf8()]))
	}
}

/// Fails on any input longer than `limit` bytes.
struct LimitedTokenizer {
	limit: usize,
}

impl Tokenizer for LimitedTokenizer {
	type Token<'t> = usize;

	fn tokenize<'t>(&self, text: &'t str) -> impl Iterator<Item = Result<usize, TokenizeError>> + 't {
		let limit = self.limit;
		(0..text.len()).map(move |offset| if offset < limit { Ok(offset) } else { Err(TokenizeError::new(offset, "input too long")) })
	}
}

fn parse_line(line: &str) -> (usize, u128) {
	let (scale, rest) = line.split_once(" times: ").unwrap();
	let nanos = rest.strip_suffix(" ns").unwrap();
	(scale.parse().unwrap(), nanos.replace(',', "").parse().unwrap())
}

#[test]
fn repeat_counts() {
	let counts: Vec<_> = SCALE_FACTORS.iter().map(|&n| (n, repeat_count(n))).collect();
	assert_eq!(counts, vec![(1, 200), (2, 100), (3, 66), (5, 40), (10, 20), (100, 2)]);
	assert_eq!(repeat_count(1000), 1);
}

#[test]
fn derived_inputs() {
	let corpus = Corpus::from_text("<p>hi</p>").unwrap();
	for n in SCALE_FACTORS {
		let text = corpus.repeat(n);
		assert_eq!(text.len(), n * corpus.len());
		assert!(text.as_bytes().chunks(corpus.len()).all(|chunk| chunk == corpus.text().as_bytes()));
	}
	assert_eq!(corpus.repeat(1), "<p>hi</p>");
}

#[test]
fn single_scale_runs_every_trial() {
	let corpus = Corpus::from_text("<p>hi</p>").unwrap();
	let tokenizer = CharTokenizer::default();
	let mut out = Vec::new();

	let measurements = Benchmark::new(&tokenizer, &corpus).with_scales([1]).run(&mut out).unwrap();

	assert_eq!(tokenizer.calls.get(), 200);
	assert_eq!(measurements.len(), 1);
	assert_eq!(measurements[0].trials, 200);
	let out = String::from_utf8(out).unwrap();
	assert_eq!(out.lines().count(), 1);
	assert!(out.starts_with("1 times: "));
	assert!(out.ends_with(" ns\n"));
}

#[test]
fn largest_scale_runs_two_trials() {
	let corpus = Corpus::from_text("<p>hi</p>").unwrap();
	let tokenizer = CharTokenizer::default();

	let measurement = measure(&tokenizer, &corpus, 100).unwrap();

	assert_eq!(tokenizer.calls.get(), 2);
	assert_eq!(measurement.trials, 2);
	assert_eq!(measurement.tokens, 900);
}

#[test]
fn token_count_scales_with_input() {
	let corpus = Corpus::from_text("<a href='x'>é</a>").unwrap();
	let tokenizer = CharTokenizer::default();
	let k = measure(&tokenizer, &corpus, 1).unwrap().tokens;
	for n in [2, 3, 5, 10] {
		assert_eq!(measure(&tokenizer, &corpus, n).unwrap().tokens, n * k);
	}
}

#[test]
fn reports_every_scale_in_order() {
	let corpus = Corpus::from_text("<p>hi</p>").unwrap();
	let tokenizer = CharTokenizer::default();
	let mut out = Vec::new();

	let measurements = Benchmark::new(&tokenizer, &corpus).run(&mut out).unwrap();

	let expected_calls: usize = SCALE_FACTORS.iter().map(|&n| repeat_count(n)).sum();
	assert_eq!(tokenizer.calls.get(), expected_calls);

	let lines: Vec<_> = String::from_utf8(out).unwrap().lines().map(parse_line).collect();
	assert_eq!(lines.iter().map(|&(n, _)| n).collect::<Vec<_>>(), SCALE_FACTORS.to_vec());
	for ((n, nanos), measurement) in lines.into_iter().zip(&measurements) {
		assert_eq!(n, measurement.scale);
		assert_eq!(nanos, measurement.min_nanos());
	}
}

#[test]
fn tokenizer_failure_stops_the_run() {
	let corpus = Corpus::from_text("<p>hi</p>").unwrap();
	let tokenizer = LimitedTokenizer { limit: 20 };
	let mut out = Vec::new();

	let err = Benchmark::new(&tokenizer, &corpus).run(&mut out).unwrap_err();

	match err {
		BenchError::Tokenize { scale, trial, source } => {
			assert_eq!((scale, trial), (3, 0));
			assert_eq!(source, TokenizeError::new(20, "input too long"));
		}
		other => panic!("unexpected error: {other}"),
	}
	let out = String::from_utf8(out).unwrap();
	let scales: Vec<_> = out.lines().map(|line| parse_line(line).0).collect();
	assert_eq!(scales, vec![1, 2]);
}

#[test]
fn zero_scale_is_rejected() {
	let corpus = Corpus::from_text("x").unwrap();
	assert!(matches!(measure(&CharTokenizer::default(), &corpus, 0), Err(BenchError::InvalidScale(0))));
}

#[test]
fn display_groups_nanoseconds() {
	let measurement = Measurement { scale: 10, trials: 20, min: std::time::Duration::from_nanos(1_234_567), tokens: 0 };
	assert_eq!(measurement.to_string(), "10 times: 1,234,567 ns");
}
