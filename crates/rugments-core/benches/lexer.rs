extern crate rugments_core;

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rugments_core::{lexers::HtmlLexer, Token};

const TEST_HTML: &str = include_str!("../../../input/test.html");

fn baseline(input: &str) -> Vec<char> {
	input.chars().collect()
}

fn lex(input: &str) -> Vec<Token> {
	HtmlLexer::new(input).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("lex html");

	for n in [1, 10, 100] {
		let input = TEST_HTML.repeat(n);
		group.throughput(Throughput::Bytes(input.len() as u64));
		group.bench_with_input(BenchmarkId::new("baseline", n), &input, |b, input| b.iter(|| baseline(black_box(input))));
		group.bench_with_input(BenchmarkId::new("html lexer", n), &input, |b, input| b.iter(|| lex(black_box(input))));
	}

	group.finish()
}
