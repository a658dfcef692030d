mod main_tests {
	use std::ffi::OsString;
	use std::io::Write;

	use crate::{
		cli::flags::{self, Rugments, RugmentsCmd},
		commands::{bench::BenchCommand, highlight::HighlightCommand, CommandInvocationError},
		log_level,
		tokenizer::HtmlTokenizer,
	};
	use lexbench::{BenchError, Tokenizer};
	use pretty_assertions::assert_eq;
	use rugments_core::TokenType;
	use tracing::Level;

	fn args(args: &[&str]) -> Vec<OsString> {
		args.iter().map(OsString::from).collect()
	}

	fn html_file(contents: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents.as_bytes()).unwrap();
		file
	}

	#[test]
	fn parses_bench_flags() {
		let cmd = Rugments::from_vec(args(&["--loglevel", "debug", "bench", "-i", "page.html", "--strict"])).unwrap();

		assert_eq!(cmd.loglevel.as_deref(), Some("debug"));
		match cmd.subcommand {
			RugmentsCmd::Bench(flags::Bench { input, strict }) => {
				assert_eq!(input, Some("page.html".into()));
				assert!(strict);
			}
			_ => unreachable!(),
		}
	}

	#[test]
	fn bench_defaults() {
		match Rugments::from_vec(args(&["bench"])).unwrap().subcommand {
			RugmentsCmd::Bench(flags::Bench { input, strict }) => {
				assert_eq!(input, None);
				assert!(!strict);
			}
			_ => unreachable!(),
		}
	}

	#[test]
	fn parses_highlight_flags() {
		let cmd = Rugments::from_vec(args(&["highlight", "page.html", "--no-linenos", "--class-prefix", "hl-"])).unwrap();

		match cmd.subcommand {
			RugmentsCmd::Highlight(config) => {
				assert_eq!(config.path, std::path::PathBuf::from("page.html"));
				assert!(config.no_linenos);
				assert!(!config.nowrap);
				assert_eq!(config.pre_class, None);
				assert_eq!(config.class_prefix.as_deref(), Some("hl-"));
			}
			_ => unreachable!(),
		}
	}

	#[test]
	fn requires_a_subcommand() {
		assert!(Rugments::from_vec(vec![]).is_err());
	}

	#[test]
	fn log_levels() {
		assert_eq!(log_level(None).unwrap(), Level::WARN);
		assert_eq!(log_level(Some("trace")).unwrap(), Level::TRACE);
		assert!(log_level(Some("loud")).is_err());
	}

	#[test]
	fn tokenizer_reports_errors_in_strict_mode() {
		let text = "<p \"x\">";

		let lenient: Result<Vec<_>, _> = HtmlTokenizer::new(false).tokenize(text).collect();
		assert_eq!(lenient.unwrap().iter().filter(|tok| tok.ttype == TokenType::Error).count(), 2);

		let strict: Result<Vec<_>, _> = HtmlTokenizer::new(true).tokenize(text).collect();
		let err = strict.unwrap_err();
		assert_eq!(err.offset, 3);
	}

	#[test]
	fn bench_writes_a_line_per_scale() {
		let file = html_file("<p>hi</p>\n");
		let cmd = BenchCommand::new(flags::Bench { input: Some(file.path().to_path_buf()), strict: false });
		let mut out = Vec::new();

		cmd.execute(&mut out).unwrap();

		let out = String::from_utf8(out).unwrap();
		let scales: Vec<_> = out.lines().map(|line| line.split(" times: ").next().unwrap()).collect();
		assert_eq!(scales, vec!["1", "2", "3", "5", "10", "100"]);
		assert!(out.lines().all(|line| line.ends_with(" ns")));
	}

	#[test]
	fn bench_fails_before_measuring_without_corpus() {
		let dir = tempfile::tempdir().unwrap();
		let cmd = BenchCommand::new(flags::Bench { input: Some(dir.path().join("missing.html")), strict: false });
		let mut out = Vec::new();

		let err = cmd.execute(&mut out).unwrap_err();

		assert!(matches!(err, CommandInvocationError::Benchmark(BenchError::Fixture { .. })));
		assert!(out.is_empty());
	}

	#[test]
	fn strict_bench_stops_at_the_first_scale() {
		let file = html_file("<p \"x\">");
		let cmd = BenchCommand::new(flags::Bench { input: Some(file.path().to_path_buf()), strict: true });
		let mut out = Vec::new();

		let err = cmd.execute(&mut out).unwrap_err();

		assert!(matches!(err, CommandInvocationError::Benchmark(BenchError::Tokenize { scale: 1, trial: 0, .. })));
		assert!(out.is_empty());
	}

	#[test]
	fn highlight_renders_spans() {
		let file = html_file("<b>x</b>");
		let cmd = HighlightCommand::new(flags::Highlight {
			path: file.path().to_path_buf(),
			nowrap: true,
			no_linenos: false,
			pre_class: None,
			class_prefix: None,
		});
		let mut out = Vec::new();

		cmd.execute(&mut out).unwrap();

		assert_eq!(
			String::from_utf8(out).unwrap(),
			"<span class=\"p\">&lt;</span><span class=\"nt\">b</span><span class=\"p\">&gt;</span>x\
			 <span class=\"p\">&lt;/</span><span class=\"nt\">b</span><span class=\"p\">&gt;</span>"
		);
	}

	#[test]
	fn highlight_reports_unreadable_files() {
		let dir = tempfile::tempdir().unwrap();
		let cmd = HighlightCommand::new(flags::Highlight {
			path: dir.path().join("missing.html"),
			nowrap: false,
			no_linenos: false,
			pre_class: None,
			class_prefix: None,
		});

		assert!(matches!(cmd.execute(Vec::new()), Err(CommandInvocationError::Highlight { .. })));
	}
}
