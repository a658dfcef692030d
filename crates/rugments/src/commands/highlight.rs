use std::fs;
use std::io::{self, stdout, BufWriter, Write};

use rugments_core::{lexers::HtmlLexer, Formatter, HtmlFormatter};

use crate::cli::flags::Highlight;
use crate::{Command, CommandInvocationError};

/// A rugments command that renders a file as highlighted HTML.
pub struct HighlightCommand {
	config: Highlight,
}

impl HighlightCommand {
	/// Initializes a new [`HighlightCommand`] instance.
	pub fn new(config: Highlight) -> Self {
		HighlightCommand { config }
	}

	fn formatter(&self) -> HtmlFormatter {
		let mut formatter = HtmlFormatter::new().with_nowrap(self.config.nowrap).with_linenos(!self.config.no_linenos);
		if let Some(class) = &self.config.pre_class {
			formatter = formatter.with_pre_class(class.clone());
		}
		if let Some(prefix) = &self.config.class_prefix {
			formatter = formatter.with_class_prefix(prefix.clone());
		}
		formatter
	}

	pub fn execute<W: Write>(&self, out: W) -> Result<(), CommandInvocationError> {
		let path = &self.config.path;
		let wrap = |source: io::Error| CommandInvocationError::Highlight { path: path.clone(), source };

		let source = fs::read_to_string(path).map_err(wrap)?;
		let mut out = BufWriter::new(out);
		self.formatter().format(HtmlLexer::new(&source), &mut out).map_err(wrap)?;
		out.flush().map_err(wrap)
	}
}

impl Command for HighlightCommand {
	fn run(&self) -> Result<(), CommandInvocationError> {
		self.execute(stdout().lock())
	}
}
