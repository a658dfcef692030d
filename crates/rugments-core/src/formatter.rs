//! Formatters turn a token stream into highlighted output.

use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use itertools::{Itertools, Position};

use crate::token::{Token, TokenType};

pub trait Formatter {
	/// Returns a "style sheet" for the formatter. What exactly this means depends on the formatter.
	fn stylesheet(&self, _arg: &str) -> String {
		String::new()
	}

	/// Formats a token source into a writer.
	///
	/// The result is always an `io::Result`; there are no specific errors for the formatters.
	fn format<'t, I, W>(&mut self, source: I, out: W) -> io::Result<()>
	where
		I: IntoIterator<Item = Token<'t>>,
		W: Write;
}

macro_rules! with_option {
	($field:ident, $setter:ident, $ty:ty) => {
		pub fn $setter(mut self, value: $ty) -> Self {
			self.$field = value;
			self
		}
	};
}

/// Formats tokens as HTML `<span>` elements classed by token type.
#[derive(Debug, Default)]
pub struct HtmlFormatter {
	pre_class: String,
	pre_styles: String,
	class_prefix: String,
	linenos: bool,
	nowrap: bool,
	classes: HashMap<TokenType, Option<Rc<str>>>,
}

impl HtmlFormatter {
	pub fn new() -> Self {
		HtmlFormatter { pre_class: String::from("highlight"), linenos: true, ..Default::default() }
	}

	with_option!(pre_class, with_pre_class, String);
	with_option!(pre_styles, with_pre_styles, String);
	with_option!(class_prefix, with_class_prefix, String);
	with_option!(linenos, with_linenos, bool);
	with_option!(nowrap, with_nowrap, bool);

	fn class_of(&mut self, ttype: TokenType) -> Option<Rc<str>> {
		let prefix = &self.class_prefix;
		self.classes
			.entry(ttype)
			.or_insert_with(|| match ttype.css_class() {
				class if class.is_empty() => None,
				class => Some(Rc::from(format!("{prefix}{class}"))),
			})
			.clone()
	}

	/// Writes the spans for every token and returns the number of lines written, including a final line without a
	/// line break.
	fn format_lines<'t, I, W>(&mut self, source: I, out: &mut W) -> io::Result<usize>
	where
		I: IntoIterator<Item = Token<'t>>,
		W: Write,
	{
		let mut open: Option<Rc<str>> = None;
		let mut lines = 0;
		let mut partial = false;
		for token in source {
			if token.text.is_empty() {
				continue;
			}
			let class = self.class_of(token.ttype);
			for part in token.text.split('\n').with_position() {
				let last = matches!(part, Position::Last(_) | Position::Only(_));
				let part = part.into_inner();
				if class != open {
					if open.is_some() {
						out.write_all(b"</span>")?;
					}
					if let Some(class) = &class {
						write!(out, "<span class=\"{class}\">")?;
					}
					open = class.clone();
				}
				write_escaped(out, part)?;
				partial |= !part.is_empty();
				if !last {
					if open.take().is_some() {
						out.write_all(b"</span>")?;
					}
					out.write_all(b"\n")?;
					lines += 1;
					partial = false;
				}
			}
		}
		if open.is_some() {
			out.write_all(b"</span>")?;
		}
		Ok(lines + usize::from(partial))
	}

	fn wrap_pre<'t, I, W>(&mut self, source: I, out: &mut W) -> io::Result<usize>
	where
		I: IntoIterator<Item = Token<'t>>,
		W: Write,
	{
		out.write_all(b"<pre")?;
		if !self.pre_class.is_empty() {
			write!(out, " class=\"{}\"", self.pre_class)?;
		}
		if !self.pre_styles.is_empty() {
			write!(out, " style=\"{}\"", self.pre_styles)?;
		}
		// the empty span keeps HTML parsers from dropping leading empty lines
		out.write_all(b"><span></span>")?;
		let lines = self.format_lines(source, out)?;
		out.write_all(b"</pre>\n")?;
		Ok(lines)
	}

	fn wrap_linenos<'t, I, W>(&mut self, source: I, out: &mut W) -> io::Result<usize>
	where
		I: IntoIterator<Item = Token<'t>>,
		W: Write,
	{
		let mut code = Vec::new();
		let lines = self.wrap_pre(source, &mut code)?;
		out.write_all(b"<table")?;
		if !self.pre_class.is_empty() {
			write!(out, " class=\"{}table\"", self.pre_class)?;
		}
		out.write_all(b"><tr><td class=\"linenos\"><pre>")?;
		let width = lines.to_string().len();
		for line in 1..=lines {
			writeln!(out, "{line:>width$}")?;
		}
		out.write_all(b"</pre>\n</td><td class=\"code\">")?;
		out.write_all(&code)?;
		out.write_all(b"</td></tr></table>\n")?;
		Ok(lines)
	}
}

impl Formatter for HtmlFormatter {
	fn format<'t, I, W>(&mut self, source: I, mut out: W) -> io::Result<()>
	where
		I: IntoIterator<Item = Token<'t>>,
		W: Write,
	{
		if self.nowrap {
			self.format_lines(source, &mut out)?;
		} else if self.linenos {
			self.wrap_linenos(source, &mut out)?;
		} else {
			self.wrap_pre(source, &mut out)?;
		}
		Ok(())
	}
}

fn write_escaped<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
	let mut last = 0;
	for (i, byte) in text.bytes().enumerate() {
		let escaped = match byte {
			b'<' => "&lt;",
			b'>' => "&gt;",
			b'&' => "&amp;",
			b'"' => "&quot;",
			b'\'' => "&#39;",
			_ => continue,
		};
		out.write_all(text[last..i].as_bytes())?;
		out.write_all(escaped.as_bytes())?;
		last = i + 1;
	}
	out.write_all(text[last..].as_bytes())
}
