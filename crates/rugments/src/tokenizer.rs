use lexbench::{TokenizeError, Tokenizer};
use rugments_core::{lexers::HtmlLexer, Token, TokenType};

/// Exposes [`HtmlLexer`] to the benchmark harness.
///
/// In strict mode the first [`TokenType::Error`] token ends the sequence with a [`TokenizeError`].
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct HtmlTokenizer {
	strict: bool,
}

impl HtmlTokenizer {
	pub fn new(strict: bool) -> Self {
		HtmlTokenizer { strict }
	}
}

impl Tokenizer for HtmlTokenizer {
	type Token<'t> = Token<'t>;

	fn tokenize<'t>(&self, text: &'t str) -> impl Iterator<Item = Result<Token<'t>, TokenizeError>> + 't {
		let strict = self.strict;
		HtmlLexer::new(text).scan(0, move |offset, token| {
			let start = *offset;
			*offset += token.text.len();
			if strict && token.ttype == TokenType::Error {
				Some(Err(TokenizeError::new(start, format!("unexpected {:?}", token.text))))
			} else {
				Some(Ok(token))
			}
		})
	}
}
