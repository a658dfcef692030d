use thiserror::Error;

/// A tokenizer failure, located by byte offset into the tokenized text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at byte {offset}")]
pub struct TokenizeError {
	pub offset: usize,
	pub message: String,
}

impl TokenizeError {
	pub fn new(offset: usize, message: impl Into<String>) -> Self {
		TokenizeError { offset, message: message.into() }
	}
}

/// The component under measurement.
///
/// Every call to [`Tokenizer::tokenize`] starts over on the given text. The returned sequence may be lazy, but it must be
/// finite; the harness drains it completely on every trial.
pub trait Tokenizer {
	type Token<'t>;

	fn tokenize<'t>(&self, text: &'t str) -> impl Iterator<Item = Result<Self::Token<'t>, TokenizeError>> + 't;
}
