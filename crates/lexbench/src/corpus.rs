use std::{fs, path::Path};

use tracing::info;

use crate::BenchError;

/// Where the corpus is read from unless told otherwise, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "input/test.html";

/// The base text every benchmark input is built from. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
	text: String,
}

impl Corpus {
	/// Reads the whole file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, BenchError> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| BenchError::Fixture { path: path.to_path_buf(), source })?;
		if text.is_empty() {
			return Err(BenchError::EmptyCorpus { origin: format!("'{}'", path.display()) });
		}

		info!(path = %path.display(), bytes = text.len(), "loaded corpus");
		Ok(Corpus { text })
	}

	pub fn from_text(text: impl Into<String>) -> Result<Self, BenchError> {
		let text = text.into();
		if text.is_empty() {
			return Err(BenchError::EmptyCorpus { origin: "text".to_string() });
		}
		Ok(Corpus { text })
	}

	pub fn text(&self) -> &str {
		&self.text
	}

	pub fn len(&self) -> usize {
		self.text.len()
	}

	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// The corpus concatenated with itself `scale` times.
	pub fn repeat(&self, scale: usize) -> String {
		self.text.repeat(scale)
	}
}
