pub(crate) mod flags {
	use std::path::PathBuf;

	xflags::xflags! {
		/// Highlights HTML, and measures how fast the HTML lexer is.
		cmd rugments {
			/// Diagnostics written to stderr: error, warn, info, debug or trace (default: warn).
			optional --loglevel level: String

			/// Time the HTML lexer over the corpus repeated 1, 2, 3, 5, 10 and 100 times.
			cmd bench {
				/// The corpus file (default: input/test.html).
				optional -i, --input path: PathBuf
				/// Fail on the first error token instead of measuring it.
				optional --strict
			}

			/// Write a file to stdout as highlighted HTML.
			cmd highlight {
				required path: PathBuf
				/// Emit only the spans, without a surrounding <pre>.
				optional --nowrap
				/// Leave out the line number table.
				optional --no-linenos
				/// The class of the <pre> element (default: highlight).
				optional --pre-class class: String
				/// Prepended to every token class.
				optional --class-prefix prefix: String
			}
		}
	}
}
