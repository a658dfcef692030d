//! Lexers for specific languages.

pub mod html;

pub use html::HtmlLexer;
