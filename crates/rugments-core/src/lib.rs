//! Syntax highlighting in the manner of Pygments: regex state-machine lexers that split text into typed tokens, and
//! formatters that render those tokens.

pub mod formatter;
pub mod lexer;
pub mod lexers;
pub mod token;

pub use formatter::{Formatter, HtmlFormatter};
pub use lexer::{Lexer, Machine, MachineError, RegexLexer};
pub use token::{Token, TokenType};
