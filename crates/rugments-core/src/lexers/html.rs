//! Lexer for HTML.

use lazy_static::lazy_static;

use crate::lexer::{Flags, Lexer, Machine, MachineDef, MatchAction::*, RegexLexer, RuleDef::*, StateAction};
use crate::token::{Token, TokenType, TokenType::*};

const TAG_OPEN: &[TokenType] = &[Punctuation, Text, NameTag, Text];
const TAG_CLOSE: &[TokenType] = &[Punctuation, Text, Punctuation, Text, NameTag, Text, Punctuation];

pub const HTML: MachineDef = MachineDef {
	name: "html",
	flags: Flags { ignore_case: true, dot_all: true },
	states: &[
		(
			"root",
			&[
				Regex(r"[^<&]+", Single(Text), StateAction::None),
				Regex(r"&[^\s;]*;", Single(NameEntity), StateAction::None),
				Regex(r"<!\[CDATA\[.*?\]\]>", Single(CommentPreproc), StateAction::None),
				Regex(r"<!--", Single(Comment), StateAction::Push("comment")),
				Regex(r"<\?.*?\?>", Single(CommentPreproc), StateAction::None),
				Regex(r"<![^>]*>", Single(CommentPreproc), StateAction::None),
				Regex(r"(<)(\s*)(script)(\s*)", ByGroups(TAG_OPEN), StateAction::PushMulti(&["script-content", "tag"])),
				Regex(r"(<)(\s*)(style)(\s*)", ByGroups(TAG_OPEN), StateAction::PushMulti(&["style-content", "tag"])),
				Regex(r"(<)(\s*)([\w:.-]+)", ByGroups(&[Punctuation, Text, NameTag]), StateAction::Push("tag")),
				Regex(r"(<)(\s*)(/)(\s*)([\w:.-]+)(\s*)(>)", ByGroups(TAG_CLOSE), StateAction::None),
			],
		),
		(
			"comment",
			&[
				Regex(r"[^-]+", Single(Comment), StateAction::None),
				Regex(r"-->", Single(Comment), StateAction::Pop),
				Regex(r"-", Single(Comment), StateAction::None),
			],
		),
		(
			"tag",
			&[
				Regex(r"\s+", Single(Text), StateAction::None),
				Regex(r"([\w:-]+\s*)(=)(\s*)", ByGroups(&[NameAttribute, Operator, Text]), StateAction::Push("attr")),
				Regex(r"[\w:-]+", Single(NameAttribute), StateAction::None),
				Regex(r"(/)(\s*)(>)", ByGroups(&[Punctuation, Text, Punctuation]), StateAction::Pop),
				Regex(r">", Single(Punctuation), StateAction::Pop),
			],
		),
		(
			"attr",
			&[
				Regex(r#""[^"]*""#, Single(String), StateAction::Pop),
				Regex(r"'[^']*'", Single(String), StateAction::Pop),
				Regex(r"[^\s>]+", Single(String), StateAction::Pop),
			],
		),
		(
			"script-content",
			&[
				Regex(r"[^<]+", Single(Text), StateAction::None),
				Regex(r"(<)(\s*)(/)(\s*)(script)(\s*)(>)", ByGroups(TAG_CLOSE), StateAction::Pop),
				Regex(r"<", Single(Text), StateAction::None),
			],
		),
		(
			"style-content",
			&[
				Regex(r"[^<]+", Single(Text), StateAction::None),
				Regex(r"(<)(\s*)(/)(\s*)(style)(\s*)(>)", ByGroups(TAG_CLOSE), StateAction::Pop),
				Regex(r"<", Single(Text), StateAction::None),
			],
		),
	],
};

lazy_static! {
	pub static ref HTML_MACHINE: Machine = Machine::compile(&HTML).expect("the HTML machine definition is valid");
}

/// Splits HTML into tags, attributes, entities, comments and text.
///
/// Script and style bodies are emitted as plain text.
pub struct HtmlLexer<'t> {
	inner: RegexLexer<'static, 't>,
}

impl<'t> HtmlLexer<'t> {
	pub fn new(text: &'t str) -> Self {
		HtmlLexer { inner: HTML_MACHINE.lex(text) }
	}
}

impl<'t> Iterator for HtmlLexer<'t> {
	type Item = Token<'t>;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next()
	}
}

impl<'t> Lexer<'t> for HtmlLexer<'t> {}
