//! Token records and the token type hierarchy.

use std::{borrow::Cow, fmt};

/// A slice of the input tagged with its [`TokenType`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'t> {
	pub text: &'t str,
	pub ttype: TokenType,
}

impl<'t> Token<'t> {
	pub fn new(text: &'t str, ttype: TokenType) -> Self {
		Token { text, ttype }
	}
}

impl fmt::Debug for Token<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:<50} {}", format!("{:?}", self.text), self.ttype.as_str())
	}
}

macro_rules! token_types {
	($($(#[$meta:meta])* $variant:ident => $name:literal, $short:literal;)*) => {
		/// Every token type a lexer may emit.
		///
		/// `Error`, `Other` and `Escape` are special types that lexers should not emit for valid input; they are used by the
		/// lexing machinery itself.
		#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub enum TokenType {
			$($(#[$meta])* $variant,)*
			/// A token type unknown to this crate, named by its dotted path.
			Custom(&'static str),
		}

		impl TokenType {
			/// The dotted name of the type, e.g. `Name.Tag`.
			pub fn as_str(&self) -> &'static str {
				match *self {
					$(TokenType::$variant => $name,)*
					TokenType::Custom(name) => name,
				}
			}

			/// The short CSS class of the type, e.g. `nt`. Plain text has no class.
			///
			/// Custom types have no short class and return their dotted name; see [`TokenType::css_class`].
			pub fn as_short_str(&self) -> &'static str {
				match *self {
					$(TokenType::$variant => $short,)*
					TokenType::Custom(name) => name,
				}
			}

			/// Looks up a type by its dotted name; unknown names become [`TokenType::Custom`].
			pub fn from_name(name: &'static str) -> Self {
				match name {
					$($name => TokenType::$variant,)*
					other => TokenType::Custom(other),
				}
			}
		}
	};
}

token_types! {
	/// Lexing error.
	Error => "Error", "err";
	/// Text that doesn't belong to the lexer in use.
	Other => "Other", "x";
	/// Treated specially by formatters.
	Escape => "Escape", "esc";

	/// General type for text.
	Text => "Text", "";
	/// Insignificant whitespace.
	Whitespace => "Whitespace", "w";
	/// Significant punctuation.
	Punctuation => "Punctuation", "p";

	Keyword => "Keyword", "k";
	KeywordConstant => "Keyword.Constant", "kc";
	KeywordDeclaration => "Keyword.Declaration", "kd";
	KeywordNamespace => "Keyword.Namespace", "kn";
	KeywordPseudo => "Keyword.Pseudo", "kp";
	KeywordReserved => "Keyword.Reserved", "kr";
	KeywordType => "Keyword.Type", "kt";

	Name => "Name", "n";
	NameAttribute => "Name.Attribute", "na";
	NameBuiltin => "Name.Builtin", "nb";
	NameBuiltinPseudo => "Name.Builtin.Pseudo", "bp";
	NameClass => "Name.Class", "nc";
	NameConstant => "Name.Constant", "no";
	NameDecorator => "Name.Decorator", "nd";
	NameEntity => "Name.Entity", "ni";
	NameException => "Name.Exception", "ne";
	NameFunction => "Name.Function", "nf";
	NameFunctionMagic => "Name.Function.Magic", "fm";
	NameProperty => "Name.Property", "py";
	NameLabel => "Name.Label", "nl";
	NameNamespace => "Name.Namespace", "nn";
	NameOther => "Name.Other", "nx";
	NameTag => "Name.Tag", "nt";
	NameVariable => "Name.Variable", "nv";
	NameVariableClass => "Name.Variable.Class", "vc";
	NameVariableGlobal => "Name.Variable.Global", "vg";
	NameVariableInstance => "Name.Variable.Instance", "vi";
	NameVariableMagic => "Name.Variable.Magic", "vm";

	String => "String", "s";
	StringAffix => "String.Affix", "sa";
	StringBacktick => "String.Backtick", "sb";
	StringChar => "String.Char", "sc";
	StringDelimiter => "String.Delimiter", "dl";
	StringDoc => "String.Doc", "sd";
	StringDouble => "String.Double", "s2";
	StringEscape => "String.Escape", "se";
	StringHeredoc => "String.Heredoc", "sh";
	StringInterpol => "String.Interpol", "si";
	StringOther => "String.Other", "sx";
	StringRegex => "String.Regex", "sr";
	StringSingle => "String.Single", "s1";
	StringSymbol => "String.Symbol", "ss";

	Number => "Number", "m";
	NumberBin => "Number.Bin", "mb";
	NumberFloat => "Number.Float", "mf";
	NumberHex => "Number.Hex", "mh";
	NumberInteger => "Number.Integer", "mi";
	NumberIntegerLong => "Number.Integer.Long", "il";
	NumberOct => "Number.Oct", "mo";

	Literal => "Literal", "l";
	LiteralDate => "Literal.Date", "ld";

	/// Operators, both punctuation and words.
	Operator => "Operator", "o";
	OperatorWord => "Operator.Word", "ow";

	Comment => "Comment", "c";
	CommentHashbang => "Comment.Hashbang", "ch";
	CommentMultiline => "Comment.Multiline", "cm";
	CommentPreproc => "Comment.Preproc", "cp";
	CommentPreprocFile => "Comment.Preproc.File", "cpf";
	CommentSingle => "Comment.Single", "c1";
	CommentSpecial => "Comment.Special", "cs";

	Generic => "Generic", "g";
	GenericDeleted => "Generic.Deleted", "gd";
	GenericEmph => "Generic.Emph", "ge";
	GenericError => "Generic.Error", "gr";
	GenericHeading => "Generic.Heading", "gh";
	GenericInserted => "Generic.Inserted", "gi";
	GenericOutput => "Generic.Output", "go";
	GenericPrompt => "Generic.Prompt", "gp";
	GenericStrong => "Generic.Strong", "gs";
	GenericSubheading => "Generic.Subheading", "gu";
	GenericTraceback => "Generic.Traceback", "gt";
}

impl TokenType {
	/// The enclosing type in the hierarchy, e.g. `Keyword` for `Keyword.Constant`. Top-level types have no parent.
	pub fn parent(&self) -> Option<TokenType> {
		self.as_str().rsplit_once('.').map(|(parent, _)| TokenType::from_name(parent))
	}

	/// The CSS class formatters use for the type.
	///
	/// Known types use their short class. A custom type extends the class of its closest known ancestor with the
	/// remaining parts of its name, so `Name.Tag.Custom` becomes `nt-Custom`.
	pub fn css_class(&self) -> Cow<'static, str> {
		let mut suffix = String::new();
		let mut current = *self;
		while let TokenType::Custom(name) = current {
			let (parent, last) = name.rsplit_once('.').unwrap_or(("", name));
			suffix = format!("-{last}{suffix}");
			if parent.is_empty() {
				return Cow::Owned(suffix[1..].to_string());
			}
			current = TokenType::from_name(parent);
		}
		match current.as_short_str() {
			short if suffix.is_empty() => Cow::Borrowed(short),
			"" => Cow::Owned(suffix[1..].to_string()),
			short => Cow::Owned(format!("{short}{suffix}")),
		}
	}
}

impl fmt::Display for TokenType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
