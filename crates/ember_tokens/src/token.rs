//! A lexical token from a source string, along with the comments collected beside it

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Class code of every identifier
pub const IDENTIFIER_CODE: u8 = 16;
/// Class code of every number
pub const NUMBER_CODE: u8 = 17;
/// Class code of the end-of-input marker
pub const EOF_CODE: u8 = 0;
/// The text carried by the end-of-input marker
pub const EOF_VALUE: &str = "EOF";

/// A reserved word. The discriminant is the word's class code.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Keyword {
    Begin = 1,
    If = 2,
    Then = 3,
    While = 4,
    Do = 5,
    End = 6,
    Main = 7,
    Int = 8,
    Float = 9,
    For = 10,
    Else = 11,
    Double = 12,
    Char = 13,
    Break = 14,
    Continue = 15,
}

impl Keyword {
    /// Gets the class code of this keyword
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Gets the spelling of this keyword
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// An operator or delimiter. The discriminant is the operator's class code.
///
/// Two character spellings (`<=`, `:=`, `++`, ...) are looked up before their one character
/// prefixes by the scanner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter)]
#[repr(u8)]
pub enum Operator {
    #[strum(serialize = "+")]
    Plus = 18,
    #[strum(serialize = "-")]
    Minus = 19,
    #[strum(serialize = "*")]
    Star = 20,
    #[strum(serialize = "/")]
    Div = 21,
    #[strum(serialize = "%")]
    Rem = 22,
    #[strum(serialize = ":=")]
    Define = 23,
    #[strum(serialize = "<")]
    Lt = 24,
    #[strum(serialize = "<>")]
    Neq = 25,
    #[strum(serialize = "<=")]
    Lte = 26,
    #[strum(serialize = ">")]
    Gt = 27,
    #[strum(serialize = ">=")]
    Gte = 28,
    #[strum(serialize = "=")]
    Assign = 29,
    #[strum(serialize = "==")]
    Eq = 30,
    #[strum(serialize = ";")]
    SemiColon = 31,
    #[strum(serialize = "(")]
    LParen = 32,
    #[strum(serialize = ")")]
    RParen = 33,
    #[strum(serialize = "{")]
    LCurly = 34,
    #[strum(serialize = "}")]
    RCurly = 35,
    #[strum(serialize = "#")]
    Hash = 36,
    #[strum(serialize = "++")]
    Increment = 37,
    #[strum(serialize = "--")]
    Decrement = 38,
}

impl Operator {
    /// The longest spelling in the table, in chars
    pub const MAX_LEN: usize = 2;

    /// Gets the class code of this operator
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Gets the spelling of this operator
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind for this token
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    Operator(Operator),
    /// EOF, will only appear at the end of a token sequence
    Eof,
}

impl TokenKind {
    /// Gets the class code for this kind
    pub const fn class_code(&self) -> u8 {
        match self {
            TokenKind::Keyword(keyword) => keyword.code(),
            TokenKind::Identifier => IDENTIFIER_CODE,
            TokenKind::Number => NUMBER_CODE,
            TokenKind::Operator(operator) => operator.code(),
            TokenKind::Eof => EOF_CODE,
        }
    }

    /// Gets the coarse category of this kind
    pub const fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Keyword(_) => TokenCategory::Keyword,
            TokenKind::Identifier => TokenCategory::Identifier,
            TokenKind::Number => TokenCategory::Number,
            TokenKind::Operator(_) => TokenCategory::Operator,
            TokenKind::Eof => TokenCategory::Eof,
        }
    }
}

/// The coarse category of a token, without the table entry
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, IntoStaticStr, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TokenCategory {
    Keyword,
    Identifier,
    Number,
    Operator,
    Eof,
}

impl TokenCategory {
    /// Gets the name of this category
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A lexical token from a source string
#[derive(Clone, PartialEq, Eq)]
pub struct Token<'s> {
    value: &'s str,
    kind: TokenKind,
    span: Span,
}

impl<'s> Token<'s> {
    /// Creates a new token
    pub fn new(value: &'s str, kind: TokenKind, span: Span) -> Self {
        Self { value, kind, span }
    }

    /// Creates the end-of-input marker for a source of `len` bytes
    pub fn eof(len: usize) -> Self {
        Self::new(EOF_VALUE, TokenKind::Eof, Span::empty(len))
    }

    /// Gets the source text of this token
    #[inline]
    pub fn value(&self) -> &'s str {
        self.value
    }

    /// Gets the kind for this token
    #[inline]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Gets the class code for this token
    #[inline]
    pub fn class_code(&self) -> u8 {
        self.kind.class_code()
    }

    /// Gets the coarse category of this token
    #[inline]
    pub fn category(&self) -> TokenCategory {
        self.kind.category()
    }

    /// Checks whether this token is the end-of-input marker
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl Debug for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?}) @ {:?}", self.kind, self.value, self.span)
    }
}

impl Spanned for Token<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind of comment
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `// ...` up to, not including, the next newline
    Line,
    /// `/* ... */`, delimiters included
    Block,
}

/// A comment from a source string. Comments are collected but never reach the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment<'s> {
    text: &'s str,
    kind: CommentKind,
    span: Span,
}

impl<'s> Comment<'s> {
    /// Creates a new comment
    pub fn new(text: &'s str, kind: CommentKind, span: Span) -> Self {
        Self { text, kind, span }
    }

    /// Gets the full text of this comment, delimiters included
    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Gets the kind of this comment
    #[inline]
    pub fn kind(&self) -> CommentKind {
        self.kind
    }
}

impl Spanned for Comment<'_> {
    fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_keyword_codes() {
        assert_eq!(Keyword::Begin.code(), 1);
        assert_eq!(Keyword::End.code(), 6);
        assert_eq!(Keyword::Continue.code(), 15);
        let codes = Keyword::iter().map(Keyword::code).collect::<HashSet<_>>();
        assert_eq!(codes, (1..=15).collect());
    }

    #[test]
    fn test_keyword_lookup_is_exact() {
        assert_eq!(Keyword::from_str("begin").unwrap(), Keyword::Begin);
        assert_eq!(Keyword::from_str("double").unwrap(), Keyword::Double);
        assert!(Keyword::from_str("beginning").is_err());
        assert!(Keyword::from_str("Begin").is_err());
    }

    #[test]
    fn test_operator_codes() {
        assert_eq!(Operator::from_str("<=").unwrap().code(), 26);
        assert_eq!(Operator::from_str("<").unwrap().code(), 24);
        assert_eq!(Operator::from_str("=").unwrap().code(), 29);
        assert_eq!(Operator::from_str("--").unwrap().code(), 38);
        let codes = Operator::iter().map(Operator::code).collect::<HashSet<_>>();
        assert_eq!(codes, (18..=38).collect());
    }

    #[test]
    fn test_operator_display_is_spelling() {
        assert_eq!(Operator::LCurly.to_string(), "{");
        assert_eq!(Operator::RCurly.to_string(), "}");
        assert_eq!(format!("'{}'", Operator::Lte), "'<='");
        for operator in Operator::iter() {
            assert_eq!(operator.to_string(), operator.as_str());
        }
    }

    #[test]
    fn test_operator_spellings_fit_max_len() {
        for operator in Operator::iter() {
            let len = operator.as_str().chars().count();
            assert!((1..=Operator::MAX_LEN).contains(&len), "{operator:?}");
        }
        assert!(Operator::from_str(".").is_err());
        assert!(Operator::from_str("!=").is_err());
    }

    #[test]
    fn test_token_kind_codes() {
        assert_eq!(TokenKind::Identifier.class_code(), 16);
        assert_eq!(TokenKind::Number.class_code(), 17);
        assert_eq!(TokenKind::Eof.class_code(), 0);
        assert_eq!(TokenKind::Keyword(Keyword::While).class_code(), 4);
        assert_eq!(TokenKind::Operator(Operator::Hash).class_code(), 36);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(TokenKind::Keyword(Keyword::Do).category().as_str(), "keyword");
        assert_eq!(TokenCategory::Identifier.as_str(), "identifier");
        assert_eq!(TokenCategory::Eof.to_string(), "eof");
    }

    #[test]
    fn test_eof_token() {
        let eof = Token::eof(12);
        assert!(eof.is_eof());
        assert_eq!(eof.value(), "EOF");
        assert_eq!(eof.class_code(), 0);
        assert_eq!(eof.span(), Span::new(12, 12));
    }
}
