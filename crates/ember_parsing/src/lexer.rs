//! Responsible with converting source text into a token stream and a comment stream

use crate::lexer::token_parsing::{scan, ScanError, Scanned};
use ember_tokens::{Comment, Span, Spanned, Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

mod token_parsing;

/// A single item produced by the [Lexer]
#[derive(Debug, Clone, PartialEq)]
pub enum Lexeme<'s> {
    Token(Token<'s>),
    Comment(Comment<'s>),
}

/// Responsible with converting source text into tokens and comments.
///
/// The lexer is an iterator over [Lexeme]s in source order. After the last real token it yields
/// the end-of-input marker, then stops. Scanning halts at the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'s> {
    src: &'s str,
    offset: usize,
    finished: bool,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            offset: 0,
            finished: false,
        }
    }

    fn next_lexeme(&mut self) -> LexResult<Option<Lexeme<'s>>> {
        while self.offset < self.src.len() {
            let rest = &self.src[self.offset..];
            match scan(rest) {
                Ok((remaining, scanned)) => {
                    let start = self.offset;
                    self.offset = self.src.len() - remaining.len();
                    let span = Span::new(start, self.offset);
                    let lexeme = match scanned {
                        Scanned::Blank => continue,
                        Scanned::Comment(kind, text) => {
                            Lexeme::Comment(Comment::new(text, kind, span))
                        }
                        Scanned::Keyword(keyword, word) => {
                            Lexeme::Token(Token::new(word, TokenKind::Keyword(keyword), span))
                        }
                        Scanned::Identifier(word) => {
                            Lexeme::Token(Token::new(word, TokenKind::Identifier, span))
                        }
                        Scanned::Number(number) => {
                            Lexeme::Token(Token::new(number, TokenKind::Number, span))
                        }
                        Scanned::Operator(operator, spelling) => {
                            Lexeme::Token(Token::new(spelling, TokenKind::Operator(operator), span))
                        }
                    };
                    trace!("scanned {lexeme:?}");
                    return Ok(Some(lexeme));
                }
                Err(nom::Err::Failure(ScanError::UnterminatedComment(at))) => {
                    let offset = self.src.len() - at.len();
                    return Err(self.halt(LexingError::UnterminatedComment { offset }));
                }
                Err(_) => {
                    let ch = rest.chars().next().unwrap_or_default();
                    let offset = self.offset;
                    return Err(self.halt(LexingError::InvalidChar { ch, offset }));
                }
            }
        }

        if self.finished {
            return Ok(None);
        }
        self.finished = true;
        Ok(Some(Lexeme::Token(Token::eof(self.src.len()))))
    }

    fn halt(&mut self, error: LexingError) -> LexingError {
        debug!("lexing halted: {error}");
        self.offset = self.src.len();
        self.finished = true;
        error
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Result<Lexeme<'s>, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_lexeme() {
            Ok(option) => option.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

/// The tokens and comments of a source string, both in source order
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizedSource<'s> {
    /// Always ends with exactly one end-of-input marker
    pub tokens: Vec<Token<'s>>,
    pub comments: Vec<Comment<'s>>,
}

/// Scans all of `src`.
///
/// No partial result is returned on failure.
pub fn tokenize(src: &str) -> Result<TokenizedSource<'_>, LexingError> {
    let mut tokens = vec![];
    let mut comments = vec![];
    for lexeme in Lexer::new(src) {
        match lexeme? {
            Lexeme::Token(token) => tokens.push(token),
            Lexeme::Comment(comment) => comments.push(comment),
        }
    }
    debug!(
        "tokenized {} bytes into {} tokens and {} comments",
        src.len(),
        tokens.len(),
        comments.len()
    );
    Ok(TokenizedSource { tokens, comments })
}

type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    /// A char no scanner rule accepts
    #[error("Unknown character: {ch} at position {offset}")]
    InvalidChar { ch: char, offset: usize },
    /// A `/*` with no matching `*/`
    #[error("Unclosed multi-line comment starting at position {offset}")]
    UnterminatedComment { offset: usize },
}

impl Spanned for LexingError {
    fn span(&self) -> Span {
        match self {
            LexingError::InvalidChar { ch, offset } => Span::new(*offset, offset + ch.len_utf8()),
            LexingError::UnterminatedComment { offset } => Span::new(*offset, offset + 2),
        }
    }
}
