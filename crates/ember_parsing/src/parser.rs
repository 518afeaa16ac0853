//! Validates a token sequence against the grammar
//!
//! ```text
//! Program    := 'begin' StmtList 'end'
//! StmtList   := Stmt { ';' Stmt }
//! Stmt       := Assignment
//! Assignment := IDENTIFIER '=' Expression
//! Expression := ['+'|'-'] Term { ('+'|'-') Term }
//! Term       := Factor { ('*'|'/') Factor }
//! Factor     := IDENTIFIER | NUMBER | '(' Expression ')'
//! ```
//!
//! A `;` directly before `end` is tolerated.

use ember_tokens::token::EOF_VALUE;
use ember_tokens::{Spanned, Token};
use tracing::{debug, trace, warn};

mod error;
mod grammar;

pub use error::*;

/// How many non-terminals may be open at once. Each level of parentheses opens three.
pub const MAX_NESTING: usize = 512;

/// The outcome of validating a token sequence
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Verdict {
    Accepted,
    Rejected(SyntaxError),
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// The error that rejected the tokens
    pub fn error(&self) -> Option<&SyntaxError> {
        match self {
            Verdict::Accepted => None,
            Verdict::Rejected(error) => Some(error),
        }
    }

    /// Index of the token the tokens were rejected at
    pub fn position(&self) -> Option<usize> {
        self.error().map(|error| error.position)
    }
}

impl From<Result> for Verdict {
    fn from(value: Result) -> Self {
        match value {
            Ok(()) => Verdict::Accepted,
            Err(error) => Verdict::Rejected(error),
        }
    }
}

/// Recursive descent parser over a token sequence.
///
/// Only validates, no tree is built. Parsing stops at the first mismatch.
///
/// # Examples
/// ```
/// # use ember_parsing::lexer::tokenize;
/// # use ember_parsing::parser::SyntacticParser;
/// let tokenized = tokenize("begin a = 1; end").unwrap();
/// let mut parser = SyntacticParser::new(&tokenized.tokens);
/// assert!(parser.parse().is_success());
/// ```
#[derive(Debug)]
pub struct SyntacticParser<'t, 's> {
    tokens: &'t [Token<'s>],
    pos: usize,
    non_terminals: Vec<&'static str>,
}

impl<'t, 's> SyntacticParser<'t, 's> {
    /// Creates a new parser over a token sequence, normally one ending with the end-of-input
    /// marker. Running out of tokens is treated the same as reaching that marker.
    pub fn new(tokens: &'t [Token<'s>]) -> Self {
        Self {
            tokens,
            pos: 0,
            non_terminals: vec![],
        }
    }

    /// Parses the whole token sequence from the start. Can be called repeatedly.
    pub fn parse(&mut self) -> Verdict {
        self.pos = 0;
        self.non_terminals.clear();
        let result = self
            .descend(grammar::PROGRAM, grammar::parse_program)
            .and_then(|()| self.expect_end_of_input());
        let verdict = Verdict::from(result);
        match &verdict {
            Verdict::Accepted => debug!("accepted {} tokens", self.tokens.len()),
            Verdict::Rejected(error) => debug!("rejected: {error} (in {})", error.trail()),
        }
        verdict
    }

    /// The index of the current token
    pub fn position(&self) -> usize {
        self.pos
    }

    fn expect_end_of_input(&mut self) -> Result {
        match self.peek() {
            None => Ok(()),
            Some(token) if token.is_eof() => Ok(()),
            Some(token) => Err(self.error(ErrorKind::ExtraTokens {
                found: token.value().to_string(),
            })),
        }
    }

    /// Wrapper function for parsing a non-terminal, which records it on the non-terminal stack.
    ///
    /// Fails instead of descending once [MAX_NESTING] non-terminals are open.
    pub(crate) fn descend<O>(
        &mut self,
        non_terminal: &'static str,
        rule: fn(&mut Self) -> Result<O>,
    ) -> Result<O> {
        if self.non_terminals.len() >= MAX_NESTING {
            warn!("giving up on {non_terminal} at pos={}, nested too deep", self.pos);
            return Err(self.error(ErrorKind::NestingTooDeep { limit: MAX_NESTING }));
        }
        trace!("starting parsing {non_terminal} at pos={}", self.pos);
        self.non_terminals.push(non_terminal);
        let r = rule(self);
        trace!("after parsing {non_terminal} pos={}", self.pos);
        if r.is_ok() {
            self.non_terminals.pop();
        }
        r
    }

    /// peek the current token
    pub(crate) fn peek(&self) -> Option<&'t Token<'s>> {
        self.tokens.get(self.pos)
    }

    /// The value of the current token, for error messages
    pub(crate) fn found(&self) -> String {
        self.peek()
            .map_or(EOF_VALUE, |token| token.value())
            .to_string()
    }

    fn consume(&mut self) -> Option<&'t Token<'s>> {
        let token = self.peek()?;
        trace!("consumed {token:?}");
        self.pos += 1;
        Some(token)
    }

    /// consumes if predicate matches
    pub(crate) fn consume_if<F>(&mut self, predicate: F) -> Option<&'t Token<'s>>
    where
        F: FnOnce(&Token<'s>) -> bool,
    {
        if self.peek().is_some_and(predicate) {
            self.consume()
        } else {
            None
        }
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> SyntaxError {
        let location = self.peek().map(|token| token.span()).or_else(|| {
            self.tokens
                .last()
                .map(|token| token.span().after())
        });
        SyntaxError::new(kind, self.pos, location, self.non_terminals.clone())
    }
}

/// Parses a whole token sequence
pub fn parse(tokens: &[Token<'_>]) -> Verdict {
    SyntacticParser::new(tokens).parse()
}
