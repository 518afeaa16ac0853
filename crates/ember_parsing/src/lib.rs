#![doc = include_str!("../README.md")]

use crate::lexer::{tokenize, LexingError, TokenizedSource};
use crate::parser::Verdict;
use ember_tokens::{Comment, Token};
use thiserror::Error;
use tracing::debug;

pub mod lexer;
pub mod parser;

/// A small program the grammar accepts, suitable as a starting point
pub const EXAMPLE_SOURCE: &str = "begin
a = 1;
b = a + 2 * (3 + 4);
c = -b + 5;
end
";

/// Everything known about a source string after both stages ran
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis<'s> {
    pub tokens: Vec<Token<'s>>,
    pub comments: Vec<Comment<'s>>,
    pub verdict: Verdict,
}

/// Scans then validates `src`.
///
/// A lexing error stops the analysis, a syntax error does not: it is part of the returned
/// [Analysis].
pub fn analyze(src: &str) -> Result<Analysis<'_>, AnalysisError> {
    if src.trim().is_empty() {
        return Err(AnalysisError::EmptySource);
    }
    let TokenizedSource { tokens, comments } = tokenize(src)?;
    let verdict = parser::parse(&tokens);
    debug!("analysis finished, success={}", verdict.is_success());
    Ok(Analysis {
        tokens,
        comments,
        verdict,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("source must not be empty")]
    EmptySource,
    #[error(transparent)]
    Lex(#[from] LexingError),
}
