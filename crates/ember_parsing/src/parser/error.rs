use ember_tokens::{Keyword, Span};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    /// Index of the token the mismatch was detected at
    pub position: usize,
    /// Span of that token, if the sequence had one at `position`
    pub location: Option<Span>,
    pub non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        position: usize,
        location: impl Into<Option<Span>>,
        non_terminals: impl Into<Vec<&'static str>>,
    ) -> Self {
        Self {
            kind,
            position,
            location: location.into(),
            non_terminal_stack: non_terminals.into(),
        }
    }

    /// The non-terminals being parsed when this error occurred, outermost first
    pub fn trail(&self) -> String {
        self.non_terminal_stack.iter().join(" > ")
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pos = self.position;
        match &self.kind {
            ErrorKind::ExpectedKeyword {
                expected: Keyword::Begin,
                found,
            } => write!(f, "Program must start with 'begin' at pos {pos}, got '{found}'"),
            ErrorKind::ExpectedKeyword { expected, found } => {
                write!(f, "Expected '{expected}' at pos {pos}, got '{found}'")
            }
            ErrorKind::ExpectedIdentifier { found } => {
                write!(f, "Expected identifier at pos {pos}, got '{found}'")
            }
            ErrorKind::ExpectedAssign { found } => {
                write!(f, "Expected '=' after identifier at pos {pos}, got '{found}'")
            }
            ErrorKind::MissingCloseParen { found } => {
                write!(f, "Missing ')' at pos {pos}, got '{found}'")
            }
            ErrorKind::UnexpectedInFactor { found } => {
                write!(f, "Unexpected token in factor at pos {pos}: '{found}'")
            }
            ErrorKind::ExtraTokens { found } => {
                write!(f, "Extra tokens after end at pos {pos}, got '{found}'")
            }
            ErrorKind::NestingTooDeep { limit } => {
                write!(f, "Maximum nesting depth of {limit} exceeded at pos {pos}")
            }
        }
    }
}

/// [SyntaxError] kind. `found` is the value of the offending token, `EOF` past the end.
///
/// Displays without the position, which the [SyntaxError] message adds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedKeyword { expected: Keyword, found: String },
    #[error("Expected identifier, got '{found}'")]
    ExpectedIdentifier { found: String },
    #[error("Expected '=' after identifier, got '{found}'")]
    ExpectedAssign { found: String },
    #[error("Missing ')', got '{found}'")]
    MissingCloseParen { found: String },
    #[error("Unexpected token in factor: '{found}'")]
    UnexpectedInFactor { found: String },
    #[error("Extra tokens after end, got '{found}'")]
    ExtraTokens { found: String },
    #[error("Maximum nesting depth of {limit} exceeded")]
    NestingTooDeep { limit: usize },
}

pub type Result<T = ()> = std::result::Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = SyntaxError::new(
            ErrorKind::ExpectedKeyword {
                expected: Keyword::End,
                found: "b".to_string(),
            },
            4,
            Span::new(10, 11),
            vec!["program"],
        );
        assert_eq!(error.to_string(), "Expected 'end' at pos 4, got 'b'");
        assert_eq!(error.kind.to_string(), "Expected 'end', got 'b'");
    }

    #[test]
    fn test_display_per_kind() {
        let message = |kind: ErrorKind| {
            SyntaxError::new(kind, 3, None::<Span>, Vec::<&str>::new()).to_string()
        };
        let found = || "x".to_string();
        assert_eq!(
            message(ErrorKind::ExpectedKeyword {
                expected: Keyword::Begin,
                found: found()
            }),
            "Program must start with 'begin' at pos 3, got 'x'"
        );
        assert_eq!(
            message(ErrorKind::ExpectedIdentifier { found: found() }),
            "Expected identifier at pos 3, got 'x'"
        );
        assert_eq!(
            message(ErrorKind::ExpectedAssign { found: found() }),
            "Expected '=' after identifier at pos 3, got 'x'"
        );
        assert_eq!(
            message(ErrorKind::MissingCloseParen { found: found() }),
            "Missing ')' at pos 3, got 'x'"
        );
        assert_eq!(
            message(ErrorKind::UnexpectedInFactor { found: found() }),
            "Unexpected token in factor at pos 3: 'x'"
        );
        assert_eq!(
            message(ErrorKind::ExtraTokens { found: found() }),
            "Extra tokens after end at pos 3, got 'x'"
        );
        assert_eq!(
            message(ErrorKind::NestingTooDeep { limit: 10 }),
            "Maximum nesting depth of 10 exceeded at pos 3"
        );
    }

    #[test]
    fn test_trail() {
        let error = SyntaxError::new(
            ErrorKind::UnexpectedInFactor {
                found: ";".to_string(),
            },
            7,
            None::<Span>,
            vec!["program", "statement list", "statement"],
        );
        assert_eq!(error.trail(), "program > statement list > statement");
        assert_eq!(error.location, None);
    }
}
