#![doc = include_str!("../README.md")]

pub mod spanned;
pub mod token;

pub use spanned::{Span, Spanned};
pub use token::{Comment, CommentKind, Keyword, Operator, Token, TokenCategory, TokenKind};
