use std::str::FromStr;

use ember_common::nom_helpers::{recognize_decimal, recognize_identifier};
use ember_tokens::{CommentKind, Keyword, Operator};
use nom::branch::alt;
use nom::bytes::complete::{tag, take, take_till, take_until, take_while1};
use nom::combinator::{map, recognize, value};
use nom::error::{ErrorKind, FromExternalError, ParseError};
use nom::sequence::{pair, terminated};
use nom::IResult;

type Result<'a, O> = IResult<&'a str, O, ScanError<'a>>;

/// What a single step of the scanner recognized, along with the text it covers
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scanned<'a> {
    Blank,
    Comment(CommentKind, &'a str),
    Keyword(Keyword, &'a str),
    Identifier(&'a str),
    Number(&'a str),
    Operator(Operator, &'a str),
}

/// Error produced by the scanner rules. Both variants keep the input they failed at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScanError<'a> {
    /// No rule accepted this input
    NoMatch(&'a str),
    /// A `/*` with no `*/` after it
    UnterminatedComment(&'a str),
}

impl<'a> ParseError<&'a str> for ScanError<'a> {
    fn from_error_kind(input: &'a str, _kind: ErrorKind) -> Self {
        ScanError::NoMatch(input)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

impl<'a, E> FromExternalError<&'a str, E> for ScanError<'a> {
    fn from_external_error(input: &'a str, _kind: ErrorKind, _e: E) -> Self {
        ScanError::NoMatch(input)
    }
}

/// Runs one step of the scanner. Rules are tried in priority order, the first to match wins.
pub(crate) fn scan(src: &str) -> Result<Scanned> {
    alt((
        scan_blank,
        scan_block_comment,
        scan_line_comment,
        scan_word,
        scan_number,
        scan_operator,
    ))(src)
}

fn scan_blank(src: &str) -> Result<Scanned> {
    value(Scanned::Blank, take_while1(char::is_whitespace))(src)
}

fn scan_block_comment(src: &str) -> Result<Scanned> {
    let (body, _) = tag::<_, _, ScanError>("/*")(src)?;
    let (rest, _) = terminated(take_until::<_, _, ScanError>("*/"), tag("*/"))(body)
        .map_err(|_| nom::Err::Failure(ScanError::UnterminatedComment(src)))?;
    let text = &src[..src.len() - rest.len()];
    Ok((rest, Scanned::Comment(CommentKind::Block, text)))
}

fn scan_line_comment(src: &str) -> Result<Scanned> {
    map(
        recognize(pair(tag("//"), take_till(|c| c == '\n'))),
        |text| Scanned::Comment(CommentKind::Line, text),
    )(src)
}

fn scan_word(src: &str) -> Result<Scanned> {
    map(recognize_identifier, |word: &str| {
        Keyword::from_str(word).map_or(Scanned::Identifier(word), |keyword| {
            Scanned::Keyword(keyword, word)
        })
    })(src)
}

fn scan_number(src: &str) -> Result<Scanned> {
    map(recognize_decimal, Scanned::Number)(src)
}

/// Longest spelling first, so `<=` is never split into `<` and `=`
fn scan_operator(src: &str) -> Result<Scanned> {
    for width in (1..=Operator::MAX_LEN).rev() {
        let Ok((rest, spelling)) = take::<_, _, ScanError>(width)(src) else {
            continue;
        };
        if let Ok(operator) = Operator::from_str(spelling) {
            return Ok((rest, Scanned::Operator(operator, spelling)));
        }
    }
    Err(nom::Err::Error(ScanError::from_error_kind(src, ErrorKind::Tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_blank() {
        let (rest, scanned) = scan(" \t\r\n  x").unwrap();
        assert_eq!(scanned, Scanned::Blank);
        assert_eq!(rest, "x");
    }

    #[test]
    fn test_block_comment() {
        let (rest, scanned) = scan("/* a\n b */c").unwrap();
        assert_eq!(scanned, Scanned::Comment(CommentKind::Block, "/* a\n b */"));
        assert_eq!(rest, "c");
    }

    #[test]
    fn test_block_comment_closer_must_follow_opener() {
        // the `*` of the opener cannot be reused by the closer
        let result = scan("/*/ x");
        assert_eq!(
            result,
            Err(nom::Err::Failure(ScanError::UnterminatedComment("/*/ x")))
        );
    }

    #[test]
    fn test_line_comment_stops_before_newline() {
        let (rest, scanned) = scan("// hello\nx").unwrap();
        assert_eq!(scanned, Scanned::Comment(CommentKind::Line, "// hello"));
        assert_eq!(rest, "\nx");
        let (rest, scanned) = scan("//").unwrap();
        assert_eq!(scanned, Scanned::Comment(CommentKind::Line, "//"));
        assert_eq!(rest, "");
    }

    #[test]
    fn test_comments_before_operators() {
        let (_, scanned) = scan("/ 2").unwrap();
        assert_eq!(scanned, Scanned::Operator(Operator::Div, "/"));
    }

    #[test]
    fn test_parse_keyword() {
        let (rest, scanned) = scan("begin;").unwrap();
        assert_eq!(scanned, Scanned::Keyword(Keyword::Begin, "begin"));
        assert_eq!(rest, ";");
        let (_, scanned) = scan("continue").unwrap();
        assert_eq!(scanned, Scanned::Keyword(Keyword::Continue, "continue"));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        let (rest, scanned) = scan("beginning").unwrap();
        assert_eq!(scanned, Scanned::Identifier("beginning"));
        assert_eq!(rest, "");
        let (_, scanned) = scan("end_").unwrap();
        assert_eq!(scanned, Scanned::Identifier("end_"));
    }

    #[test]
    fn test_number() {
        let (rest, scanned) = scan("42+").unwrap();
        assert_eq!(scanned, Scanned::Number("42"));
        assert_eq!(rest, "+");
        let (_, scanned) = scan("3.14").unwrap();
        assert_eq!(scanned, Scanned::Number("3.14"));
        let (rest, scanned) = scan("3.").unwrap();
        assert_eq!(scanned, Scanned::Number("3"));
        assert_eq!(rest, ".");
        let (rest, scanned) = scan("1.2.3").unwrap();
        assert_eq!(scanned, Scanned::Number("1.2"));
        assert_eq!(rest, ".3");
    }

    #[test]
    fn test_operator_maximal_munch() {
        let cases = [
            ("<=", Operator::Lte),
            ("<>", Operator::Neq),
            (">=", Operator::Gte),
            ("==", Operator::Eq),
            (":=", Operator::Define),
            ("++", Operator::Increment),
            ("--", Operator::Decrement),
            ("<", Operator::Lt),
            ("=", Operator::Assign),
        ];
        for (src, expected) in cases {
            let (rest, scanned) = scan(src).unwrap();
            assert_eq!(scanned, Scanned::Operator(expected, src));
            assert_eq!(rest, "");
        }
    }

    #[test]
    fn test_operator_falls_back_to_one_char() {
        let (rest, scanned) = scan("=+").unwrap();
        assert_eq!(scanned, Scanned::Operator(Operator::Assign, "="));
        assert_eq!(rest, "+");
    }

    #[test]
    fn test_lone_colon_is_not_an_operator() {
        assert!(matches!(scan(":"), Err(nom::Err::Error(_))));
    }

    #[test]
    fn test_no_match() {
        assert!(matches!(scan("@"), Err(nom::Err::Error(_))));
        assert!(matches!(scan(".5"), Err(nom::Err::Error(_))));
    }
}
