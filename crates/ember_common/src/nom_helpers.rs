//! nom helpers

use nom::bytes::complete::take_while;
use nom::character::complete::{char, digit1, satisfy};
use nom::combinator::{opt, recognize};
use nom::error::ParseError;
use nom::sequence::pair;
use nom::IResult;

/// Recognizes a word: a letter or `_`, followed by any run of letters, digits and `_`.
pub fn recognize_identifier<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

/// Recognizes a run of ascii digits with an optional fractional part.
///
/// The `.` is only taken when at least one digit follows it, so `3.` recognizes just `3`.
pub fn recognize_decimal<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, &'a str, E> {
    recognize(pair(digit1, opt(pair(char('.'), digit1))))(input)
}
