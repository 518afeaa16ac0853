//! The grammar rules, one function per non-terminal. Tokens are matched on their value.

use crate::parser::{ErrorKind, Result, SyntacticParser};
use ember_tokens::{Keyword, Operator, Token, TokenKind};

pub(crate) const PROGRAM: &str = "program";
const STATEMENT_LIST: &str = "statement list";
const STATEMENT: &str = "statement";
const ASSIGNMENT: &str = "assignment";
const EXPRESSION: &str = "expression";
const TERM: &str = "term";
const FACTOR: &str = "factor";

fn is_keyword(keyword: Keyword) -> impl Fn(&Token) -> bool {
    move |token| token.value() == keyword.as_str()
}

fn is_operator(operator: Operator) -> impl Fn(&Token) -> bool {
    move |token| token.value() == operator.as_str()
}

fn is_additive(token: &Token) -> bool {
    is_operator(Operator::Plus)(token) || is_operator(Operator::Minus)(token)
}

fn is_multiplicative(token: &Token) -> bool {
    is_operator(Operator::Star)(token) || is_operator(Operator::Div)(token)
}

fn expect_keyword(parser: &mut SyntacticParser, keyword: Keyword) -> Result {
    match parser.consume_if(is_keyword(keyword)) {
        Some(_) => Ok(()),
        None => Err(parser.error(ErrorKind::ExpectedKeyword {
            expected: keyword,
            found: parser.found(),
        })),
    }
}

/// `'begin' StmtList 'end'`
pub(crate) fn parse_program(parser: &mut SyntacticParser) -> Result {
    expect_keyword(parser, Keyword::Begin)?;
    parser.descend(STATEMENT_LIST, parse_statement_list)?;
    expect_keyword(parser, Keyword::End)
}

/// `Stmt { ';' Stmt }`, where the statement after the last `;` may be left out before `end`
fn parse_statement_list(parser: &mut SyntacticParser) -> Result {
    parser.descend(STATEMENT, parse_statement)?;
    while parser
        .consume_if(is_operator(Operator::SemiColon))
        .is_some()
    {
        if parser.peek().is_some_and(is_keyword(Keyword::End)) {
            break;
        }
        parser.descend(STATEMENT, parse_statement)?;
    }
    Ok(())
}

fn parse_statement(parser: &mut SyntacticParser) -> Result {
    parser.descend(ASSIGNMENT, parse_assignment)
}

/// `IDENTIFIER '=' Expression`
fn parse_assignment(parser: &mut SyntacticParser) -> Result {
    if parser
        .consume_if(|token| token.kind() == &TokenKind::Identifier)
        .is_none()
    {
        return Err(parser.error(ErrorKind::ExpectedIdentifier {
            found: parser.found(),
        }));
    }
    if parser.consume_if(is_operator(Operator::Assign)).is_none() {
        return Err(parser.error(ErrorKind::ExpectedAssign {
            found: parser.found(),
        }));
    }
    parser.descend(EXPRESSION, parse_expression)
}

/// `['+'|'-'] Term { ('+'|'-') Term }`
fn parse_expression(parser: &mut SyntacticParser) -> Result {
    // unary sign
    parser.consume_if(is_additive);
    parser.descend(TERM, parse_term)?;
    while parser.consume_if(is_additive).is_some() {
        parser.descend(TERM, parse_term)?;
    }
    Ok(())
}

/// `Factor { ('*'|'/') Factor }`
fn parse_term(parser: &mut SyntacticParser) -> Result {
    parser.descend(FACTOR, parse_factor)?;
    while parser.consume_if(is_multiplicative).is_some() {
        parser.descend(FACTOR, parse_factor)?;
    }
    Ok(())
}

/// `IDENTIFIER | NUMBER | '(' Expression ')'`
fn parse_factor(parser: &mut SyntacticParser) -> Result {
    if parser
        .consume_if(|token| matches!(token.kind(), TokenKind::Identifier | TokenKind::Number))
        .is_some()
    {
        return Ok(());
    }
    if parser.consume_if(is_operator(Operator::LParen)).is_some() {
        parser.descend(EXPRESSION, parse_expression)?;
        return match parser.consume_if(is_operator(Operator::RParen)) {
            Some(_) => Ok(()),
            None => Err(parser.error(ErrorKind::MissingCloseParen {
                found: parser.found(),
            })),
        };
    }
    Err(parser.error(ErrorKind::UnexpectedInFactor {
        found: parser.found(),
    }))
}
