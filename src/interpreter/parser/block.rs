use std::iter::Peekable;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, statement::parse_statement, utils::expect},
    },
};

/// Parses a braced statement list, including both braces.
///
/// Grammar: `block := "{" statement* "}"`
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LBrace, "'{'")?;
    parse_block_body(tokens)
}

/// Parses statements up to and including the closing `}`.
pub fn parse_block_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(statements);
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string() });
            },
        }
    }
}
