use std::iter::Peekable;

use crate::{
    ast::{AssignTarget, Expr},
    error::ParseError,
    interpreter::{lexer::Token, parser::core::ParseResult},
};

/// Consumes the next token, which must equal `expected`.
///
/// `what` describes the expected construct for the error message, e.g.
/// `"';' after expression"`.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// `ParseError::Expected` naming `what` and the token found instead, or
/// `UnexpectedEndOfInput` when the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token,
                                                    what: &str)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((tok, line)) if tok == expected => Ok(*line),
        Some((tok, line)) => Err(ParseError::Expected { expected: what.to_string(),
                                                        found:    tok.to_string(),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: what.to_string() }),
    }
}

/// Returns `true` if the next token equals `expected`, without consuming it.
pub(in crate::interpreter::parser) fn check<'a, I>(tokens: &mut Peekable<I>,
                                                   expected: &Token)
                                                   -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    matches!(tokens.peek(), Some((tok, _)) if tok == expected)
}

/// Consumes the next token if it equals `expected`.
pub(in crate::interpreter::parser) fn consume_if<'a, I>(tokens: &mut Peekable<I>,
                                                        expected: &Token)
                                                        -> bool
    where I: Iterator<Item = &'a (Token, usize)>
{
    if check(tokens, expected) {
        tokens.next();
        return true;
    }
    false
}

/// The line of the next token, or `0` at the end of input.
pub(in crate::interpreter::parser) fn peek_line<'a, I>(tokens: &mut Peekable<I>) -> usize
    where I: Iterator<Item = &'a (Token, usize)>
{
    tokens.peek().map_or(0, |(_, line)| *line)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns a `ParseError` if the next token is not an identifier or the
/// input ends.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                              what: &str)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        Some((tok, line)) => Err(ParseError::Expected { expected: what.to_string(),
                                                        found:    tok.to_string(),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: what.to_string() }),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, argument lists, parameter
/// lists and enum bodies. It repeatedly calls `parse_item` to parse one
/// element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := item ("," item)*`
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an unexpected token is encountered,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut items = Vec::new();
    if consume_if(tokens, closing) {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((tok, _)) if tok == closing => break,
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected: format!("',' or {closing}"),
                                                  found:    tok.to_string(),
                                                  line:     *line, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: closing.to_string() });
            },
        }
    }
    Ok(items)
}

/// Turns a parsed expression into the target of an assignment.
///
/// # Errors
/// `InvalidAssignmentTarget` unless the expression is a variable, an
/// element access or a member access.
pub(in crate::interpreter::parser) fn into_assign_target(expr: Expr,
                                                         line: usize)
                                                         -> ParseResult<AssignTarget> {
    match expr {
        Expr::Variable { name, .. } => Ok(AssignTarget::Variable(name)),
        Expr::Index { array, index, .. } => Ok(AssignTarget::Index { array, index }),
        Expr::Member { object, name, .. } => Ok(AssignTarget::Member { object, name }),
        _ => Err(ParseError::InvalidAssignmentTarget { line }),
    }
}
