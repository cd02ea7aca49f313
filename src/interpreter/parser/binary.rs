use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, types::parse_type, unary::parse_unary},
    },
};

/// Parses one left-associative precedence level.
///
/// Operands come from `parse_operand`; the loop continues while the next
/// token maps to one of `operators`.
fn parse_level<'a, I>(tokens: &mut Peekable<I>,
                      parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>,
                      operators: &[BinaryOperator])
                      -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_operand(tokens)?;
    loop {
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            let line = *line;
            tokens.next();
            let right = parse_operand(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, parse_logical_and, &[BinaryOperator::Or])
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens, parse_equality, &[BinaryOperator::And])
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                parse_comparison,
                &[BinaryOperator::Equal, BinaryOperator::NotEqual])
}

/// Parses relational operators and type tests.
///
/// `is` binds at this level and takes a type on its right:
/// `shape is Circle`.
///
/// The rule is: `comparison := shift (("<" | "<=" | ">" | ">=") shift | "is"
/// type)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_shift(tokens)?;
    loop {
        if let Some((Token::Is, line)) = tokens.peek() {
            let line = *line;
            tokens.next();
            let ty = parse_type(tokens)?;
            left = Expr::Is { expr: Box::new(left),
                              ty,
                              line };
            continue;
        }
        if let Some((token, line)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && matches!(op,
                       BinaryOperator::Less
                       | BinaryOperator::LessEqual
                       | BinaryOperator::Greater
                       | BinaryOperator::GreaterEqual)
        {
            let line = *line;
            tokens.next();
            let right = parse_shift(tokens)?;
            left = Expr::Binary { left: Box::new(left),
                                  op,
                                  right: Box::new(right),
                                  line };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses bit shifts.
///
/// The rule is: `shift := additive (("<<" | ">>" | ">>>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                parse_additive,
                &[BinaryOperator::ShiftLeft,
                  BinaryOperator::ShiftRight,
                  BinaryOperator::UnsignedShiftRight])
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                parse_multiplicative,
                &[BinaryOperator::Add, BinaryOperator::Subtract])
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_level(tokens,
                parse_unary,
                &[BinaryOperator::Multiply,
                  BinaryOperator::Divide,
                  BinaryOperator::Modulo])
}

/// Maps a token to the binary operator it spells, if any.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::OrOr => Some(BinaryOperator::Or),
        Token::AndAnd => Some(BinaryOperator::And),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::ShiftLeft => Some(BinaryOperator::ShiftLeft),
        Token::ShiftRight => Some(BinaryOperator::ShiftRight),
        Token::UnsignedShiftRight => Some(BinaryOperator::UnsignedShiftRight),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Subtract),
        Token::Star => Some(BinaryOperator::Multiply),
        Token::Slash => Some(BinaryOperator::Divide),
        Token::Percent => Some(BinaryOperator::Modulo),
        _ => None,
    }
}
