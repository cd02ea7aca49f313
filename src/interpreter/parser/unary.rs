use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            types::{is_primitive_type_name, parse_type},
            utils::{
                check, consume_if, expect, into_assign_target, parse_comma_separated,
                parse_identifier,
            },
        },
    },
};

/// Parses prefix operators.
///
/// `++x` and `--x` are rewritten to `x = x + 1` and `x = x - 1`.
///
/// The rule is: `unary := ("-" | "!" | "++" | "--") unary | postfix`
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return parse_postfix(tokens);
    };
    let line = *line;
    let op = match token {
        Token::Minus => UnaryOperator::Negate,
        Token::Bang => UnaryOperator::Not,
        Token::PlusPlus | Token::MinusMinus => {
            let step = if matches!(token, Token::PlusPlus) {
                BinaryOperator::Add
            } else {
                BinaryOperator::Subtract
            };
            tokens.next();
            let operand = parse_unary(tokens)?;
            return desugar_step(operand, step, line);
        },
        _ => return parse_postfix(tokens),
    };
    tokens.next();

    let expr = parse_unary(tokens)?;
    Ok(Expr::Unary { op,
                     expr: Box::new(expr),
                     line })
}

/// Parses member access, method calls, indexing and postfix `++`/`--`.
///
/// Postfix steps desugar exactly like prefix ones, so both yield the
/// updated value.
///
/// The rule is: `postfix := primary ("." ident ("(" args ")")? | "[" expr
/// "]" | "++" | "--")*`
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut expr = parse_primary(tokens)?;

    loop {
        let Some((token, line)) = tokens.peek() else {
            break;
        };
        let line = *line;
        match token {
            Token::Dot => {
                tokens.next();
                let name = parse_identifier(tokens, "member name after '.'")?;
                expr = if consume_if(tokens, &Token::LParen) {
                    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                    Expr::MethodCall { object: Box::new(expr),
                                       method: name,
                                       arguments,
                                       line }
                } else {
                    Expr::Member { object: Box::new(expr),
                                   name,
                                   line }
                };
            },
            Token::LBracket => {
                tokens.next();
                let index = parse_expression(tokens)?;
                expect(tokens, &Token::RBracket, "']' after index")?;
                expr = Expr::Index { array: Box::new(expr),
                                     index: Box::new(index),
                                     line };
            },
            Token::PlusPlus => {
                tokens.next();
                expr = desugar_step(expr, BinaryOperator::Add, line)?;
            },
            Token::MinusMinus => {
                tokens.next();
                expr = desugar_step(expr, BinaryOperator::Subtract, line)?;
            },
            _ => break,
        }
    }

    Ok(expr)
}

/// Parses literals, names, calls, `this`, `new`, grouping and array
/// literals.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let literal = |value, line: &usize| -> ParseResult<Expr> {
        Ok(Expr::Literal { value,
                           line: *line })
    };

    match tokens.next() {
        Some((Token::IntLiteral(n), line)) => literal(LiteralValue::Int(*n), line),
        Some((Token::FloatLiteral(n), line)) => literal(LiteralValue::Float(*n), line),
        Some((Token::DoubleLiteral(n), line)) => literal(LiteralValue::Double(*n), line),
        Some((Token::DecimalLiteral(n), line)) => literal(LiteralValue::Decimal(*n), line),
        Some((Token::StringLiteral(s), line)) => literal(LiteralValue::String(s.clone()), line),
        Some((Token::CharLiteral(c), line)) => literal(LiteralValue::Char(*c), line),
        Some((Token::BoolLiteral(b), line)) => literal(LiteralValue::Bool(*b), line),
        Some((Token::Identifier(name), line)) => {
            if consume_if(tokens, &Token::LParen) {
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                return Ok(Expr::Call { name: name.clone(),
                                       arguments,
                                       line: *line });
            }
            Ok(Expr::Variable { name: name.clone(),
                                line: *line })
        },
        Some((Token::This, line)) => Ok(Expr::This { line: *line }),
        Some((Token::New, line)) => {
            let class = parse_identifier(tokens, "class name after 'new'")?;
            expect(tokens, &Token::LParen, "'(' after class name")?;
            let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
            Ok(Expr::New { class,
                           arguments,
                           line: *line })
        },
        Some((Token::LParen, _)) => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::RParen, "')' after expression")?;
            Ok(expr)
        },
        Some((Token::LBracket, line)) => parse_array_literal(tokens, *line),
        Some((tok, line)) => Err(ParseError::UnexpectedToken { token: tok.to_string(),
                                                               line:  *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "expression".to_string() }),
    }
}

/// Parses the rest of an array literal after `[`.
///
/// A `:Type` suffix names the element type. It is only recognised when it
/// can't be the `:` of an enclosing construct: after an empty literal, or
/// when followed by a primitive type name.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;

    let mut element_type = None;
    if check(tokens, &Token::Colon) {
        let mut lookahead = tokens.clone();
        lookahead.next();
        let names_type = match lookahead.peek() {
            Some((Token::Identifier(name), _)) => {
                elements.is_empty() || is_primitive_type_name(name)
            },
            _ => false,
        };
        if names_type {
            tokens.next();
            element_type = Some(parse_type(tokens)?);
        }
    }

    Ok(Expr::ArrayLiteral { elements,
                            element_type,
                            line })
}

/// Rewrites `target++` / `target--` into an assignment.
fn desugar_step(operand: Expr, op: BinaryOperator, line: usize) -> ParseResult<Expr> {
    let target = into_assign_target(operand, line)?;
    let value = Expr::Binary { left: Box::new(target.to_expr(line)),
                               op,
                               right: Box::new(Expr::Literal { value: LiteralValue::Int(1),
                                                               line }),
                               line };
    Ok(Expr::Assign { target,
                      value: Box::new(value),
                      line })
}
