use std::iter::Peekable;

use crate::{
    ast::{ArrayLength, Expr, LiteralValue, Param},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{check, consume_if, expect, parse_comma_separated, parse_identifier},
        },
        value::types::TypeValue,
    },
};

const PRIMITIVE_TYPE_NAMES: &[&str] =
    &["int", "float", "double", "decimal", "bool", "boolean", "string", "char", "void"];

/// Returns `true` if `name` spells a built-in type.
#[must_use]
pub fn is_primitive_type_name(name: &str) -> bool {
    PRIMITIVE_TYPE_NAMES.contains(&name)
}

/// Parses a type: a dot-joined name followed by any number of `[]`.
///
/// Grammar: `type := ident ("." ident)* ("[" "]")*`
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeValue>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ty = TypeValue::from_name(&parse_type_path(tokens)?);

    loop {
        let mut lookahead = tokens.clone();
        match (lookahead.next(), lookahead.next()) {
            (Some((Token::LBracket, _)), Some((Token::RBracket, _))) => {
                tokens.next();
                tokens.next();
                ty = ty.array_of();
            },
            _ => break,
        }
    }

    Ok(ty)
}

/// Parses the type of a variable or field declaration, which may carry an
/// array size.
///
/// `T[n]` records an explicit size; `T[]` and `T[0]` leave the size to the
/// initializer. Only the first bracket pair may hold a size.
///
/// Grammar: `declared_type := ident ("." ident)* ("[" expression? "]")*`
pub fn parse_declared_type<'a, I>(tokens: &mut Peekable<I>)
                                  -> ParseResult<(TypeValue, Option<ArrayLength>)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut ty = TypeValue::from_name(&parse_type_path(tokens)?);
    let mut length = None;

    while let Some((Token::LBracket, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        if consume_if(tokens, &Token::RBracket) {
            length.get_or_insert(ArrayLength::Inferred);
        } else {
            let size = parse_expression(tokens)?;
            expect(tokens, &Token::RBracket, "']' after array size")?;
            if length.is_some() {
                let message = "Only the first array dimension can have a size.".to_string();
                return Err(ParseError::Other { message, line });
            }
            length = Some(match size {
                        Expr::Literal { value: LiteralValue::Int(0),
                                        .. } => ArrayLength::Inferred,
                        size => ArrayLength::Explicit(size),
                    });
        }
        ty = ty.array_of();
    }

    Ok((ty, length))
}

/// Parses a parenthesised parameter list.
///
/// Grammar: `params := "(" (ident ":" type ("," ident ":" type)*)? ")"`
pub fn parse_params<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Param>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' before parameters")?;
    parse_comma_separated(tokens, parse_param, &Token::RParen)
}

fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(0, |(_, line)| *line);
    let name = parse_identifier(tokens, "parameter name")?;
    expect(tokens, &Token::Colon, "':' and a type after parameter name")?;
    let ty = parse_type(tokens)?;
    Ok(Param { name, ty, line })
}

/// Parses an optional `: Type` return annotation; absent means `void`.
pub fn parse_return_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<TypeValue>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if check(tokens, &Token::Colon) {
        tokens.next();
        return parse_type(tokens);
    }
    Ok(TypeValue::Void)
}

/// Parses a dot-joined identifier path such as `lib.Vector`.
fn parse_type_path<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut path = parse_identifier(tokens, "type name")?;
    while consume_if(tokens, &Token::Dot) {
        path.push('.');
        path.push_str(&parse_identifier(tokens, "type name after '.'")?);
    }
    Ok(path)
}
