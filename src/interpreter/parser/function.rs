use std::iter::Peekable;

use crate::{
    ast::{FunctionDecl, Statement},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            types::{parse_params, parse_return_type},
            utils::{consume_if, expect, parse_identifier, peek_line},
        },
        value::types::TypeValue,
    },
};

/// Parses a function declaration after the `func` keyword.
///
/// The body is either a block or `=> expression;`. An expression body
/// returns its value, unless the function is `void`, in which case it is
/// evaluated for its effects.
///
/// Grammar: `function := "func" ident params (":" type)? (block | "=>"
/// expression ";")`
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<FunctionDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "function name")?;
    let params = parse_params(tokens)?;
    let return_type = parse_return_type(tokens)?;

    let body = if consume_if(tokens, &Token::FatArrow) {
        let expr_line = peek_line(tokens);
        let expr = parse_expression(tokens)?;
        expect(tokens, &Token::Semicolon, "';' after expression body")?;
        if return_type == TypeValue::Void {
            vec![Statement::Expression { expr,
                                         line: expr_line }]
        } else {
            vec![Statement::Return { value: Some(expr),
                                     line:  expr_line, }]
        }
    } else {
        parse_block(tokens)?
    };

    Ok(FunctionDecl { name,
                      params,
                      return_type,
                      body,
                      line })
}
