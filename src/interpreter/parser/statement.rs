use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{ArrayLength, CatchClause, Expr, LiteralValue, Statement, SwitchCase, VariableDecl},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_block_body},
            class::{parse_class, parse_enum, parse_interface},
            core::{ParseResult, parse_expression},
            function::parse_function,
            types::{parse_declared_type, parse_type},
            utils::{check, consume_if, expect, parse_identifier, peek_line},
        },
    },
};

/// Parses a single statement.
///
/// Dispatches on the first token: declarations, blocks, control flow and
/// exception handling each have a leading keyword; anything else is an
/// expression statement terminated by `;`.
///
/// # Errors
/// Fails on the first token that does not fit the grammar.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek() else {
        return Err(ParseError::UnexpectedEndOfInput { expected: "statement".to_string() });
    };
    let line = *line;

    match token {
        Token::Let | Token::Const => {
            let is_const = matches!(token, Token::Const);
            tokens.next();
            let decl = parse_variable_decl(tokens, is_const, line)?;
            expect(tokens, &Token::Semicolon, "';' after declaration")?;
            Ok(Statement::VariableDeclaration(Rc::new(decl)))
        },
        Token::Func => {
            tokens.next();
            Ok(Statement::Function(Rc::new(parse_function(tokens, line)?)))
        },
        Token::Static | Token::Class => {
            let is_static = consume_if(tokens, &Token::Static);
            expect(tokens, &Token::Class, "'class' after 'static'")?;
            Ok(Statement::Class(Rc::new(parse_class(tokens, is_static, line)?)))
        },
        Token::Interface => {
            tokens.next();
            Ok(Statement::Interface(Rc::new(parse_interface(tokens, line)?)))
        },
        Token::Enum => {
            tokens.next();
            Ok(Statement::Enum(Rc::new(parse_enum(tokens, line)?)))
        },
        Token::LBrace => Ok(Statement::Block { statements: parse_block(tokens)?,
                                               line }),
        Token::If => {
            tokens.next();
            parse_if(tokens, line)
        },
        Token::While => {
            tokens.next();
            let condition = parse_condition(tokens, "while")?;
            let body = Box::new(parse_statement(tokens)?);
            Ok(Statement::While { condition, body, line })
        },
        Token::Do => {
            tokens.next();
            let body = Box::new(parse_statement(tokens)?);
            expect(tokens, &Token::While, "'while' after do body")?;
            let condition = parse_condition(tokens, "while")?;
            expect(tokens, &Token::Semicolon, "';' after do-while condition")?;
            Ok(Statement::DoWhile { body, condition, line })
        },
        Token::For => {
            tokens.next();
            parse_for(tokens, line)
        },
        Token::Switch => {
            tokens.next();
            parse_switch(tokens, line)
        },
        Token::Break | Token::Continue => {
            let is_break = matches!(token, Token::Break);
            tokens.next();
            expect(tokens, &Token::Semicolon, "';' after jump statement")?;
            Ok(if is_break {
                   Statement::Break { line }
               } else {
                   Statement::Continue { line }
               })
        },
        Token::Return => {
            tokens.next();
            let value = if check(tokens, &Token::Semicolon) {
                None
            } else {
                Some(parse_expression(tokens)?)
            };
            expect(tokens, &Token::Semicolon, "';' after return")?;
            Ok(Statement::Return { value, line })
        },
        Token::Throw => {
            tokens.next();
            let value = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon, "';' after throw")?;
            Ok(Statement::Throw { value, line })
        },
        Token::Try => {
            tokens.next();
            parse_try(tokens, line)
        },
        Token::Include | Token::Use => {
            tokens.next();
            let path = match tokens.next() {
                Some((Token::StringLiteral(path), _)) => path.clone(),
                Some((tok, line)) => {
                    return Err(ParseError::Expected { expected: "module path string".to_string(),
                                                      found:    tok.to_string(),
                                                      line:     *line, });
                },
                None => {
                    let expected = "module path string".to_string();
                    return Err(ParseError::UnexpectedEndOfInput { expected });
                },
            };
            expect(tokens, &Token::Semicolon, "';' after include")?;
            Ok(Statement::Include { path, line })
        },
        _ => {
            let expr = parse_expression(tokens)?;
            expect(tokens, &Token::Semicolon, "';' after expression")?;
            Ok(Statement::Expression { expr, line })
        },
    }
}

/// Parses a variable declaration after `let` or `const`, without the
/// trailing `;`.
///
/// Grammar: `declaration := ident ":" declared_type ("=" expression)?`
pub(in crate::interpreter::parser) fn parse_variable_decl<'a, I>(tokens: &mut Peekable<I>,
                                                                 is_const: bool,
                                                                 line: usize)
                                                                 -> ParseResult<VariableDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "variable name")?;
    expect(tokens, &Token::Colon, "':' and a type after variable name")?;
    let (ty, array_length) = parse_declared_type(tokens)?;
    let initializer = parse_initializer(tokens)?;

    let decl = VariableDecl { name,
                              ty,
                              array_length,
                              initializer,
                              is_const,
                              line };
    validate_declaration(&decl)?;
    Ok(decl)
}

/// Parses an optional `= expression`.
pub(in crate::interpreter::parser) fn parse_initializer<'a, I>(tokens: &mut Peekable<I>)
                                                               -> ParseResult<Option<Expr>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if consume_if(tokens, &Token::Assign) {
        return Ok(Some(parse_expression(tokens)?));
    }
    Ok(None)
}

/// Checks the parts of a declaration that are known before execution.
///
/// A sizeless array needs an initializer, and a literal size must match a
/// literal initializer list. Constants need a value.
pub(in crate::interpreter::parser) fn validate_declaration(decl: &VariableDecl)
                                                           -> ParseResult<()> {
    match (&decl.array_length, &decl.initializer) {
        (Some(ArrayLength::Inferred), None) => {
            return Err(ParseError::MissingArrayInitializer { name: decl.name.clone(),
                                                             line: decl.line, });
        },
        (Some(ArrayLength::Explicit(Expr::Literal { value: LiteralValue::Int(size),
                                                    .. })),
         Some(Expr::ArrayLiteral { elements, .. })) => {
            if usize::try_from(*size).ok() != Some(elements.len()) {
                return Err(ParseError::ArraySizeMismatch { size:  *size,
                                                           count: elements.len(),
                                                           line:  decl.line, });
            }
        },
        _ => {},
    }

    if decl.is_const && decl.initializer.is_none() {
        return Err(ParseError::Other { message: format!("Constant '{}' needs an initializer.",
                                                        decl.name),
                                       line:    decl.line, });
    }

    Ok(())
}

/// Parses `"(" expression ")"` after a keyword.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>, keyword: &str) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, &format!("'(' after '{keyword}'"))?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen, &format!("')' after {keyword} condition"))?;
    Ok(condition)
}

/// Parses an `if` statement with an optional `else` branch; `else if`
/// chains nest in the else branch.
///
/// Grammar: `if := "if" "(" expression ")" statement ("else" statement)?`
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_condition(tokens, "if")?;
    let then_branch = Box::new(parse_statement(tokens)?);
    let else_branch = if consume_if(tokens, &Token::Else) {
        Some(Box::new(parse_statement(tokens)?))
    } else {
        None
    };

    Ok(Statement::If { condition,
                       then_branch,
                       else_branch,
                       line })
}

/// Parses a `for` statement. The three header parts are separated by `:`
/// and each may be empty.
///
/// Grammar: `for := "for" "(" (declaration | expression)? ":" expression?
/// ":" expression? ")" statement`
fn parse_for<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen, "'(' after 'for'")?;

    let init = match tokens.peek() {
        Some((Token::Colon, _)) => None,
        Some((Token::Let | Token::Const, init_line)) => {
            let init_line = *init_line;
            let is_const = matches!(tokens.next(), Some((Token::Const, _)));
            let decl = parse_variable_decl(tokens, is_const, init_line)?;
            Some(Box::new(Statement::VariableDeclaration(Rc::new(decl))))
        },
        _ => {
            let init_line = peek_line(tokens);
            let expr = parse_expression(tokens)?;
            Some(Box::new(Statement::Expression { expr,
                                                  line: init_line }))
        },
    };
    expect(tokens, &Token::Colon, "':' after for initializer")?;

    let condition = if check(tokens, &Token::Colon) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::Colon, "':' after for condition")?;

    let step = if check(tokens, &Token::RParen) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    expect(tokens, &Token::RParen, "')' after for header")?;

    let body = Box::new(parse_statement(tokens)?);

    Ok(Statement::For { init,
                        condition,
                        step,
                        body,
                        line })
}

/// Parses a `switch` statement.
///
/// Grammar: `switch := "switch" "(" expression ")" "{" ("case" expression
/// ":" statement*)* ("default" ":" statement*)? "}"`
fn parse_switch<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let discriminant = parse_condition(tokens, "switch")?;
    expect(tokens, &Token::LBrace, "'{' after switch value")?;

    let mut cases = Vec::new();
    let mut default = None;

    loop {
        match tokens.next() {
            Some((Token::Case, case_line)) => {
                let value = parse_expression(tokens)?;
                expect(tokens, &Token::Colon, "':' after case value")?;
                let body = parse_case_body(tokens)?;
                cases.push(SwitchCase { value,
                                        body,
                                        line: *case_line });
            },
            Some((Token::Default, default_line)) => {
                if default.is_some() {
                    let message = "Duplicate 'default' in switch.".to_string();
                    return Err(ParseError::Other { message,
                                                   line: *default_line });
                }
                expect(tokens, &Token::Colon, "':' after 'default'")?;
                default = Some(parse_case_body(tokens)?);
            },
            Some((Token::RBrace, _)) => break,
            Some((tok, line)) => {
                return Err(ParseError::Expected { expected: "'case', 'default' or '}'".to_string(),
                                                  found:    tok.to_string(),
                                                  line:     *line, });
            },
            None => {
                return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string() });
            },
        }
    }

    Ok(Statement::Switch { discriminant,
                           cases,
                           default,
                           line })
}

/// Statements of one switch arm, up to the next `case`, `default` or `}`.
fn parse_case_body<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut body = Vec::new();
    while let Some((token, _)) = tokens.peek() {
        if matches!(token, Token::Case | Token::Default | Token::RBrace) {
            break;
        }
        body.push(parse_statement(tokens)?);
    }
    Ok(body)
}

/// Parses `try` with its catch clauses and optional `finally`.
///
/// Grammar: `try := "try" block ("catch" "(" ident (":" type)? ")"
/// block)* ("finally" block)?`
fn parse_try<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let body = parse_block(tokens)?;

    let mut catches = Vec::new();
    while let Some((Token::Catch, catch_line)) = tokens.peek() {
        let catch_line = *catch_line;
        tokens.next();
        expect(tokens, &Token::LParen, "'(' after 'catch'")?;
        let name = parse_identifier(tokens, "catch variable name")?;
        let ty = if consume_if(tokens, &Token::Colon) {
            Some(parse_type(tokens)?)
        } else {
            None
        };
        expect(tokens, &Token::RParen, "')' after catch variable")?;
        expect(tokens, &Token::LBrace, "'{' before catch body")?;
        let body = parse_block_body(tokens)?;
        catches.push(CatchClause { name,
                                   ty,
                                   body,
                                   line: catch_line });
    }

    let finally = if consume_if(tokens, &Token::Finally) {
        Some(parse_block(tokens)?)
    } else {
        None
    };

    if catches.is_empty() && finally.is_none() {
        let found = tokens.peek()
                          .map_or_else(|| "end of input".to_string(), |(tok, _)| tok.to_string());
        return Err(ParseError::Expected { expected: "'catch' or 'finally' after try block".to_string(),
                                          found,
                                          line });
    }

    Ok(Statement::Try { body,
                        catches,
                        finally,
                        line })
}
