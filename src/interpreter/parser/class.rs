use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{
        Access, Accessors, ClassDecl, ConstructorDecl, EnumDecl, FieldDecl, InterfaceDecl,
        MethodDecl, MethodModifier, MethodSignature, VariableDecl,
    },
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            function::parse_function,
            statement::{parse_initializer, validate_declaration},
            types::{parse_declared_type, parse_params, parse_return_type},
            utils::{consume_if, expect, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses a class declaration after the `class` keyword.
///
/// Grammar: `class := "static"? "class" ident ("::" ident ("," ident)*)? "{"
/// member* "}"`
pub fn parse_class<'a, I>(tokens: &mut Peekable<I>,
                          is_static: bool,
                          line: usize)
                          -> ParseResult<ClassDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "class name")?;

    let mut supertypes = Vec::new();
    if consume_if(tokens, &Token::ColonColon) {
        loop {
            supertypes.push(parse_identifier(tokens, "parent or interface name")?);
            if !consume_if(tokens, &Token::Comma) {
                break;
            }
        }
    }
    expect(tokens, &Token::LBrace, "'{' before class body")?;

    let mut class = ClassDecl { name,
                                is_static,
                                supertypes,
                                fields: Vec::new(),
                                methods: Vec::new(),
                                constructor: None,
                                line };

    while !consume_if(tokens, &Token::RBrace) {
        parse_member(tokens, &mut class)?;
    }

    Ok(class)
}

/// Parses one class member and adds it to `class`.
///
/// Grammar: `member := ("public" | "private")? "static"? ("virt" |
/// "ovrd")? (function | field | constructor)`
fn parse_member<'a, I>(tokens: &mut Peekable<I>, class: &mut ClassDecl) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let access = if consume_if(tokens, &Token::Private) {
        Access::Private
    } else {
        consume_if(tokens, &Token::Public);
        Access::Public
    };
    let is_static = consume_if(tokens, &Token::Static);
    let modifier = if consume_if(tokens, &Token::Virt) {
        MethodModifier::Virtual
    } else if consume_if(tokens, &Token::Ovrd) {
        MethodModifier::Override
    } else {
        MethodModifier::None
    };

    match tokens.next() {
        Some((Token::Func, line)) => {
            let function = Rc::new(parse_function(tokens, *line)?);
            class.methods.push(MethodDecl { function,
                                            access,
                                            is_static,
                                            modifier });
        },
        Some((token @ (Token::Let | Token::Const), line)) => {
            let is_const = matches!(token, Token::Const);
            let (decl, accessors) = parse_field(tokens, is_const, *line)?;
            expect(tokens, &Token::Semicolon, "';' after field")?;
            class.fields.push(FieldDecl { decl: Rc::new(decl),
                                          access,
                                          is_static,
                                          accessors });
        },
        Some((Token::Constructor, line)) => {
            if class.constructor.is_some() {
                let message = format!("Class '{}' already has a constructor.", class.name);
                return Err(ParseError::Other { message,
                                               line: *line });
            }
            if is_static {
                let message = "A constructor cannot be static.".to_string();
                return Err(ParseError::Other { message,
                                               line: *line });
            }
            let params = parse_params(tokens)?;
            let parent_args = if consume_if(tokens, &Token::Colon) {
                expect(tokens, &Token::Parent, "'parent' after ':' in constructor")?;
                expect(tokens, &Token::LParen, "'(' after 'parent'")?;
                Some(parse_comma_separated(tokens, parse_expression, &Token::RParen)?)
            } else {
                None
            };
            let body = parse_block(tokens)?;
            class.constructor = Some(Rc::new(ConstructorDecl { params,
                                                               parent_args,
                                                               body,
                                                               access,
                                                               line: *line }));
        },
        Some((tok, line)) => {
            let expected = "'func', 'let', 'const' or 'constructor' in class body".to_string();
            return Err(ParseError::Expected { expected,
                                              found: tok.to_string(),
                                              line: *line });
        },
        None => {
            return Err(ParseError::UnexpectedEndOfInput { expected: "'}'".to_string() });
        },
    }

    Ok(())
}

/// Parses a field after `let`/`const`, including the optional
/// `(getter, setter)` flags.
///
/// Grammar: `field := ident ":" declared_type ("(" accessor ("," accessor)*
/// ")")? ("=" expression)?`
fn parse_field<'a, I>(tokens: &mut Peekable<I>,
                      is_const: bool,
                      line: usize)
                      -> ParseResult<(VariableDecl, Accessors)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "field name")?;
    expect(tokens, &Token::Colon, "':' and a type after field name")?;
    let (ty, array_length) = parse_declared_type(tokens)?;

    let mut accessors = Accessors::default();
    if consume_if(tokens, &Token::LParen) {
        let flags = parse_comma_separated(tokens, parse_accessor, &Token::RParen)?;
        for flag in flags {
            match flag {
                Token::Getter => accessors.getter = true,
                _ => accessors.setter = true,
            }
        }
    }

    let initializer = parse_initializer(tokens)?;
    let decl = VariableDecl { name,
                              ty,
                              array_length,
                              initializer,
                              is_const,
                              line };
    validate_declaration(&decl)?;

    Ok((decl, accessors))
}

fn parse_accessor<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Token>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((token @ (Token::Getter | Token::Setter), _)) => Ok(token.clone()),
        Some((tok, line)) => Err(ParseError::Expected { expected: "'getter' or 'setter'".to_string(),
                                                        found:    tok.to_string(),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "')'".to_string() }),
    }
}

/// Parses an interface declaration after the `interface` keyword.
///
/// Grammar: `interface := "interface" ident "{" ("func" ident params (":"
/// type)? ";")* "}"`
pub fn parse_interface<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<InterfaceDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "interface name")?;
    expect(tokens, &Token::LBrace, "'{' before interface body")?;

    let mut methods = Vec::new();
    while !consume_if(tokens, &Token::RBrace) {
        consume_if(tokens, &Token::Public);
        let method_line = expect(tokens, &Token::Func, "'func' in interface body")?;
        let method_name = parse_identifier(tokens, "method name")?;
        let params = parse_params(tokens)?;
        let return_type = parse_return_type(tokens)?;
        expect(tokens, &Token::Semicolon, "';' after method signature")?;
        methods.push(MethodSignature { name: method_name,
                                       params,
                                       return_type,
                                       line: method_line });
    }

    Ok(InterfaceDecl { name, methods, line })
}

/// Parses an enum declaration after the `enum` keyword.
///
/// Grammar: `enum := "enum" ident "{" (ident ("=" "-"? int)? ("," ident
/// ("=" "-"? int)?)*)? "}"`
pub fn parse_enum<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<EnumDecl>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "enum name")?;
    expect(tokens, &Token::LBrace, "'{' before enum members")?;
    let members = parse_comma_separated(tokens, parse_enum_member, &Token::RBrace)?;
    Ok(EnumDecl { name, members, line })
}

fn parse_enum_member<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<(String, Option<i64>)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens, "enum member name")?;
    if !consume_if(tokens, &Token::Assign) {
        return Ok((name, None));
    }

    let negative = consume_if(tokens, &Token::Minus);
    match tokens.next() {
        Some((Token::IntLiteral(n), line)) => {
            let value = if negative {
                n.checked_neg().ok_or(ParseError::LiteralTooLarge { line: *line })?
            } else {
                *n
            };
            Ok((name, Some(value)))
        },
        Some((tok, line)) => Err(ParseError::Expected { expected: "integer enum value".to_string(),
                                                        found:    tok.to_string(),
                                                        line:     *line, }),
        None => Err(ParseError::UnexpectedEndOfInput { expected: "enum value".to_string() }),
    }
}
