use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_logical_or,
            statement::parse_statement,
            utils::{expect, into_assign_target},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole token stream into top-level statements.
///
/// Parsing is fail-fast: the first error aborts and no partial program is
/// returned.
///
/// # Example
/// ```
/// use tessera::interpreter::{lexer::tokenize, parser::core::parse_program};
///
/// let tokens = tokenize("let x: int = 1; x += 2;").unwrap();
/// let program = parse_program(&tokens).unwrap();
///
/// assert_eq!(program.len(), 2);
/// ```
pub fn parse_program(tokens: &[(Token, usize)]) -> ParseResult<Vec<Statement>> {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();

    while iter.peek().is_some() {
        statements.push(parse_statement(&mut iter)?);
    }

    Ok(statements)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and recursively descends through
/// the precedence hierarchy.
///
/// Grammar: `expression := assignment`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_assignment(tokens)
}

/// Parses plain and compound assignment.
///
/// `target op= value` is rewritten to `target = target op value`, which
/// covers variables, elements and fields alike. Assignment is
/// right-associative.
///
/// Grammar: `assignment := ternary (("=" | "+=" | "-=" | "*=" | "/=" | "%=")
/// assignment)?`
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let expr = parse_ternary(tokens)?;

    let Some((token, line)) = tokens.peek() else {
        return Ok(expr);
    };
    let line = *line;
    let compound = match token {
        Token::Assign => None,
        Token::PlusAssign => Some(BinaryOperator::Add),
        Token::MinusAssign => Some(BinaryOperator::Subtract),
        Token::StarAssign => Some(BinaryOperator::Multiply),
        Token::SlashAssign => Some(BinaryOperator::Divide),
        Token::PercentAssign => Some(BinaryOperator::Modulo),
        _ => return Ok(expr),
    };
    tokens.next();

    let target = into_assign_target(expr, line)?;
    let rhs = parse_assignment(tokens)?;
    let value = match compound {
        None => rhs,
        Some(op) => Expr::Binary { left: Box::new(target.to_expr(line)),
                                   op,
                                   right: Box::new(rhs),
                                   line },
    };

    Ok(Expr::Assign { target,
                      value: Box::new(value),
                      line })
}

/// Parses the conditional operator.
///
/// Grammar: `ternary := logical_or ("?" expression ":" expression)?`
fn parse_ternary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let condition = parse_logical_or(tokens)?;

    if let Some((Token::Question, line)) = tokens.peek() {
        let line = *line;
        tokens.next();

        let then_expr = parse_expression(tokens)?;
        expect(tokens, &Token::Colon, "':' in conditional expression")?;
        let else_expr = parse_expression(tokens)?;

        return Ok(Expr::Ternary { condition: Box::new(condition),
                                  then_expr: Box::new(then_expr),
                                  else_expr: Box::new(else_expr),
                                  line });
    }

    Ok(condition)
}
