//! # tessera
//!
//! tessera is a small, statically typed, class-based scripting language with
//! a tree-walking interpreter written in Rust. Source text is tokenized,
//! parsed into an AST and executed directly, with typed variables, arrays,
//! classes with inheritance, interfaces, enums and exceptions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::{evaluator::core::Context, lexer::tokenize, parser::core::parse_program},
};

/// Syntax tree produced by the parser: expressions, statements and the
/// class, interface and enum declarations, each carrying its source line.
pub mod ast;
/// Lexical, syntax and runtime errors.
///
/// Every error records the line it was raised on. Runtime errors also decide
/// whether a script-level `try`/`catch` may intercept them.
pub mod error;
/// The language runtime.
///
/// Holds the lexer and parser, the evaluator with its call stack and class
/// table, the value model, console I/O and the loaders used by `include`.
pub mod interpreter;
/// Checked conversions between script integers and host sizes.
pub mod util;

/// Tokenizes and parses `source` into a program.
///
/// # Errors
/// The first lexical or syntax error.
///
/// # Example
/// ```
/// let program = tessera::parse("let x: int = 1; x = x + 1;").unwrap();
/// assert_eq!(program.len(), 2);
///
/// assert!(tessera::parse("let x: int = ;").is_err());
/// ```
pub fn parse(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tokens = tokenize(source)?;
    parse_program(&tokens)
}

/// Parses and executes `source` in a fresh context writing to stdout.
///
/// This function parses the whole program before running any of it, so a
/// syntax error anywhere means nothing executes. If execution succeeds, it
/// returns `Ok(())`; otherwise it returns the first error.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use tessera::get_result;
///
/// let source = "let result: int = 2 + 2;";
/// assert!(get_result(source).is_ok());
///
/// // Unknown variable.
/// let source = "let y: int = x + 1;";
/// assert!(get_result(source).is_err());
/// ```
pub fn get_result(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    let program = parse(source)?;
    let mut context = Context::new();
    context.execute_all(&program)?;
    Ok(())
}
