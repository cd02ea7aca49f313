/// Parsing errors.
///
/// Defines all error types that can occur while tokenizing and parsing
/// source code. Parse errors are structural: malformed tokens, missing
/// expected tokens, malformed numeric suffixes and unterminated literals.
/// They are always fatal to the parse.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program:
/// undeclared names, redeclarations, type mismatches, bounds violations,
/// access-rule violations and escaped control flow.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
