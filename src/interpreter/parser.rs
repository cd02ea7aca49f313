/// Entry points and the top of the expression chain.
///
/// Contains the program loop, assignment (including the desugaring of
/// compound assignment) and the ternary operator.
pub mod core;

/// Unary, postfix and primary expressions.
///
/// Handles negation, logical not, `++`/`--`, member access, method calls,
/// indexing, literals, `new` and grouping.
pub mod unary;

/// Binary operator precedence levels.
///
/// One function per level, from logical OR down to multiplication, each
/// left-associative.
pub mod binary;

/// Braced statement lists.
pub mod block;

/// Shared token helpers.
///
/// Expecting a specific token, optional tokens, identifiers and
/// comma-separated lists.
pub mod utils;

/// Statement dispatch.
///
/// Parses declarations, control flow, exception handling and expression
/// statements.
pub mod statement;

/// Type annotations, parameter lists and return types.
pub mod types;

/// Function declarations with block or `=>` bodies.
pub mod function;

/// Class, interface and enum declarations.
pub mod class;
