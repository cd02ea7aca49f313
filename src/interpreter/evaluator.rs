/// Core evaluation logic and context management.
///
/// Contains the runtime `Context`, the `ControlSignal` every statement
/// produces, the call frame stack and the program entry point that hoists
/// declarations before running anything else.
pub mod core;

/// Statement execution.
///
/// Dispatches every statement kind and runs blocks, each in its own scope
/// frame.
pub mod statement;

/// Conditional branching.
///
/// Implements `if`/`else` and `switch`, which matches cases by value
/// equality and does not fall through.
pub mod branch;

/// Loop execution.
///
/// Implements `while`, `do`/`while` and `for`, consuming `break` and
/// `continue` signals and passing `return` and thrown values outward.
pub mod loops;

/// Exception handling.
///
/// Implements `try`/`catch`/`finally`: matches thrown values and catchable
/// runtime errors against the declared catch types and always runs the
/// `finally` block.
pub mod exception;

/// Expression evaluation.
///
/// Literals, variables, operators, assignments, indexing, array literals and
/// type tests.
pub mod expression;

/// Objects and class members.
///
/// Instantiation with `new`, field reads and writes, method calls and the
/// access rules for private, static and instance members.
pub mod object;

/// Declarations.
///
/// Registers functions, classes, interfaces and enums, and executes
/// `include` statements.
pub mod declaration;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument checking, and
/// return value computation.
pub mod function;

/// Utility functions for evaluation.
///
/// Scope and call frame helpers that guarantee frames are popped on every
/// path out of a nested evaluation.
pub mod utils;
