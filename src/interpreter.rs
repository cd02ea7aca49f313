/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the AST, evaluates expressions and statements,
/// manages variable scopes, class instances and call frames, and threads
/// non-local control flow through `ControlSignal`. It is the core execution
/// engine of the interpreter.
///
/// # Responsibilities
/// - Runs the declaration pass, then the program's statements in order.
/// - Resolves names against scopes, the running class and the class table.
/// - Enforces types on declaration, assignment, parameters and returns.
/// - Reports runtime errors such as division by zero or private access.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// identifiers, operators, delimiters, and keywords. This is the first stage of
/// interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with source lines.
/// - Handles suffixed numeric, string and character literals.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// an AST that represents the syntactic structure of expressions and
/// statements. This enables later phases to analyze and execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements,
///   declarations).
/// - Validates correct grammar and syntax, reporting errors with location info.
/// - Desugars compound assignment and increment operators.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation:
/// integers, floating-point and decimal numbers, booleans, strings,
/// characters, arrays and class instances, together with declared types
/// and operator semantics.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Implements arithmetic, comparison and logic per variant.
/// - Describes classes and the native module plugin surface.
pub mod value;
/// Runtime storage.
///
/// The scope stack holding variables and the table of declared classes.
pub mod storage;
/// Console input and output used by the `print` and `read` builtins.
pub mod console;
/// Loading of `include`d modules.
pub mod module;
