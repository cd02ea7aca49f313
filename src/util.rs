/// Numeric conversion helpers.
///
/// This module provides checked conversions between the interpreter's `i64`
/// integers and the `usize` lengths and offsets used by arrays and strings.
/// Every function returns a `Result`, so an out-of-range value becomes a
/// runtime error instead of a silent wrap or a panic.
pub mod num;
/// Stack growth for the recursive evaluator.
pub mod stack;
