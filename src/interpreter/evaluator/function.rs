/// Built-in function implementations.
///
/// Console input and output plus string conversion, available without any
/// declaration.
pub mod builtin;

/// Call dispatch.
///
/// The builtin table and the resolution order for bare calls: builtins,
/// then methods of the running class, then user functions.
pub mod core;

/// User function and method invocation.
///
/// Argument checking, parameter binding, and turning the body's control
/// signal into the call's result.
pub mod call;
