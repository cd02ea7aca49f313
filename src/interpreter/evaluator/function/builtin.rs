use crate::interpreter::{
    evaluator::core::{Context, EvalResult},
    value::core::Value,
};

/// Writes the string form of its argument, or an empty line without one,
/// followed by a line terminator.
///
/// Used for both `print` and `println`; output is line-based either way.
pub fn print(context: &Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    match args.first() {
        Some(value) => context.console.println(&value.to_string()),
        None => context.console.println(""),
    }
    Ok(Value::Void)
}

/// Reads one line of input, without its terminator. Returns `""` when no
/// input is left.
pub fn read(context: &Context, _args: &[Value], line: usize) -> EvalResult<Value> {
    context.console.read_line(line).map(Value::String)
}

/// Converts any value to its string form.
///
/// # Example
/// ```
/// use tessera::interpreter::{
///     evaluator::{core::Context, function::builtin::to_string},
///     value::core::Value,
/// };
///
/// let context = Context::new();
/// let result = to_string(&context, &[Value::Int(42)], 1).unwrap();
///
/// assert_eq!(result, Value::String("42".to_string()));
/// ```
pub fn to_string(_context: &Context, args: &[Value], _line: usize) -> EvalResult<Value> {
    Ok(Value::String(args.iter().map(ToString::to_string).collect()))
}
