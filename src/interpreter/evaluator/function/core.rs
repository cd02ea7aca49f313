use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{CallFrame, Context, EvalResult},
            function::builtin,
        },
        value::core::Value,
    },
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the context (for console access), the evaluated
/// arguments and the line number of the call.
type BuiltinFn = fn(&Context, &[Value], usize) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `OneOf(slice)` means the builtin accepts any arity listed in `slice`.
#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the accepted argument counts,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: Arity,
            func:  BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names that are always callable and cannot be declared as user
        /// functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"   => { arity: Arity::Exact(1), func: builtin::print },
    "println" => { arity: Arity::OneOf(&[0, 1]), func: builtin::print },
    "read"    => { arity: Arity::Exact(0), func: builtin::read },
    "str"     => { arity: Arity::Exact(1), func: builtin::to_string },
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity
    /// constraint.
    fn check(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::OneOf(counts) => counts.contains(&n),
        }
    }

    /// The count reported when the check fails.
    fn expected(self, found: usize) -> usize {
        match self {
            Self::Exact(m) => m,
            Self::OneOf(counts) => counts.iter()
                                         .copied()
                                         .min_by_key(|m| m.abs_diff(found))
                                         .unwrap_or_default(),
        }
    }
}

/// Returns `true` if `name` is a builtin function.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_FUNCTIONS.contains(&name)
}

impl Context {
    /// Evaluates a bare call `name(arguments)`.
    ///
    /// The name resolves to a builtin first, then to a method of the running
    /// class (called on the current instance, or statically), then to a user
    /// function.
    ///
    /// # Errors
    /// `UnknownFunction` when nothing matches, `ArgumentCountMismatch`, and
    /// anything raised by the callee.
    #[tracing::instrument(level = "trace", skip(self, arguments, line))]
    pub(crate) fn eval_call(&mut self,
                            name: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let args = self.eval_arguments(arguments)?;

        if let Some(builtin) = BUILTIN_TABLE.iter().find(|b| b.name == name) {
            let found = args.len();
            if !builtin.arity.check(found) {
                return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                                 expected: builtin.arity.expected(found),
                                                                 found,
                                                                 line });
            }
            return (builtin.func)(self, &args, line);
        }

        if let Some(class) = self.current_class()
           && class.methods.contains_key(name)
        {
            let method = self.find_method(&class, name, line)?;
            let this = if method.is_static {
                None
            } else {
                let this = self.current_frame().and_then(|frame| frame.this.clone());
                Some(this.ok_or_else(|| RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                                       member: name.to_string(),
                                                                       line, })?)
            };
            return self.invoke_method(&class, &method, this, args, line);
        }

        let function = self.functions
                           .get(name)
                           .cloned()
                           .ok_or_else(|| RuntimeError::UnknownFunction { name: name.to_string(),
                                                                          line })?;
        self.call_function(&function, CallFrame::function(&function), args, line)
    }
}
