use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{CallFrame, Context, EvalResult, MAX_CALL_DEPTH},
        value::core::Value,
    },
    util::stack::ensure_sufficient_stack,
};

impl Context {
    /// Runs `body` inside a new block frame and pops the frame on every
    /// path out, including errors.
    ///
    /// # Example
    /// ```
    /// use tessera::interpreter::{
    ///     evaluator::core::Context,
    ///     value::{core::Value, types::TypeValue},
    /// };
    ///
    /// let mut context = Context::new();
    /// context.in_scope(1, |ctx| {
    ///            ctx.scopes.declare("tmp", TypeValue::Int, Value::Int(1), false, 1)
    ///        })
    ///        .unwrap();
    ///
    /// assert!(!context.scopes.contains("tmp"));
    /// ```
    pub fn in_scope<T>(&mut self,
                       line: usize,
                       body: impl FnOnce(&mut Self) -> EvalResult<T>)
                       -> EvalResult<T> {
        self.scopes.enter_scope();
        let result = body(self);
        let exited = self.scopes.exit_scope(line);
        let value = result?;
        exited?;
        Ok(value)
    }

    /// Runs `body` as a user call: pushes `frame` and an empty scope frame,
    /// and pops both afterwards.
    ///
    /// # Errors
    /// `StackOverflow` when the call nesting limit is reached, otherwise
    /// whatever `body` returns.
    pub(crate) fn with_frame<T>(&mut self,
                                frame: CallFrame,
                                line: usize,
                                body: impl FnOnce(&mut Self) -> EvalResult<T>)
                                -> EvalResult<T> {
        if self.call_stack.len() >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow { depth: MAX_CALL_DEPTH,
                                                     line });
        }
        tracing::trace!(call = %frame.name, depth = self.call_stack.len() + 1, "enter call");

        self.call_stack.push(frame);
        self.scopes.enter_isolated_scope();
        let result = ensure_sufficient_stack(|| body(self));
        let exited = self.scopes.exit_scope(line);
        self.call_stack.pop();

        let value = result?;
        exited?;
        Ok(value)
    }

    /// The receiver of the running method.
    ///
    /// # Errors
    /// `ThisOutsideInstance` outside instance methods and constructors.
    pub(crate) fn current_this(&self, line: usize) -> EvalResult<Value> {
        self.current_frame()
            .and_then(|frame| frame.this.clone())
            .ok_or(RuntimeError::ThisOutsideInstance { line })
    }

    /// Returns `true` if private members declared by `owner` are reachable
    /// from the running code.
    pub(crate) fn can_access_private(&self, owner: &str) -> bool {
        self.current_frame()
            .and_then(|frame| frame.owner.as_deref())
            .is_some_and(|current| current == owner)
    }

    /// Evaluates call arguments left to right.
    pub(crate) fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        arguments.iter().map(|arg| self.eval(arg)).collect()
    }
}
