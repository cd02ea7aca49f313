use std::rc::Rc;

use crate::{
    ast::{FunctionDecl, Param},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{CallFrame, ControlSignal, Context, EvalResult},
        value::{
            class::{ClassInfo, MethodBody, MethodInfo},
            core::Value,
            types::TypeValue,
        },
    },
};

impl Context {
    /// Executes a user function body in a fresh call frame.
    ///
    /// Parameters are bound in an empty scope frame, so the body sees only
    /// its parameters, its own locals and, through `frame`, the members of
    /// its class.
    ///
    /// # Errors
    /// - Wrong number or types of arguments.
    /// - `VoidReturnWithValue`, `NotAllPathsReturn`, or a `TypeMismatch` on
    ///   the returned value.
    /// - A thrown value leaving the function, as `Thrown`.
    #[tracing::instrument(level = "trace", skip_all, fields(function = %frame.name))]
    pub(crate) fn call_function(&mut self,
                                decl: &Rc<FunctionDecl>,
                                frame: CallFrame,
                                args: Vec<Value>,
                                line: usize)
                                -> EvalResult<Value> {
        let name = frame.name.clone();
        Self::check_arguments(&name, &decl.params, &args, line)?;

        let signal = self.with_frame(frame, line, |ctx| {
                             ctx.bind_parameters(&decl.params, args, line)?;
                             ctx.execute_block(&decl.body)
                         })?;
        Self::finish_call(&name, &decl.return_type, signal, line)
    }

    /// Calls `method` of `class`, with `this` bound for instance methods.
    pub(crate) fn invoke_method(&mut self,
                                class: &Rc<ClassInfo>,
                                method: &MethodInfo,
                                this: Option<Value>,
                                args: Vec<Value>,
                                line: usize)
                                -> EvalResult<Value> {
        match &method.body {
            MethodBody::User(decl) => {
                let frame = CallFrame::member(&method.name,
                                              class,
                                              &method.owner,
                                              this,
                                              method.return_type.clone());
                self.call_function(decl, frame, args, line)
            },
            MethodBody::Native(native) => {
                let name = format!("{}.{}", class.name, method.name);
                Self::check_arguments(&name, &method.params, &args, line)?;
                let value = native(&args, line)?;
                Self::check_return(&method.return_type, &value, line)?;
                Ok(value)
            },
            MethodBody::Abstract => Err(RuntimeError::MissingMethodBody { class:  class.name.clone(),
                                                                          method: method.name.clone(),
                                                                          line, }),
        }
    }

    /// Checks argument count and types against the declared parameters.
    pub(crate) fn check_arguments(name: &str,
                                  params: &[Param],
                                  args: &[Value],
                                  line: usize)
                                  -> EvalResult<()> {
        if params.len() != args.len() {
            return Err(RuntimeError::ArgumentCountMismatch { name: name.to_string(),
                                                             expected: params.len(),
                                                             found: args.len(),
                                                             line });
        }
        for (param, arg) in params.iter().zip(args) {
            if !param.ty.accepts(arg) {
                return Err(RuntimeError::TypeMismatch { expected: param.ty.to_string(),
                                                        found: arg.type_name(),
                                                        line });
            }
        }
        Ok(())
    }

    /// Declares each parameter in the current (call) frame.
    pub(crate) fn bind_parameters(&mut self,
                                  params: &[Param],
                                  args: Vec<Value>,
                                  line: usize)
                                  -> EvalResult<()> {
        for (param, arg) in params.iter().zip(args) {
            self.scopes.declare(&param.name, param.ty.clone(), arg, false, line)?;
        }
        Ok(())
    }

    /// Turns the signal a body finished with into the value of the call.
    pub(crate) fn finish_call(name: &str,
                              return_type: &TypeValue,
                              signal: ControlSignal,
                              line: usize)
                              -> EvalResult<Value> {
        let is_void = *return_type == TypeValue::Void;
        match signal {
            ControlSignal::Return(Some(_)) if is_void => {
                Err(RuntimeError::VoidReturnWithValue { name: name.to_string(),
                                                        line })
            },
            ControlSignal::Return(Some(value)) => {
                Self::check_return(return_type, &value, line)?;
                Ok(value)
            },
            ControlSignal::Normal | ControlSignal::Return(None) if is_void => Ok(Value::Void),
            ControlSignal::Normal => Err(RuntimeError::NotAllPathsReturn { name: name.to_string(),
                                                                           line }),
            ControlSignal::Return(None) => {
                Self::check_return(return_type, &Value::Void, line)?;
                Ok(Value::Void)
            },
            ControlSignal::Break => Err(RuntimeError::ControlFlowEscape { keyword: "break",
                                                                          line }),
            ControlSignal::Continue => {
                Err(RuntimeError::ControlFlowEscape { keyword: "continue",
                                                      line })
            },
            ControlSignal::Thrown(value) => Err(RuntimeError::Thrown { value, line }),
        }
    }

    fn check_return(return_type: &TypeValue, value: &Value, line: usize) -> EvalResult<()> {
        if return_type.accepts(value) {
            Ok(())
        } else {
            Err(RuntimeError::TypeMismatch { expected: return_type.to_string(),
                                             found: value.type_name(),
                                             line })
        }
    }
}
