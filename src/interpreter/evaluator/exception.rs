use crate::{
    ast::{CatchClause, Statement},
    interpreter::{
        evaluator::core::{ControlSignal, Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Executes `try { body } catch (...) { ... } finally { ... }`.
    ///
    /// A value thrown by the body, or a catchable runtime error raised in
    /// it, goes to the first clause whose type accepts it; runtime errors
    /// arrive as their message string. Unmatched values keep propagating.
    /// The `finally` block runs on every path; if it does not finish
    /// normally its signal replaces the outcome of the statement.
    pub(crate) fn execute_try(&mut self,
                              body: &[Statement],
                              catches: &[CatchClause],
                              finally: Option<&[Statement]>,
                              line: usize)
                              -> EvalResult<ControlSignal> {
        let outcome = match self.in_scope(line, |ctx| ctx.execute_block(body)) {
            Ok(ControlSignal::Thrown(value)) => match find_catch(catches, &value) {
                Some(clause) => self.execute_catch(clause, value),
                None => Ok(ControlSignal::Thrown(value)),
            },
            Err(error) if error.is_catchable() => {
                let value = error.clone().into_thrown_value();
                match find_catch(catches, &value) {
                    Some(clause) => {
                        tracing::debug!(%error, "runtime error caught");
                        self.execute_catch(clause, value)
                    },
                    None => Err(error),
                }
            },
            other => other,
        };

        if let Some(finally) = finally {
            let signal = self.in_scope(line, |ctx| ctx.execute_block(finally))?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }
        outcome
    }

    fn execute_catch(&mut self, clause: &CatchClause, value: Value) -> EvalResult<ControlSignal> {
        let ty = clause.ty.clone().unwrap_or_else(|| value.type_of());
        self.in_scope(clause.line, |ctx| {
                ctx.scopes.declare(&clause.name, ty, value, false, clause.line)?;
                ctx.execute_block(&clause.body)
            })
    }
}

fn find_catch<'a>(catches: &'a [CatchClause], value: &Value) -> Option<&'a CatchClause> {
    catches.iter()
           .find(|clause| clause.ty.as_ref().is_none_or(|ty| ty.accepts(value)))
}
