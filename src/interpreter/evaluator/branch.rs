use crate::{
    ast::{Expr, Statement, SwitchCase},
    interpreter::evaluator::core::{ControlSignal, Context, EvalResult},
};

impl Context {
    /// Executes `if (condition) then_branch [else else_branch]`.
    ///
    /// # Errors
    /// `ExpectedBoolean` if the condition is not a `bool`.
    pub(crate) fn execute_if(&mut self,
                             condition: &Expr,
                             then_branch: &Statement,
                             else_branch: Option<&Statement>,
                             line: usize)
                             -> EvalResult<ControlSignal> {
        if self.eval(condition)?.as_bool(line)? {
            self.execute_body(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.execute_body(else_branch)
        } else {
            Ok(ControlSignal::Normal)
        }
    }

    /// Executes a `switch`.
    ///
    /// Runs the first case whose value equals the discriminant, or the
    /// default when none does. Cases do not fall through. `break` leaves the
    /// switch; every other signal is passed on.
    ///
    /// # Errors
    /// `InvalidOperation` when a case value cannot be compared with the
    /// discriminant.
    pub(crate) fn execute_switch(&mut self,
                                 discriminant: &Expr,
                                 cases: &[SwitchCase],
                                 default: Option<&[Statement]>,
                                 line: usize)
                                 -> EvalResult<ControlSignal> {
        let value = self.eval(discriminant)?;

        let mut selected = default.map(|body| (body, line));
        for case in cases {
            let candidate = self.eval(&case.value)?;
            if value.equals(&candidate, case.line)?.as_bool(case.line)? {
                selected = Some((case.body.as_slice(), case.line));
                break;
            }
        }

        let Some((body, body_line)) = selected else {
            return Ok(ControlSignal::Normal);
        };
        match self.in_scope(body_line, |ctx| ctx.execute_block(body))? {
            ControlSignal::Break => Ok(ControlSignal::Normal),
            signal => Ok(signal),
        }
    }
}
