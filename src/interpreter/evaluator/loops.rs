use crate::{
    ast::{Expr, Statement},
    interpreter::evaluator::core::{ControlSignal, Context, EvalResult},
};

/// What a loop does after one run of its body.
enum Iteration {
    Next,
    Stop,
    Leave(ControlSignal),
}

impl From<ControlSignal> for Iteration {
    fn from(signal: ControlSignal) -> Self {
        match signal {
            ControlSignal::Normal | ControlSignal::Continue => Self::Next,
            ControlSignal::Break => Self::Stop,
            other => Self::Leave(other),
        }
    }
}

impl Context {
    /// Executes `while (condition) body`.
    pub(crate) fn execute_while(&mut self,
                                condition: &Expr,
                                body: &Statement,
                                line: usize)
                                -> EvalResult<ControlSignal> {
        while self.eval(condition)?.as_bool(line)? {
            match self.execute_body(body)?.into() {
                Iteration::Next => {},
                Iteration::Stop => break,
                Iteration::Leave(signal) => return Ok(signal),
            }
        }
        Ok(ControlSignal::Normal)
    }

    /// Executes `do body while (condition);`. The body always runs once.
    pub(crate) fn execute_do_while(&mut self,
                                   body: &Statement,
                                   condition: &Expr,
                                   line: usize)
                                   -> EvalResult<ControlSignal> {
        loop {
            match self.execute_body(body)?.into() {
                Iteration::Next => {},
                Iteration::Stop => break,
                Iteration::Leave(signal) => return Ok(signal),
            }
            if !self.eval(condition)?.as_bool(line)? {
                break;
            }
        }
        Ok(ControlSignal::Normal)
    }

    /// Executes `for (init : condition : step) body`.
    ///
    /// The loop owns a frame holding whatever `init` declares; each run of
    /// the body gets a nested frame. A missing condition loops until `break`.
    /// The step also runs after `continue`.
    pub(crate) fn execute_for(&mut self,
                              init: Option<&Statement>,
                              condition: Option<&Expr>,
                              step: Option<&Expr>,
                              body: &Statement,
                              line: usize)
                              -> EvalResult<ControlSignal> {
        self.in_scope(line, |ctx| {
                if let Some(init) = init {
                    let signal = ctx.execute(init)?;
                    if !signal.is_normal() {
                        return Ok(signal);
                    }
                }

                loop {
                    if let Some(condition) = condition
                       && !ctx.eval(condition)?.as_bool(line)?
                    {
                        break;
                    }
                    match ctx.execute_body(body)?.into() {
                        Iteration::Next => {},
                        Iteration::Stop => break,
                        Iteration::Leave(signal) => return Ok(signal),
                    }
                    if let Some(step) = step {
                        ctx.eval(step)?;
                    }
                }
                Ok(ControlSignal::Normal)
            })
    }
}
