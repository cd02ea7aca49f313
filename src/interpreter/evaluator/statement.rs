use crate::{
    ast::{Statement, VariableDecl},
    interpreter::evaluator::core::{ControlSignal, Context, EvalResult},
    util::stack::ensure_sufficient_stack,
};

impl Context {
    /// Executes a single statement.
    ///
    /// Declarations met here (inside blocks, or in included modules after
    /// hoisting) are registered when reached.
    ///
    /// # Returns
    /// How the statement finished; anything but `Normal` must be passed
    /// outward until a construct handles it.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<ControlSignal> {
        ensure_sufficient_stack(|| self.execute_node(statement))
    }

    fn execute_node(&mut self, statement: &Statement) -> EvalResult<ControlSignal> {
        match statement {
            Statement::Expression { expr, .. } => {
                self.eval(expr)?;
                Ok(ControlSignal::Normal)
            },
            Statement::VariableDeclaration(decl) => {
                self.execute_declaration(decl)?;
                Ok(ControlSignal::Normal)
            },
            Statement::Function(decl) => {
                self.declare_function(decl)?;
                Ok(ControlSignal::Normal)
            },
            Statement::Class(decl) => {
                self.declare_class(decl)?;
                Ok(ControlSignal::Normal)
            },
            Statement::Interface(decl) => {
                self.declare_interface(decl)?;
                Ok(ControlSignal::Normal)
            },
            Statement::Enum(decl) => {
                self.declare_enum(decl)?;
                Ok(ControlSignal::Normal)
            },
            Statement::Block { statements, line } => {
                self.in_scope(*line, |ctx| ctx.execute_block(statements))
            },
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            line, } => self.execute_if(condition, then_branch, else_branch.as_deref(), *line),
            Statement::While { condition, body, line } => self.execute_while(condition, body, *line),
            Statement::DoWhile { body, condition, line } => self.execute_do_while(body, condition, *line),
            Statement::For { init,
                             condition,
                             step,
                             body,
                             line, } => {
                self.execute_for(init.as_deref(), condition.as_ref(), step.as_ref(), body, *line)
            },
            Statement::Switch { discriminant,
                                cases,
                                default,
                                line, } => self.execute_switch(discriminant, cases, default.as_deref(), *line),
            Statement::Break { .. } => Ok(ControlSignal::Break),
            Statement::Continue { .. } => Ok(ControlSignal::Continue),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => {
                        let expected = self.current_frame().map(|frame| frame.return_type.clone());
                        Some(match expected {
                                 Some(ty) => self.eval_expecting(expr, &ty)?,
                                 None => self.eval(expr)?,
                             })
                    },
                    None => None,
                };
                Ok(ControlSignal::Return(value))
            },
            Statement::Throw { value, .. } => Ok(ControlSignal::Thrown(self.eval(value)?)),
            Statement::Try { body,
                             catches,
                             finally,
                             line, } => self.execute_try(body, catches, finally.as_deref(), *line),
            Statement::Include { path, line } => {
                self.execute_include(path, *line)?;
                Ok(ControlSignal::Normal)
            },
        }
    }

    /// Executes statements in order in the current frame, stopping at the
    /// first one that does not finish normally.
    pub fn execute_block(&mut self, statements: &[Statement]) -> EvalResult<ControlSignal> {
        for statement in statements {
            let signal = self.execute(statement)?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }
        Ok(ControlSignal::Normal)
    }

    /// Executes the body of an `if`, loop or similar construct in its own
    /// frame. A block body shares that frame instead of opening a second one.
    pub(crate) fn execute_body(&mut self, body: &Statement) -> EvalResult<ControlSignal> {
        match body {
            Statement::Block { statements, line } => {
                self.in_scope(*line, |ctx| ctx.execute_block(statements))
            },
            other => self.in_scope(other.line(), |ctx| ctx.execute(other)),
        }
    }

    /// Evaluates a `let`/`const` and declares the variable in the top frame.
    fn execute_declaration(&mut self, decl: &VariableDecl) -> EvalResult<()> {
        let value = self.eval_declared_value(decl)?;
        self.scopes.declare(&decl.name, decl.ty.clone(), value, decl.is_const, decl.line)
    }
}
