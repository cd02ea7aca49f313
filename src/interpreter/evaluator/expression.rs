use crate::{
    ast::{ArrayLength, AssignTarget, BinaryOperator, Expr, VariableDecl},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, types::TypeValue},
    },
    util::{num::size_to_usize, stack::ensure_sufficient_stack},
};

impl Context {
    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation; it dispatches
    /// on the expression variant.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_node(expr))
    }

    fn eval_node(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, line } => self.eval_variable(name, *line),
            Expr::This { line } => self.current_this(*line),
            Expr::Unary { op, expr, line } => self.eval(expr)?.apply_unary(*op, *line),
            Expr::Binary { left,
                           op,
                           right,
                           line, } => self.eval_binary(left, *op, right, *line),
            Expr::Ternary { condition,
                            then_expr,
                            else_expr,
                            line, } => {
                if self.eval(condition)?.as_bool(*line)? {
                    self.eval(then_expr)
                } else {
                    self.eval(else_expr)
                }
            },
            Expr::Assign { target, value, line } => self.eval_assign(target, value, *line),
            Expr::Call { name, arguments, line } => self.eval_call(name, arguments, *line),
            Expr::MethodCall { object,
                               method,
                               arguments,
                               line, } => self.eval_method_call(object, method, arguments, *line),
            Expr::Member { object, name, line } => self.eval_member(object, name, *line),
            Expr::Index { array, index, line } => {
                let target = self.eval(array)?;
                let index = self.eval(index)?.as_int(*line)?;
                target.index(index, *line)
            },
            Expr::ArrayLiteral { elements,
                                 element_type,
                                 line, } => self.eval_array_literal(elements, element_type.as_ref(), *line),
            Expr::New { class, arguments, line } => self.eval_new(class, arguments, *line),
            Expr::Is { expr, ty, .. } => {
                let value = self.eval(expr)?;
                // `void` only matches `void` here, even though reference
                // slots accept it.
                let matches = match value {
                    Value::Void => *ty == TypeValue::Void,
                    ref other => ty.accepts(other),
                };
                Ok(Value::Bool(matches))
            },
        }
    }

    /// Evaluates `expr` where a value of type `expected` is wanted.
    ///
    /// Only matters for array literals without a `:Type` suffix, which take
    /// their element type from `expected`; every other expression evaluates
    /// as usual and is type-checked by the caller.
    pub fn eval_expecting(&mut self, expr: &Expr, expected: &TypeValue) -> EvalResult<Value> {
        match (expr, expected.element()) {
            (Expr::ArrayLiteral { elements,
                                  element_type: None,
                                  line, },
             Some(element)) => self.eval_array_literal(elements, Some(element), *line),
            _ => self.eval(expr),
        }
    }

    /// Computes the initial value of a variable or field declaration.
    ///
    /// Without an initializer the slot gets the default of its type; an
    /// array declared with a size is filled with defaults of its element
    /// type.
    ///
    /// # Errors
    /// `NegativeArraySize` for a negative size, `ArraySizeMismatch` when an
    /// initializer's length differs from a non-zero declared size, plus
    /// anything raised by the initializer itself.
    pub fn eval_declared_value(&mut self, decl: &VariableDecl) -> EvalResult<Value> {
        let line = decl.line;
        let size = match &decl.array_length {
            Some(ArrayLength::Explicit(expr)) => {
                let size = self.eval(expr)?.as_int(line)?;
                size_to_usize(size, line)?;
                Some(size)
            },
            Some(ArrayLength::Inferred) | None => None,
        };

        match (&decl.initializer, size) {
            (Some(initializer), size) => {
                let value = self.eval_expecting(initializer, &decl.ty)?;
                if let (Some(size), Value::Array(array)) = (size, &value) {
                    let count = array.borrow().items.len();
                    if size != 0 && usize::try_from(size).is_ok_and(|size| size != count) {
                        return Err(RuntimeError::ArraySizeMismatch { size, count, line });
                    }
                }
                Ok(value)
            },
            (None, Some(size)) => {
                let element = decl.ty.element().cloned().unwrap_or(TypeValue::Void);
                let items = vec![Value::default_for(&element); size_to_usize(size, line)?];
                Ok(Value::new_array(element, items))
            },
            (None, None) => Ok(Value::default_for(&decl.ty)),
        }
    }

    fn eval_variable(&mut self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.scopes.lookup(name) {
            return Ok(value);
        }
        self.read_implicit_member(name, line)?
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// `&&` and `||` only evaluate their right operand when the left one
    /// does not already decide the result.
    fn eval_binary(&mut self,
                   left: &Expr,
                   op: BinaryOperator,
                   right: &Expr,
                   line: usize)
                   -> EvalResult<Value> {
        let left = self.eval(left)?;
        match (op, &left) {
            (BinaryOperator::And, Value::Bool(false)) => return Ok(Value::Bool(false)),
            (BinaryOperator::Or, Value::Bool(true)) => return Ok(Value::Bool(true)),
            _ => {},
        }
        let right = self.eval(right)?;
        left.apply_binary(op, &right, line)
    }

    /// Builds an array from a literal.
    ///
    /// The element type is the explicit one when given, otherwise that of
    /// the first element. Every element must be accepted by it.
    ///
    /// # Errors
    /// `UntypedEmptyArray` for `[]` with no known element type,
    /// `TypeMismatch` for a heterogeneous literal.
    fn eval_array_literal(&mut self,
                          elements: &[Expr],
                          element_type: Option<&TypeValue>,
                          line: usize)
                          -> EvalResult<Value> {
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            let item = match element_type {
                Some(ty) => self.eval_expecting(element, ty)?,
                None => self.eval(element)?,
            };
            items.push(item);
        }

        let element_type = match (element_type, items.first()) {
            (Some(ty), _) => ty.clone(),
            (None, Some(first)) => first.type_of(),
            (None, None) => return Err(RuntimeError::UntypedEmptyArray { line }),
        };
        if let Some(item) = items.iter().find(|item| !element_type.accepts(item)) {
            return Err(RuntimeError::TypeMismatch { expected: element_type.to_string(),
                                                    found: item.type_name(),
                                                    line });
        }
        Ok(Value::new_array(element_type, items))
    }

    /// Evaluates an assignment and yields the assigned value.
    fn eval_assign(&mut self, target: &AssignTarget, value: &Expr, line: usize) -> EvalResult<Value> {
        match target {
            AssignTarget::Variable(name) => {
                let value = self.eval(value)?;
                if self.scopes.contains(name) {
                    self.scopes.set(name, value.clone(), line)?;
                } else if !self.write_implicit_member(name, value.clone(), line)? {
                    return Err(RuntimeError::UnknownVariable { name: name.clone(),
                                                              line });
                }
                Ok(value)
            },
            AssignTarget::Index { array, index } => {
                let target = self.eval(array)?;
                let index = self.eval(index)?.as_int(line)?;
                let value = self.eval(value)?;
                target.set_index(index, value.clone(), line)?;
                Ok(value)
            },
            AssignTarget::Member { object, name } => {
                let value = self.eval(value)?;
                self.write_member(object, name, value.clone(), line)?;
                Ok(value)
            },
        }
    }
}
