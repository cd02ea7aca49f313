use std::{cell::RefCell, rc::Rc};

use indexmap::IndexMap;

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, types::TypeValue},
    },
};

/// A declared variable: its current value and the type it was declared
/// with.
#[derive(Debug, Clone)]
pub struct VariableSlot {
    pub value:         Value,
    pub declared_type: TypeValue,
    pub is_const:      bool,
}

#[derive(Debug, Clone)]
struct Binding {
    slot:      Rc<RefCell<VariableSlot>>,
    /// Visible through a block frame, but declared in an outer one.
    inherited: bool,
}

type Frame = IndexMap<String, Binding>;

/// A stack of scope frames.
///
/// Every lookup and assignment goes to the top frame only. A block frame
/// ([`ScopeStack::enter_scope`]) starts out sharing the slots of the frame
/// below it, so code inside a block sees and updates the variables that
/// were visible where the block began; declarations made inside the block
/// disappear when it exits. A call frame
/// ([`ScopeStack::enter_isolated_scope`]) starts empty.
///
/// # Example
/// ```
/// use tessera::interpreter::{
///     storage::scope::ScopeStack,
///     value::{core::Value, types::TypeValue},
/// };
///
/// let mut scopes = ScopeStack::new();
/// scopes.declare("x", TypeValue::Int, Value::Int(1), false, 1).unwrap();
///
/// scopes.enter_scope();
/// scopes.declare("y", TypeValue::Int, Value::Int(2), false, 2).unwrap();
/// scopes.set("x", Value::Int(3), 3).unwrap();
/// scopes.exit_scope(4).unwrap();
///
/// assert_eq!(scopes.get("x", 5).unwrap(), Value::Int(3));
/// assert!(scopes.get("y", 5).is_err());
/// ```
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// A stack holding only the global frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::new()] }
    }

    /// The number of frames, including the global one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Pushes a block frame that sees the current frame's variables.
    pub fn enter_scope(&mut self) {
        let frame = self.top()
                        .iter()
                        .map(|(name, binding)| {
                            (name.clone(),
                             Binding { slot:      Rc::clone(&binding.slot),
                                       inherited: true, })
                        })
                        .collect();
        self.frames.push(frame);
        tracing::trace!(depth = self.frames.len(), "enter scope");
    }

    /// Pushes an empty frame, as used for function and method bodies.
    pub fn enter_isolated_scope(&mut self) {
        self.frames.push(Frame::new());
        tracing::trace!(depth = self.frames.len(), "enter isolated scope");
    }

    /// Pops the top frame.
    ///
    /// # Errors
    /// `ScopeUnderflow` if only the global frame is left.
    pub fn exit_scope(&mut self, line: usize) -> EvalResult<()> {
        if self.frames.len() <= 1 {
            return Err(RuntimeError::ScopeUnderflow { line });
        }
        self.frames.pop();
        tracing::trace!(depth = self.frames.len(), "exit scope");
        Ok(())
    }

    /// Declares `name` in the top frame.
    ///
    /// A name seen from an enclosing frame may be shadowed; a name declared
    /// in this very frame may not.
    ///
    /// # Errors
    /// `AlreadyDeclared` on a duplicate, `TypeMismatch` if `ty` does not
    /// accept `value`.
    pub fn declare(&mut self,
                   name: &str,
                   ty: TypeValue,
                   value: Value,
                   is_const: bool,
                   line: usize)
                   -> EvalResult<()> {
        if !ty.accepts(&value) {
            return Err(RuntimeError::TypeMismatch { expected: ty.to_string(),
                                                    found: value.type_name(),
                                                    line });
        }
        if self.top().get(name).is_some_and(|binding| !binding.inherited) {
            return Err(RuntimeError::AlreadyDeclared { name: name.to_string(),
                                                       line });
        }

        let slot = VariableSlot { value,
                                  declared_type: ty,
                                  is_const };
        let binding = Binding { slot:      Rc::new(RefCell::new(slot)),
                                inherited: false, };
        self.top_mut().insert(name.to_string(), binding);
        Ok(())
    }

    /// Reads a variable from the top frame.
    ///
    /// # Errors
    /// `UnknownVariable` if the name is not visible.
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.lookup(name)
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    /// Reads a variable from the top frame, if visible.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.top()
            .get(name)
            .map(|binding| binding.slot.borrow().value.clone())
    }

    /// Returns `true` if `name` is visible in the top frame.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.top().contains_key(name)
    }

    /// Assigns to a visible variable, re-checking its declared type.
    ///
    /// # Errors
    /// `UnknownVariable`, `ConstAssignment` or `TypeMismatch`.
    pub fn set(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let binding = self.top()
                          .get(name)
                          .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                                         line })?;
        let mut slot = binding.slot.borrow_mut();

        if slot.is_const {
            return Err(RuntimeError::ConstAssignment { name: name.to_string(),
                                                       line });
        }
        if !slot.declared_type.accepts(&value) {
            return Err(RuntimeError::TypeMismatch { expected: slot.declared_type.to_string(),
                                                    found: value.type_name(),
                                                    line });
        }
        slot.value = value;
        Ok(())
    }

    /// Names visible in the top frame, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.top().keys().map(String::as_str)
    }

    fn top(&self) -> &Frame {
        // The global frame is never popped.
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }
}
