use std::rc::Rc;

use crate::{
    ast::{Access, Expr},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{CallFrame, Context, EvalResult},
        value::{
            class::{ClassInfo, ClassInstance, ConstructorInfo, FieldInit, MethodInfo},
            core::Value,
            types::TypeValue,
        },
    },
};

fn unknown_member(class: &str, member: &str, line: usize) -> RuntimeError {
    RuntimeError::UnknownMember { class: class.to_string(),
                                  member: member.to_string(),
                                  line }
}

fn store_field(instance: &Value, name: &str, value: Value) {
    if let Value::Object(object) = instance {
        object.borrow_mut().fields.insert(name.to_string(), value);
    }
}

impl Context {
    /// Evaluates `new Class(arguments)`.
    ///
    /// Instance fields are initialized in declaration order, inherited ones
    /// first, then the constructor runs. A class without a constructor takes
    /// no arguments.
    ///
    /// # Errors
    /// `UnknownClass`, `StaticInstantiation`, `AbstractInstantiation`,
    /// `ArgumentCountMismatch`, or anything raised by field initializers and
    /// the constructor.
    pub(crate) fn eval_new(&mut self,
                           class_name: &str,
                           arguments: &[Expr],
                           line: usize)
                           -> EvalResult<Value> {
        let class = self.classes.get(class_name, line)?;
        if class.is_interface {
            return Err(RuntimeError::AbstractInstantiation { class: class.name.clone(),
                                                             line });
        }
        if class.is_static {
            return Err(RuntimeError::StaticInstantiation { class: class.name.clone(),
                                                           line });
        }

        let args = self.eval_arguments(arguments)?;
        if let Some(constructor) = &class.constructor {
            self.check_access(&class.name,
                              "constructor",
                              constructor.decl.access,
                              &constructor.owner,
                              line)?;
        } else if !args.is_empty() {
            return Err(RuntimeError::ArgumentCountMismatch { name: class.name.clone(),
                                                             expected: 0,
                                                             found: args.len(),
                                                             line });
        }

        let instance = ClassInstance::new_value(Rc::clone(&class));
        self.initialize_fields(&class, &instance, line)?;
        if let Some(constructor) = &class.constructor {
            self.run_constructor(&class, constructor, &instance, args, line)?;
        }
        Ok(instance)
    }

    fn initialize_fields(&mut self,
                         class: &Rc<ClassInfo>,
                         instance: &Value,
                         line: usize)
                         -> EvalResult<()> {
        for field in class.fields.values().filter(|field| !field.is_static) {
            let value = match &field.init {
                FieldInit::Value(value) => value.clone(),
                FieldInit::Declared(decl) => {
                    let frame = CallFrame::member(&field.name,
                                                  class,
                                                  &field.owner,
                                                  Some(instance.clone()),
                                                  field.ty.clone());
                    self.with_frame(frame, line, |ctx| ctx.eval_declared_value(decl))?
                },
            };
            if !field.ty.accepts(&value) {
                return Err(RuntimeError::TypeMismatch { expected: field.ty.to_string(),
                                                        found: value.type_name(),
                                                        line });
            }
            store_field(instance, &field.name, value);
        }
        Ok(())
    }

    /// Runs `constructor` on a freshly created `instance` of `class`.
    ///
    /// The parent constructor runs first: with the `parent(...)` arguments
    /// when given, evaluated with the parameters in scope, otherwise with no
    /// arguments.
    fn run_constructor(&mut self,
                       class: &Rc<ClassInfo>,
                       constructor: &ConstructorInfo,
                       instance: &Value,
                       args: Vec<Value>,
                       line: usize)
                       -> EvalResult<()> {
        let decl = Rc::clone(&constructor.decl);
        let name = format!("{}.constructor", constructor.owner);
        Self::check_arguments(&name, &decl.params, &args, line)?;

        let frame = CallFrame::member("constructor",
                                      class,
                                      &constructor.owner,
                                      Some(instance.clone()),
                                      TypeValue::Void);
        let signal = self.with_frame(frame, line, |ctx| {
                             ctx.bind_parameters(&decl.params, args, line)?;
                             ctx.run_parent_constructor(class,
                                                        &constructor.owner,
                                                        decl.parent_args.as_deref(),
                                                        instance,
                                                        line)?;
                             ctx.execute_block(&decl.body)
                         })?;
        Self::finish_call(&name, &TypeValue::Void, signal, line)?;
        Ok(())
    }

    fn run_parent_constructor(&mut self,
                              class: &Rc<ClassInfo>,
                              owner: &str,
                              parent_args: Option<&[Expr]>,
                              instance: &Value,
                              line: usize)
                              -> EvalResult<()> {
        let owner_class = self.classes.get(owner, line)?;
        let Some(parent) = owner_class.parent.clone() else {
            if parent_args.is_some() {
                let details = "'parent(...)' used in a class without a parent".to_string();
                return Err(RuntimeError::InvalidInheritance { class: owner.to_string(),
                                                              details,
                                                              line });
            }
            return Ok(());
        };

        let args = match parent_args {
            Some(exprs) => self.eval_arguments(exprs)?,
            None => Vec::new(),
        };
        match &parent.constructor {
            Some(constructor) => self.run_constructor(class, constructor, instance, args, line),
            None if args.is_empty() => Ok(()),
            None => {
                let name = format!("{}.constructor", parent.name);
                Err(RuntimeError::ArgumentCountMismatch { name,
                                                          expected: 0,
                                                          found: args.len(),
                                                          line })
            },
        }
    }

    /// Evaluates `object.name`.
    ///
    /// `length` of an array or string is its element or character count.
    pub(crate) fn eval_member(&mut self, object: &Expr, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(class) = self.static_receiver(object) {
            return self.read_static_field(&class, name, line);
        }
        let receiver = self.eval(object)?;
        match &receiver {
            Value::Array(_) | Value::String(_) if name == "length" => receiver.length(line),
            _ => self.read_instance_field(&receiver, name, line),
        }
    }

    /// Evaluates `object.method(arguments)`; `object` may name a class.
    pub(crate) fn eval_method_call(&mut self,
                                   object: &Expr,
                                   method: &str,
                                   arguments: &[Expr],
                                   line: usize)
                                   -> EvalResult<Value> {
        if let Some(class) = self.static_receiver(object) {
            let info = self.find_method(&class, method, line)?;
            if !info.is_static {
                return Err(RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                          member: method.to_string(),
                                                          line, });
            }
            let args = self.eval_arguments(arguments)?;
            return self.invoke_method(&class, &info, None, args, line);
        }

        let receiver = self.eval(object)?;
        let Value::Object(instance) = &receiver else {
            return Err(RuntimeError::InvalidMemberTarget { found: receiver.type_name(),
                                                           member: method.to_string(),
                                                           line });
        };
        let class = Rc::clone(&instance.borrow().class);
        let info = self.find_method(&class, method, line)?;
        if info.is_static {
            return Err(RuntimeError::StaticAccess { class:  class.name.clone(),
                                                    member: method.to_string(),
                                                    line, });
        }
        let args = self.eval_arguments(arguments)?;
        self.invoke_method(&class, &info, Some(receiver.clone()), args, line)
    }

    /// Assigns to `object.name`; `object` may name a class.
    pub(crate) fn write_member(&mut self,
                               object: &Expr,
                               name: &str,
                               value: Value,
                               line: usize)
                               -> EvalResult<()> {
        if let Some(class) = self.static_receiver(object) {
            return self.write_static_field(&class, name, value, line);
        }
        let receiver = self.eval(object)?;
        self.write_instance_field(&receiver, name, value, line)
    }

    /// Resolves a bare name against the fields of the running class.
    ///
    /// Returns `None` when there is no class context or it has no such
    /// field.
    ///
    /// # Errors
    /// `InstanceAccess` for an instance field inside a static method, and
    /// the usual access errors.
    pub(crate) fn read_implicit_member(&self, name: &str, line: usize) -> EvalResult<Option<Value>> {
        let Some(frame) = self.current_frame() else {
            return Ok(None);
        };
        let Some(class) = frame.class.as_ref() else {
            return Ok(None);
        };
        let Some(field) = class.fields.get(name) else {
            return Ok(None);
        };

        if field.is_static {
            return self.read_static_field(class, name, line).map(Some);
        }
        let this = frame.this
                        .clone()
                        .ok_or_else(|| RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                                      member: name.to_string(),
                                                                      line, })?;
        self.read_instance_field(&this, name, line).map(Some)
    }

    /// Assigns to a bare name that refers to a field of the running class.
    ///
    /// Returns `false` when there is no such field.
    pub(crate) fn write_implicit_member(&mut self,
                                        name: &str,
                                        value: Value,
                                        line: usize)
                                        -> EvalResult<bool> {
        let Some(frame) = self.current_frame() else {
            return Ok(false);
        };
        let Some(class) = frame.class.clone() else {
            return Ok(false);
        };
        let this = frame.this.clone();
        let Some(field) = class.fields.get(name) else {
            return Ok(false);
        };

        if field.is_static {
            self.write_static_field(&class, name, value, line)?;
            return Ok(true);
        }
        let this = this.ok_or_else(|| RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                                     member: name.to_string(),
                                                                     line, })?;
        self.write_instance_field(&this, name, value, line)?;
        Ok(true)
    }

    /// The class named by `object`, when `object` is a bare name that is
    /// neither a variable nor a field of the running class.
    fn static_receiver(&self, object: &Expr) -> Option<Rc<ClassInfo>> {
        let Expr::Variable { name, .. } = object else {
            return None;
        };
        if self.scopes.contains(name)
           || self.current_class()
                  .is_some_and(|class| class.fields.contains_key(name))
        {
            return None;
        }
        self.classes.find(name)
    }

    /// Fails with `PrivateAccess` when a private member of `owner` is reached
    /// from code outside `owner`.
    pub(crate) fn check_access(&self,
                               class: &str,
                               member: &str,
                               access: Access,
                               owner: &str,
                               line: usize)
                               -> EvalResult<()> {
        if access == Access::Private && !self.can_access_private(owner) {
            return Err(RuntimeError::PrivateAccess { class: class.to_string(),
                                                     member: member.to_string(),
                                                     line });
        }
        Ok(())
    }

    pub(crate) fn find_method(&self,
                              class: &ClassInfo,
                              name: &str,
                              line: usize)
                              -> EvalResult<MethodInfo> {
        let method = class.methods
                          .get(name)
                          .ok_or_else(|| unknown_member(&class.name, name, line))?;
        self.check_access(&class.name, name, method.access, &method.owner, line)?;
        Ok(method.clone())
    }

    fn read_static_field(&self, class: &ClassInfo, name: &str, line: usize) -> EvalResult<Value> {
        let field = class.fields
                         .get(name)
                         .ok_or_else(|| unknown_member(&class.name, name, line))?;
        if !field.is_static {
            return Err(RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                      member: name.to_string(),
                                                      line, });
        }
        self.check_access(&class.name, name, field.access, &field.owner, line)?;
        class.static_value(name)
             .ok_or_else(|| unknown_member(&class.name, name, line))
    }

    fn write_static_field(&self,
                          class: &ClassInfo,
                          name: &str,
                          value: Value,
                          line: usize)
                          -> EvalResult<()> {
        let field = class.fields
                         .get(name)
                         .ok_or_else(|| unknown_member(&class.name, name, line))?;
        if !field.is_static {
            return Err(RuntimeError::InstanceAccess { class:  class.name.clone(),
                                                      member: name.to_string(),
                                                      line, });
        }
        self.check_access(&class.name, name, field.access, &field.owner, line)?;
        if field.is_const {
            return Err(RuntimeError::ConstAssignment { name: format!("{}.{name}", class.name),
                                                       line });
        }
        if !field.ty.accepts(&value) {
            return Err(RuntimeError::TypeMismatch { expected: field.ty.to_string(),
                                                    found: value.type_name(),
                                                    line });
        }
        if class.set_static(name, value) {
            Ok(())
        } else {
            Err(unknown_member(&class.name, name, line))
        }
    }

    fn read_instance_field(&self, receiver: &Value, name: &str, line: usize) -> EvalResult<Value> {
        let Value::Object(object) = receiver else {
            return Err(RuntimeError::InvalidMemberTarget { found: receiver.type_name(),
                                                           member: name.to_string(),
                                                           line });
        };
        let instance = object.borrow();
        let class = &instance.class;
        let field = class.fields
                         .get(name)
                         .ok_or_else(|| unknown_member(&class.name, name, line))?;
        if field.is_static {
            return Err(RuntimeError::StaticAccess { class:  class.name.clone(),
                                                    member: name.to_string(),
                                                    line, });
        }
        self.check_access(&class.name, name, field.access, &field.owner, line)?;
        instance.fields
                .get(name)
                .cloned()
                .ok_or_else(|| unknown_member(&class.name, name, line))
    }

    fn write_instance_field(&self,
                            receiver: &Value,
                            name: &str,
                            value: Value,
                            line: usize)
                            -> EvalResult<()> {
        let Value::Object(object) = receiver else {
            return Err(RuntimeError::InvalidMemberTarget { found: receiver.type_name(),
                                                           member: name.to_string(),
                                                           line });
        };
        let class = Rc::clone(&object.borrow().class);
        let field = class.fields
                         .get(name)
                         .ok_or_else(|| unknown_member(&class.name, name, line))?;
        if field.is_static {
            return Err(RuntimeError::StaticAccess { class:  class.name.clone(),
                                                    member: name.to_string(),
                                                    line, });
        }
        self.check_access(&class.name, name, field.access, &field.owner, line)?;
        if field.is_const {
            return Err(RuntimeError::ConstAssignment { name: format!("{}.{name}", class.name),
                                                       line });
        }
        // Checked before borrowing: `value` may be this very object.
        if !field.ty.accepts(&value) {
            return Err(RuntimeError::TypeMismatch { expected: field.ty.to_string(),
                                                    found: value.type_name(),
                                                    line });
        }
        object.borrow_mut().fields.insert(name.to_string(), value);
        Ok(())
    }
}
