use std::rc::Rc;

use crate::{
    ast::{Access, ClassDecl, EnumDecl, FunctionDecl, InterfaceDecl, MethodModifier},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{CallFrame, Context, EvalResult},
            function::core::is_builtin,
        },
        value::{
            class::{ClassInfo, ConstructorInfo, FieldInfo, FieldInit, MethodBody, MethodInfo},
            core::Value,
        },
    },
};

impl Context {
    /// Registers a user function.
    ///
    /// # Errors
    /// `BuiltinFunctionRedefinition` for a builtin name, `AlreadyDeclared`
    /// for a second function with the same name.
    pub fn declare_function(&mut self, decl: &Rc<FunctionDecl>) -> EvalResult<()> {
        if is_builtin(&decl.name) {
            return Err(RuntimeError::BuiltinFunctionRedefinition { name: decl.name.clone(),
                                                                   line: decl.line, });
        }
        if self.functions.contains_key(&decl.name) {
            return Err(RuntimeError::AlreadyDeclared { name: decl.name.clone(),
                                                       line: decl.line, });
        }
        tracing::debug!(function = %decl.name, params = decl.params.len(), "declared function");
        self.functions.insert(decl.name.clone(), Rc::clone(decl));
        Ok(())
    }

    /// Registers a class and evaluates its static field initializers.
    ///
    /// Among the names after `::`, a declared class that is not an interface
    /// becomes the parent; the rest must be interfaces. The parent's fields,
    /// methods and constructor are copied in unless redeclared. In a static
    /// class every member is static.
    ///
    /// # Errors
    /// `UnknownClass` for an undeclared supertype, `InvalidInheritance` for
    /// a second parent or a static parent, `AlreadyDeclared` for duplicate
    /// members, `ClassAlreadyDeclared`, and errors from static initializers.
    pub fn declare_class(&mut self, decl: &Rc<ClassDecl>) -> EvalResult<()> {
        let line = decl.line;
        let mut info = ClassInfo::new(&decl.name);
        info.is_static = decl.is_static;

        for name in &decl.supertypes {
            let supertype = self.classes.get(name, line)?;
            if supertype.is_interface {
                info.implements.push(name.clone());
                continue;
            }
            if info.parent.is_some() || supertype.is_static {
                let details = if supertype.is_static {
                    format!("cannot extend static class '{name}'")
                } else {
                    format!("'{name}' would be a second parent class")
                };
                return Err(RuntimeError::InvalidInheritance { class: decl.name.clone(),
                                                              details,
                                                              line });
            }
            info.fields.clone_from(&supertype.fields);
            info.methods.clone_from(&supertype.methods);
            info.constructor.clone_from(&supertype.constructor);
            info.parent = Some(supertype);
        }

        for field in &decl.fields {
            let name = &field.decl.name;
            if info.fields.get(name).is_some_and(|existing| existing.owner == decl.name) {
                return Err(RuntimeError::AlreadyDeclared { name: format!("{}.{name}", decl.name),
                                                           line: field.decl.line, });
            }
            let field_info = FieldInfo { name:      name.clone(),
                                         ty:        field.decl.ty.clone(),
                                         access:    field.access,
                                         is_static: decl.is_static || field.is_static,
                                         is_const:  field.decl.is_const,
                                         accessors: field.accessors,
                                         owner:     decl.name.clone(),
                                         init:      FieldInit::Declared(Rc::clone(&field.decl)), };
            info.fields.insert(name.clone(), field_info);
        }

        for method in &decl.methods {
            let function = &method.function;
            if info.methods
                   .get(&function.name)
                   .is_some_and(|existing| existing.owner == decl.name)
            {
                let name = format!("{}.{}", decl.name, function.name);
                return Err(RuntimeError::AlreadyDeclared { name,
                                                           line: function.line });
            }
            let method_info = MethodInfo { name:        function.name.clone(),
                                           access:      method.access,
                                           is_static:   decl.is_static || method.is_static,
                                           modifier:    method.modifier,
                                           params:      function.params.clone(),
                                           return_type: function.return_type.clone(),
                                           owner:       decl.name.clone(),
                                           body:        MethodBody::User(Rc::clone(function)), };
            info.methods.insert(function.name.clone(), method_info);
        }

        if let Some(constructor) = &decl.constructor {
            info.constructor = Some(ConstructorInfo { decl:  Rc::clone(constructor),
                                                      owner: decl.name.clone(), });
        }

        let class = self.classes.declare(info, line)?;
        tracing::debug!(class = %class.name,
                        parent = class.parent.as_ref().map(|p| p.name.as_str()),
                        fields = class.fields.len(),
                        methods = class.methods.len(),
                        "declared class");
        self.initialize_statics(&class, line)
    }

    /// Evaluates the static fields declared by `class`, in order. Each
    /// initializer runs in the class context and sees the fields before it.
    fn initialize_statics(&mut self, class: &Rc<ClassInfo>, line: usize) -> EvalResult<()> {
        for field in class.fields
                          .values()
                          .filter(|field| field.is_static && field.owner == class.name)
        {
            let value = match &field.init {
                FieldInit::Value(value) => value.clone(),
                FieldInit::Declared(decl) => {
                    let frame = CallFrame::member(&field.name, class, &class.name, None, field.ty.clone());
                    self.with_frame(frame, line, |ctx| ctx.eval_declared_value(decl))?
                },
            };
            if !field.ty.accepts(&value) {
                return Err(RuntimeError::TypeMismatch { expected: field.ty.to_string(),
                                                        found: value.type_name(),
                                                        line });
            }
            class.statics.borrow_mut().insert(field.name.clone(), value);
        }
        Ok(())
    }

    /// Registers an interface as a class entry that cannot be instantiated
    /// and whose methods have no body.
    pub fn declare_interface(&mut self, decl: &Rc<InterfaceDecl>) -> EvalResult<()> {
        let mut info = ClassInfo::new(&decl.name);
        info.is_interface = true;
        for signature in &decl.methods {
            let method = MethodInfo { name:        signature.name.clone(),
                                      access:      Access::Public,
                                      is_static:   false,
                                      modifier:    MethodModifier::Virtual,
                                      params:      signature.params.clone(),
                                      return_type: signature.return_type.clone(),
                                      owner:       decl.name.clone(),
                                      body:        MethodBody::Abstract, };
            info.methods.insert(signature.name.clone(), method);
        }
        tracing::debug!(interface = %decl.name, methods = decl.methods.len(), "declared interface");
        self.classes.declare(info, decl.line)?;
        Ok(())
    }

    /// Registers an enum as a static class of `int` constants.
    ///
    /// A member without an explicit value takes the previous value plus
    /// one; the first defaults to 0.
    ///
    /// # Errors
    /// `AlreadyDeclared` for a repeated member, `Overflow` past `i64::MAX`.
    pub fn declare_enum(&mut self, decl: &Rc<EnumDecl>) -> EvalResult<()> {
        let mut info = ClassInfo::new_static(&decl.name);
        let mut next = Some(0_i64);

        for (member, explicit) in &decl.members {
            if info.fields.contains_key(member) {
                return Err(RuntimeError::AlreadyDeclared { name: format!("{}.{member}", decl.name),
                                                           line: decl.line, });
            }
            let value = match explicit {
                Some(value) => *value,
                None => next.ok_or(RuntimeError::Overflow { line: decl.line })?,
            };
            next = value.checked_add(1);
            info = info.with_constant(member, Value::Int(value));
        }

        tracing::debug!(enumeration = %decl.name, members = decl.members.len(), "declared enum");
        self.classes.declare(info, decl.line)?;
        Ok(())
    }

    /// Runs `include "path";`. A path already included by this context is
    /// skipped. A path whose load or execution failed is not recorded, so a
    /// later `include` of it is attempted again.
    pub(crate) fn execute_include(&mut self, path: &str, line: usize) -> EvalResult<()> {
        if self.included.contains(path) {
            tracing::debug!(path, "module already included");
            return Ok(());
        }
        let statements = self.loader.load(path, line)?;
        tracing::debug!(path, statements = statements.len(), "including module");

        self.included.insert(path.to_string());
        let result = self.execute_all(&statements);
        if result.is_err() {
            self.included.remove(path);
        }
        result
    }
}

