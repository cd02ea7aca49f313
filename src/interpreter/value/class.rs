use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::{Access, Accessors, ConstructorDecl, FunctionDecl, MethodModifier, Param, VariableDecl},
    interpreter::{
        evaluator::core::EvalResult,
        value::{core::Value, types::TypeValue},
    },
};

/// A method implemented in Rust. Receives the evaluated arguments and the
/// line of the call.
pub type NativeFn = Rc<dyn Fn(&[Value], usize) -> EvalResult<Value>>;

/// A plugin that contributes a class implemented outside the interpreted
/// language.
///
/// Hosts register modules with `Context::register_module`; the returned
/// `ClassInfo` enters the class table like any declared class.
pub trait NativeModule {
    /// Describes the class this module provides.
    fn describe(&self) -> ClassInfo;
}

/// How a field gets its initial value.
#[derive(Debug, Clone)]
pub enum FieldInit {
    /// Evaluate the declaration (size and initializer) when the owner is
    /// created.
    Declared(Rc<VariableDecl>),
    /// A fixed value.
    Value(Value),
}

/// A field of a class.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name:      String,
    pub ty:        TypeValue,
    pub access:    Access,
    pub is_static: bool,
    pub is_const:  bool,
    /// Recorded only.
    pub accessors: Accessors,
    /// The class that declared the field.
    pub owner:     String,
    pub init:      FieldInit,
}

/// The implementation behind a method.
#[derive(Clone)]
pub enum MethodBody {
    /// A method written in the language.
    User(Rc<FunctionDecl>),
    /// A method implemented in Rust.
    Native(NativeFn),
    /// An interface signature.
    Abstract,
}

impl fmt::Debug for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(decl) => f.debug_tuple("User").field(&decl.name).finish(),
            Self::Native(_) => write!(f, "Native"),
            Self::Abstract => write!(f, "Abstract"),
        }
    }
}

/// A method of a class.
#[derive(Debug, Clone)]
pub struct MethodInfo {
    pub name:        String,
    pub access:      Access,
    pub is_static:   bool,
    /// `virt` / `ovrd`; recorded only.
    pub modifier:    MethodModifier,
    pub params:      Vec<Param>,
    pub return_type: TypeValue,
    /// The class that declared the method.
    pub owner:       String,
    pub body:        MethodBody,
}

/// A class constructor together with the class that declared it.
#[derive(Debug, Clone)]
pub struct ConstructorInfo {
    pub decl:  Rc<ConstructorDecl>,
    pub owner: String,
}

/// The registered shape of a class, interface or enum.
///
/// Inherited fields and methods are copied into `fields` and `methods`
/// when the class is registered, so lookups never walk the parent chain.
/// Static values live in `statics` of the class that declared them.
#[derive(Debug)]
pub struct ClassInfo {
    pub name:         String,
    pub fields:       IndexMap<String, FieldInfo>,
    pub methods:      IndexMap<String, MethodInfo>,
    pub constructor:  Option<ConstructorInfo>,
    pub is_static:    bool,
    pub is_interface: bool,
    /// Names listed after `::` that are not the parent.
    pub implements:   Vec<String>,
    pub parent:       Option<Rc<Self>>,
    /// Current values of the static fields declared by this class.
    pub statics:      RefCell<IndexMap<String, Value>>,
}

impl ClassInfo {
    /// An empty, instantiable class.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name:         name.to_string(),
               fields:       IndexMap::new(),
               methods:      IndexMap::new(),
               constructor:  None,
               is_static:    false,
               is_interface: false,
               implements:   Vec::new(),
               parent:       None,
               statics:      RefCell::new(IndexMap::new()), }
    }

    /// An empty static class, the usual shape of a native module.
    #[must_use]
    pub fn new_static(name: &str) -> Self {
        Self { is_static: true,
               ..Self::new(name) }
    }

    /// Adds a public static method implemented in Rust.
    #[must_use]
    pub fn with_native_method(mut self,
                              name: &str,
                              params: &[(&str, TypeValue)],
                              return_type: TypeValue,
                              body: impl Fn(&[Value], usize) -> EvalResult<Value> + 'static)
                              -> Self {
        let params = params.iter()
                           .map(|(param, ty)| Param { name: (*param).to_string(),
                                                      ty:   ty.clone(),
                                                      line: 0, })
                           .collect();
        let method = MethodInfo { name: name.to_string(),
                                  access: Access::Public,
                                  is_static: true,
                                  modifier: MethodModifier::None,
                                  params,
                                  return_type,
                                  owner: self.name.clone(),
                                  body: MethodBody::Native(Rc::new(body)) };
        self.methods.insert(name.to_string(), method);
        self
    }

    /// Adds a public static constant.
    #[must_use]
    pub fn with_constant(mut self, name: &str, value: Value) -> Self {
        let field = FieldInfo { name:      name.to_string(),
                                ty:        value.type_of(),
                                access:    Access::Public,
                                is_static: true,
                                is_const:  true,
                                accessors: Accessors::default(),
                                owner:     self.name.clone(),
                                init:      FieldInit::Value(value.clone()), };
        self.fields.insert(name.to_string(), field);
        self.statics.borrow_mut().insert(name.to_string(), value);
        self
    }

    /// Returns `true` if this class is `name`, descends from it, or
    /// implements it.
    #[must_use]
    pub fn is_a(&self, name: &str) -> bool {
        self.name == name
        || self.implements.iter().any(|interface| interface == name)
        || self.parent.as_ref().is_some_and(|parent| parent.is_a(name))
    }

    /// Current value of a static field, searching up the parent chain.
    #[must_use]
    pub fn static_value(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.statics.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.static_value(name))
    }

    /// Overwrites a static field in the class that declared it. Returns
    /// `false` if no class in the chain has it.
    pub fn set_static(&self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.statics.borrow_mut().get_mut(name) {
            *slot = value;
            return true;
        }
        self.parent.as_ref().is_some_and(|parent| parent.set_static(name, value))
    }
}

/// An object created by `new`.
pub struct ClassInstance {
    pub class:  Rc<ClassInfo>,
    /// Instance field values, in declaration order.
    pub fields: IndexMap<String, Value>,
}

impl ClassInstance {
    /// Wraps a fresh instance with no fields set yet.
    #[must_use]
    pub fn new_value(class: Rc<ClassInfo>) -> Value {
        Value::Object(Rc::new(RefCell::new(Self { class,
                                                  fields: IndexMap::new() })))
    }
}

impl fmt::Debug for ClassInstance {
    /// Objects can reference themselves, so only field names are printed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassInstance")
         .field("class", &self.class.name)
         .field("fields", &self.fields.keys().collect::<Vec<_>>())
         .finish()
    }
}
