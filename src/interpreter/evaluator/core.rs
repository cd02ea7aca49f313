use std::{collections::HashSet, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::{FunctionDecl, Statement},
    error::RuntimeError,
    interpreter::{
        console::Console,
        module::{ModuleLoader, SourceLoader},
        storage::{class_table::ClassStorage, scope::ScopeStack},
        value::{
            class::{ClassInfo, NativeModule},
            core::Value,
            types::TypeValue,
        },
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Maximum nesting of user function, method and constructor calls.
pub const MAX_CALL_DEPTH: usize = 200;

/// How a statement finished.
///
/// Non-local control flow travels outward as the `Ok` payload of statement
/// execution until a construct that handles it: loops consume `Break` and
/// `Continue`, calls consume `Return`, `try` consumes `Thrown`.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlSignal {
    /// Fell off the end of the statement.
    Normal,
    /// `break;`
    Break,
    /// `continue;`
    Continue,
    /// `return;` or `return value;`
    Return(Option<Value>),
    /// `throw value;`
    Thrown(Value),
}

impl ControlSignal {
    /// Returns `true` for `Normal`.
    #[must_use]
    pub const fn is_normal(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// One active user call.
#[derive(Debug, Clone)]
pub struct CallFrame {
    /// Function or `Class.method` name, for diagnostics.
    pub name:        String,
    /// The class whose members resolve by bare name.
    pub class:       Option<Rc<ClassInfo>>,
    /// The class that declared the running member; private members of this
    /// class are accessible.
    pub owner:       Option<String>,
    /// The receiver; `None` in free functions and static methods.
    pub this:        Option<Value>,
    /// Declared return type, used to type empty array literals in `return`.
    pub return_type: TypeValue,
}

impl CallFrame {
    /// A frame for a free function.
    #[must_use]
    pub fn function(decl: &FunctionDecl) -> Self {
        Self { name:        decl.name.clone(),
               class:       None,
               owner:       None,
               this:        None,
               return_type: decl.return_type.clone(), }
    }

    /// A frame running code that belongs to `class`.
    #[must_use]
    pub fn member(name: &str,
                  class: &Rc<ClassInfo>,
                  owner: &str,
                  this: Option<Value>,
                  return_type: TypeValue)
                  -> Self {
        Self { name: format!("{}.{name}", class.name),
               class: Some(Rc::clone(class)),
               owner: Some(owner.to_string()),
               this,
               return_type }
    }
}

/// Stores the runtime evaluation context.
///
/// This struct holds the interpreter state: the variable scope stack, the
/// class table, user-defined functions, the console used by `print` and
/// `read`, the loader behind `include`, and the stack of active calls.
///
/// ## Usage
///
/// `Context` is created once per program and reused for every statement.
/// Hosts may register native classes before running code.
///
/// ```
/// use tessera::{interpreter::{console::{BufferConsole, Console}, evaluator::core::Context}, parse};
///
/// let console = BufferConsole::new();
/// let mut context = Context::with_console(Console::Buffer(console.clone()));
///
/// let program = parse("let x: int = 20; println(str(x + 22));").unwrap();
/// context.execute_all(&program).unwrap();
///
/// assert_eq!(console.output(), "42\n");
/// ```
pub struct Context {
    /// Variable frames; only the top frame is visible.
    pub scopes:            ScopeStack,
    /// Classes, interfaces, enums and native modules.
    pub classes:           ClassStorage,
    /// User-defined free functions, in declaration order.
    pub functions:         IndexMap<String, Rc<FunctionDecl>>,
    /// Destination of `print` and source of `read`.
    pub console:           Console,
    pub(crate) loader:     Box<dyn ModuleLoader>,
    pub(crate) call_stack: Vec<CallFrame>,
    /// Paths already executed by `include`.
    pub(crate) included:   HashSet<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Creates a context writing to stdout and loading includes from the
    /// working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Console::Stdout)
    }

    /// Creates a context using `console` for `print` and `read`.
    #[must_use]
    pub fn with_console(console: Console) -> Self {
        Self { scopes: ScopeStack::new(),
               classes: ClassStorage::new(),
               functions: IndexMap::new(),
               console,
               loader: Box::new(SourceLoader::default()),
               call_stack: Vec::new(),
               included: HashSet::new() }
    }

    /// Replaces the loader used by `include`.
    #[must_use]
    pub fn with_loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Adds a host-built class to the class table.
    ///
    /// # Errors
    /// `ClassAlreadyDeclared` if the name is taken.
    pub fn register_class(&mut self, info: ClassInfo) -> EvalResult<Rc<ClassInfo>> {
        tracing::debug!(class = %info.name, "registering native class");
        self.classes.declare(info, 0)
    }

    /// Adds the class described by a native module.
    ///
    /// # Errors
    /// `ClassAlreadyDeclared` if the name is taken.
    pub fn register_module(&mut self, module: &dyn NativeModule) -> EvalResult<Rc<ClassInfo>> {
        self.register_class(module.describe())
    }

    /// Executes a program.
    ///
    /// Declarations are registered first, so code may call functions and
    /// instantiate classes declared further down: functions, then interfaces
    /// and enums, then classes in source order. The remaining statements
    /// then run in order.
    ///
    /// # Errors
    /// The first runtime error. A `break`, `continue` or `return` outside of
    /// any loop or function is reported as `ControlFlowEscape`, and a thrown
    /// value nobody caught as `Thrown`.
    pub fn execute_all(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            if let Statement::Function(decl) = statement {
                self.declare_function(decl)?;
            }
        }
        for statement in statements {
            match statement {
                Statement::Interface(decl) => self.declare_interface(decl)?,
                Statement::Enum(decl) => self.declare_enum(decl)?,
                _ => {},
            }
        }
        for statement in statements {
            if let Statement::Class(decl) = statement {
                self.declare_class(decl)?;
            }
        }

        for statement in statements.iter().filter(|s| !is_declaration(s)) {
            let line = statement.line();
            match self.execute(statement)? {
                ControlSignal::Normal => {},
                ControlSignal::Break => {
                    return Err(RuntimeError::ControlFlowEscape { keyword: "break",
                                                                 line });
                },
                ControlSignal::Continue => {
                    return Err(RuntimeError::ControlFlowEscape { keyword: "continue",
                                                                 line });
                },
                ControlSignal::Return(_) => {
                    return Err(RuntimeError::ControlFlowEscape { keyword: "return",
                                                                 line });
                },
                ControlSignal::Thrown(value) => return Err(RuntimeError::Thrown { value, line }),
            }
        }
        Ok(())
    }

    /// The innermost active call, if any.
    pub(crate) fn current_frame(&self) -> Option<&CallFrame> {
        self.call_stack.last()
    }

    /// The class whose members resolve by bare name right now.
    pub(crate) fn current_class(&self) -> Option<Rc<ClassInfo>> {
        self.current_frame().and_then(|frame| frame.class.clone())
    }
}

const fn is_declaration(statement: &Statement) -> bool {
    matches!(statement,
             Statement::Function(_)
             | Statement::Class(_)
             | Statement::Interface(_)
             | Statement::Enum(_))
}
