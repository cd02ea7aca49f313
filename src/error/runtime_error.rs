use crate::interpreter::value::core::Value;

#[derive(Debug, Clone)]
/// Represents all errors that can occur during execution.
pub enum RuntimeError {
    /// Tried to read or write a variable that is not declared in the
    /// visible scope.
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither builtin, user-declared nor a
    /// method of the current class.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Referenced a class name that is not in the class table.
    UnknownClass {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class has no field or method with the requested name.
    UnknownMember {
        /// The class that was searched.
        class:  String,
        /// The requested member.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A name was declared twice in the same scope frame or table.
    AlreadyDeclared {
        /// The duplicated name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class name was declared twice.
    ClassAlreadyDeclared {
        /// The duplicated class name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to redefine a built-in function.
    BuiltinFunctionRedefinition {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A value does not match the declared type of its destination.
    TypeMismatch {
        /// The declared type.
        expected: String,
        /// The type of the offending value.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator was applied to operand variants it does not support.
    InvalidOperation {
        /// The operator as written in source.
        op:    String,
        /// Type of the left operand.
        left:  String,
        /// Type of the right operand.
        right: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A condition did not evaluate to `bool`.
    ExpectedBoolean {
        /// The type that was found.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Division or modulo by the additive identity.
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer or decimal arithmetic overflowed.
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array or string element outside its bounds.
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// The length of the indexed value.
        len:   usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An array was declared with a negative size.
    NegativeArraySize {
        /// The requested size.
        size: i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array size disagrees with the length of its initializer.
    ArraySizeMismatch {
        /// The declared size.
        size:  i64,
        /// The number of initializer elements.
        count: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// An empty array literal without an element type annotation.
    UntypedEmptyArray {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Indexing was applied to a value that is neither array nor string.
    NotIndexable {
        /// The type of the indexed value.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Member access on a value that has no members.
    InvalidMemberTarget {
        /// The type of the receiver.
        found:  String,
        /// The requested member.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The wrong number of arguments was supplied to a callable.
    ArgumentCountMismatch {
        /// The callable name.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A private member was reached from outside its declaring class.
    PrivateAccess {
        /// The declaring class.
        class:  String,
        /// The member name.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A static member was reached through an instance.
    StaticAccess {
        /// The declaring class.
        class:  String,
        /// The member name.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// An instance member was reached through a class name or from a static
    /// context.
    InstanceAccess {
        /// The declaring class.
        class:  String,
        /// The member name.
        member: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// `new` was applied to a static class.
    StaticInstantiation {
        /// The class name.
        class: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `new` was applied to an interface.
    AbstractInstantiation {
        /// The interface name.
        class: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Called a method that only exists as a signature.
    MissingMethodBody {
        /// The class name.
        class:  String,
        /// The method name.
        method: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A class header names an invalid parent or interface list.
    InvalidInheritance {
        /// The class being declared.
        class:   String,
        /// What is wrong with the header.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// `this` used outside an instance method.
    ThisOutsideInstance {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A non-void function finished without returning a value.
    NotAllPathsReturn {
        /// The function name.
        name: String,
        /// The source line of the call.
        line: usize,
    },
    /// A void function returned a value.
    VoidReturnWithValue {
        /// The function name.
        name: String,
        /// The source line of the call.
        line: usize,
    },
    /// Assignment to a `const` variable or field.
    ConstAssignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to leave the global scope frame.
    ScopeUnderflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// `break`, `continue` or `return` reached a point with no legal
    /// handler.
    ControlFlowEscape {
        /// The keyword that escaped.
        keyword: &'static str,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A thrown value that no `catch` clause handled.
    Thrown {
        /// The thrown value.
        value: Value,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// User call nesting exceeded the interpreter limit.
    StackOverflow {
        /// The depth at which execution stopped.
        depth: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Console input or output failed.
    Io {
        /// Details from the underlying I/O error.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An `include` could not be loaded.
    Include {
        /// The requested path.
        path:    String,
        /// Why loading failed.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// Returns `true` if a `try`/`catch` block may intercept this error.
    ///
    /// Structural failures (escaped control flow, scope underflow, stack
    /// exhaustion) always terminate the program.
    #[must_use]
    pub const fn is_catchable(&self) -> bool {
        !matches!(self,
                  Self::ControlFlowEscape { .. }
                  | Self::ScopeUnderflow { .. }
                  | Self::StackOverflow { .. })
    }

    /// Converts the error into the value seen by a `catch` clause.
    ///
    /// A user `throw` hands back the thrown value unchanged; every other
    /// error is presented as its message string.
    #[must_use]
    pub fn into_thrown_value(self) -> Value {
        match self {
            Self::Thrown { value, .. } => value,
            other => Value::String(other.to_string()),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownVariable { name, line } => {
                write!(f, "Error on line {line}: Variable '{name}' is not declared.")
            },
            Self::UnknownFunction { name, line } => {
                write!(f, "Error on line {line}: Unknown function '{name}'.")
            },
            Self::UnknownClass { name, line } => {
                write!(f, "Error on line {line}: Unknown class '{name}'.")
            },
            Self::UnknownMember { class,
                                  member,
                                  line, } => {
                write!(f, "Error on line {line}: Class '{class}' has no member '{member}'.")
            },
            Self::AlreadyDeclared { name, line } => {
                write!(f, "Error on line {line}: '{name}' is already declared.")
            },
            Self::ClassAlreadyDeclared { name, line } => {
                write!(f, "Error on line {line}: Class '{name}' is already declared.")
            },
            Self::BuiltinFunctionRedefinition { name, line } => write!(f,
                                                                       "Error on line {line}: Cannot redefine built-in function '{name}'."),
            Self::TypeMismatch { expected,
                                 found,
                                 line, } => write!(f,
                                                   "Error on line {line}: Type error: expected {expected}, found {found}."),
            Self::InvalidOperation { op,
                                     left,
                                     right,
                                     line, } => write!(f,
                                                       "Error on line {line}: Type error: operator '{op}' cannot be applied to {left} and {right}."),
            Self::ExpectedBoolean { found, line } => {
                write!(f, "Error on line {line}: Expected bool condition, found {found}.")
            },
            Self::DivisionByZero { line } => write!(f, "Error on line {line}: Division by zero."),
            Self::Overflow { line } => {
                write!(f, "Error on line {line}: Arithmetic overflow while computing result.")
            },
            Self::IndexOutOfBounds { index, len, line } => write!(f,
                                                                  "Error on line {line}: Index {index} is out of bounds for length {len}."),
            Self::NegativeArraySize { size, line } => {
                write!(f, "Error on line {line}: Array size {size} is negative.")
            },
            Self::ArraySizeMismatch { size, count, line } => write!(f,
                                                                    "Error on line {line}: Array declared with size {size} but initialized with {count} elements."),
            Self::UntypedEmptyArray { line } => write!(f,
                                                       "Error on line {line}: Empty array literal needs an element type, e.g. []:int."),
            Self::NotIndexable { found, line } => {
                write!(f, "Error on line {line}: Values of type {found} cannot be indexed.")
            },
            Self::InvalidMemberTarget { found,
                                        member,
                                        line, } => write!(f,
                                                          "Error on line {line}: Cannot access member '{member}' on a value of type {found}."),
            Self::ArgumentCountMismatch { name,
                                          expected,
                                          found,
                                          line, } => write!(f,
                                                            "Error on line {line}: '{name}' expects {expected} argument(s) but got {found}."),
            Self::PrivateAccess { class,
                                  member,
                                  line, } => write!(f,
                                                    "Error on line {line}: Member '{member}' of class '{class}' is private."),
            Self::StaticAccess { class,
                                 member,
                                 line, } => write!(f,
                                                   "Error on line {line}: Static member '{member}' must be accessed through class '{class}'."),
            Self::InstanceAccess { class,
                                   member,
                                   line, } => write!(f,
                                                     "Error on line {line}: Instance member '{member}' of class '{class}' needs an instance."),
            Self::StaticInstantiation { class, line } => {
                write!(f, "Error on line {line}: Static class '{class}' cannot be instantiated.")
            },
            Self::AbstractInstantiation { class, line } => {
                write!(f, "Error on line {line}: Interface '{class}' cannot be instantiated.")
            },
            Self::MissingMethodBody { class,
                                      method,
                                      line, } => write!(f,
                                                        "Error on line {line}: Method '{class}.{method}' has no body."),
            Self::InvalidInheritance { class,
                                       details,
                                       line, } => {
                write!(f, "Error on line {line}: Invalid header for class '{class}': {details}.")
            },
            Self::ThisOutsideInstance { line } => write!(f,
                                                         "Error on line {line}: 'this' can only be used inside an instance method."),
            Self::NotAllPathsReturn { name, line } => write!(f,
                                                             "Error on line {line}: Not all paths of '{name}' return a value."),
            Self::VoidReturnWithValue { name, line } => write!(f,
                                                               "Error on line {line}: Void function '{name}' cannot return a value."),
            Self::ConstAssignment { name, line } => {
                write!(f, "Error on line {line}: Cannot assign to constant '{name}'.")
            },
            Self::ScopeUnderflow { line } => {
                write!(f, "Error on line {line}: Cannot exit the global scope.")
            },
            Self::ControlFlowEscape { keyword, line } => write!(f,
                                                                "Error on line {line}: '{keyword}' used outside of a construct that can handle it."),
            Self::Thrown { value, line } => {
                write!(f, "Error on line {line}: Uncaught exception: {value}")
            },
            Self::StackOverflow { depth, line } => write!(f,
                                                          "Error on line {line}: Call depth limit of {depth} exceeded."),
            Self::Io { details, line } => write!(f, "Error on line {line}: I/O error: {details}."),
            Self::Include { path,
                            details,
                            line, } => {
                write!(f, "Error on line {line}: Cannot include '{path}': {details}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
