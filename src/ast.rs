use std::{fmt, rc::Rc};

use rust_decimal::Decimal;

use crate::interpreter::value::types::TypeValue;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: numbers of each numeric type, booleans, strings and
/// characters.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `42`
    Int(i64),
    /// `1.5f`
    Float(f32),
    /// `1.5d`
    Double(f64),
    /// `1.5m`
    Decimal(Decimal),
    /// `true` or `false`.
    Bool(bool),
    /// `"text"`
    String(String),
    /// `'c'`
    Char(char),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// Each variant models a distinct syntactic construct and carries the source
/// line it started on.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean, etc.).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// The current instance.
    This {
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation or logical not).
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (addition, comparison, etc.).
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `condition ? then_expr : else_expr`
    Ternary {
        /// Must evaluate to `bool`.
        condition: Box<Self>,
        /// Value when the condition holds.
        then_expr: Box<Self>,
        /// Value otherwise.
        else_expr: Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// Assignment to a variable, array element or field. Compound
    /// assignments are desugared into this node.
    Assign {
        /// What is assigned to.
        target: AssignTarget,
        /// The new value.
        value:  Box<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// Function call expression (e.g. `print(x)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `object.method(arguments)`; `object` may name a class for static
    /// calls.
    MethodCall {
        /// The receiver.
        object:    Box<Self>,
        /// Name of the method.
        method:    String,
        /// Arguments to the method.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `object.name`; `object` may name a class for static fields.
    Member {
        /// The receiver.
        object: Box<Self>,
        /// Name of the field.
        name:   String,
        /// Line number in the source code.
        line:   usize,
    },
    /// `array[index]`
    Index {
        /// The indexed array or string.
        array: Box<Self>,
        /// The index expression.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `[a, b, c]` with an optional `:Type` element annotation.
    ArrayLiteral {
        /// The elements, in order.
        elements:     Vec<Self>,
        /// Explicit element type, required for empty literals.
        element_type: Option<TypeValue>,
        /// Line number in the source code.
        line:         usize,
    },
    /// `new Class(arguments)`
    New {
        /// Name of the class.
        class:     String,
        /// Constructor arguments.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `expr is Type`
    Is {
        /// The tested value.
        expr: Box<Self>,
        /// The type tested against.
        ty:   TypeValue,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// The source line of the expression.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::This { line }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Ternary { line, .. }
            | Self::Assign { line, .. }
            | Self::Call { line, .. }
            | Self::MethodCall { line, .. }
            | Self::Member { line, .. }
            | Self::Index { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::New { line, .. }
            | Self::Is { line, .. } => *line,
        }
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    /// `name = ...`
    Variable(String),
    /// `array[index] = ...`
    Index {
        /// The array expression.
        array: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// `object.name = ...`
    Member {
        /// The receiver; may name a class for static fields.
        object: Box<Expr>,
        /// Name of the field.
        name:   String,
    },
}

impl AssignTarget {
    /// Rebuilds the expression that reads the target's current value.
    #[must_use]
    pub fn to_expr(&self, line: usize) -> Expr {
        match self {
            Self::Variable(name) => Expr::Variable { name: name.clone(),
                                                     line },
            Self::Index { array, index } => Expr::Index { array: array.clone(),
                                                          index: index.clone(),
                                                          line },
            Self::Member { object, name } => Expr::Member { object: object.clone(),
                                                            name: name.clone(),
                                                            line },
        }
    }
}

/// Declared length of an array variable or field.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayLength {
    /// `T[n]`, checked against the initializer at runtime.
    Explicit(Expr),
    /// `T[]` or `T[0]`: taken from the initializer.
    Inferred,
}

/// A `let` or `const` declaration; also the shape of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub name:         String,
    pub ty:           TypeValue,
    /// Present for array declarations.
    pub array_length: Option<ArrayLength>,
    pub initializer:  Option<Expr>,
    pub is_const:     bool,
    pub line:         usize,
}

/// A function or method parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty:   TypeValue,
    pub line: usize,
}

/// Represents a user-defined function.
///
/// The same node describes free functions and class methods; `=> expr;`
/// bodies are expanded into a single statement when parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    /// The function's name.
    pub name:        String,
    /// The parameters, in order.
    pub params:      Vec<Param>,
    /// `void` when omitted.
    pub return_type: TypeValue,
    /// The statements of the body.
    pub body:        Vec<Statement>,
    /// Line number in the source code.
    pub line:        usize,
}

/// `public` or `private`. Members without a modifier are public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Access {
    #[default]
    Public,
    Private,
}

/// The `(getter, setter)` capability flags of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accessors {
    pub getter: bool,
    pub setter: bool,
}

/// `virt` / `ovrd` on a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MethodModifier {
    #[default]
    None,
    Virtual,
    Override,
}

/// A field inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub decl:      Rc<VariableDecl>,
    pub access:    Access,
    pub is_static: bool,
    pub accessors: Accessors,
}

/// A method inside a class body.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub function:  Rc<FunctionDecl>,
    pub access:    Access,
    pub is_static: bool,
    pub modifier:  MethodModifier,
}

/// `constructor(params) [: parent(args)] { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params:      Vec<Param>,
    /// Arguments for the parent class constructor, run before the body.
    pub parent_args: Option<Vec<Expr>>,
    pub body:        Vec<Statement>,
    pub access:      Access,
    pub line:        usize,
}

/// `[static] class Name [:: A, B] { members }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name:        String,
    pub is_static:   bool,
    /// Names listed after `::`; a declared non-interface class among them
    /// becomes the parent.
    pub supertypes:  Vec<String>,
    pub fields:      Vec<FieldDecl>,
    pub methods:     Vec<MethodDecl>,
    pub constructor: Option<Rc<ConstructorDecl>>,
    pub line:        usize,
}

/// A body-less method signature inside an interface.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSignature {
    pub name:        String,
    pub params:      Vec<Param>,
    pub return_type: TypeValue,
    pub line:        usize,
}

/// `interface Name { signatures }`
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub name:    String,
    pub methods: Vec<MethodSignature>,
    pub line:    usize,
}

/// `enum Name { A, B = 5, C }`
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name:    String,
    /// Member names with their explicit values, if written.
    pub members: Vec<(String, Option<i64>)>,
    pub line:    usize,
}

/// `catch (name[: Type]) { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub name: String,
    /// `None` catches every thrown value.
    pub ty:   Option<TypeValue>,
    pub body: Vec<Statement>,
    pub line: usize,
}

/// `case value: statements`
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub value: Expr,
    pub body:  Vec<Statement>,
    pub line:  usize,
}

/// Represents a statement in the language.
///
/// Statements are executed for their effect. Declarations only describe
/// what to register; registration happens when they are executed.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `let` / `const` declaration.
    VariableDeclaration(Rc<VariableDecl>),
    /// Function definition.
    Function(Rc<FunctionDecl>),
    /// Class definition.
    Class(Rc<ClassDecl>),
    /// Interface definition.
    Interface(Rc<InterfaceDecl>),
    /// Enum definition.
    Enum(Rc<EnumDecl>),
    /// `{ statements }`
    Block {
        /// The statements of the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// `if (condition) then_branch [else else_branch]`
    If {
        /// Must evaluate to `bool`.
        condition:   Expr,
        /// Runs when the condition holds.
        then_branch: Box<Self>,
        /// Runs otherwise.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) body`
    While {
        /// Must evaluate to `bool`.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `do body while (condition);`
    DoWhile {
        /// The loop body.
        body:      Box<Self>,
        /// Must evaluate to `bool`.
        condition: Expr,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (init : condition : step) body`
    For {
        /// Runs once, in the loop's own scope.
        init:      Option<Box<Self>>,
        /// Checked before every iteration; absent means `true`.
        condition: Option<Expr>,
        /// Runs after every iteration, including after `continue`.
        step:      Option<Expr>,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `switch (discriminant) { case ...: ... default: ... }`
    Switch {
        /// The value matched against each case.
        discriminant: Expr,
        /// The cases, in order.
        cases:        Vec<SwitchCase>,
        /// Runs when no case matches.
        default:      Option<Vec<Self>>,
        /// Line number in the source code.
        line:         usize,
    },
    /// `break;`
    Break {
        /// Line number in the source code.
        line: usize,
    },
    /// `continue;`
    Continue {
        /// Line number in the source code.
        line: usize,
    },
    /// `return [value];`
    Return {
        /// The returned value, if any.
        value: Option<Expr>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `throw value;`
    Throw {
        /// The thrown value.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `try { } catch (e: T) { } finally { }`
    Try {
        /// The guarded statements.
        body:    Vec<Self>,
        /// Handlers, tried in order.
        catches: Vec<CatchClause>,
        /// Runs on every path out of the statement.
        finally: Option<Vec<Self>>,
        /// Line number in the source code.
        line:    usize,
    },
    /// `include "path";` or `use "path";`
    Include {
        /// The module path as written.
        path: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Statement {
    /// The source line of the statement.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::VariableDeclaration(decl) => decl.line,
            Self::Function(decl) => decl.line,
            Self::Class(decl) => decl.line,
            Self::Interface(decl) => decl.line,
            Self::Enum(decl) => decl.line,
            Self::Expression { line, .. }
            | Self::Block { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::DoWhile { line, .. }
            | Self::For { line, .. }
            | Self::Switch { line, .. }
            | Self::Break { line }
            | Self::Continue { line }
            | Self::Return { line, .. }
            | Self::Throw { line, .. }
            | Self::Try { line, .. }
            | Self::Include { line, .. } => *line,
        }
    }
}

/// Binary operators in order of increasing precedence group: logical,
/// equality, comparison, shift, additive, multiplicative.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `>>>`
    UnsignedShiftRight,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::UnsignedShiftRight => ">>>",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        };
        write!(f, "{symbol}")
    }
}

/// Unary operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Negate,
    /// `!x`
    Not,
}
