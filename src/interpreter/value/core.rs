use std::{cell::RefCell, fmt, rc::Rc};

use rust_decimal::Decimal;

use crate::{
    ast::LiteralValue,
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{class::ClassInstance, types::TypeValue},
    },
    util::num::{index_to_usize, usize_to_i64},
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// assignments, function returns, and conditional evaluations. A value's
/// variant never changes; assignment replaces the whole value.
///
/// Arrays and objects are shared by reference: cloning the `Value` clones
/// the handle, not the contents.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64 bit integer.
    Int(i64),
    /// A single precision floating-point number.
    Float(f32),
    /// A double precision floating-point number.
    Double(f64),
    /// A base 10 fixed-point number.
    Decimal(Decimal),
    /// A boolean value (`true` or `false`).
    /// Produced by comparison operators (`<`, `==`, `!=`, etc.) or logical
    /// operations (`!`). Used as conditions in `if`, loops and ternaries,
    /// where the condition must evaluate to `Bool`.
    Bool(bool),
    /// An owned string.
    String(String),
    /// A single character.
    Char(char),
    /// A homogeneous, mutable array.
    Array(Rc<RefCell<ArrayValue>>),
    /// An instance of a class.
    Object(Rc<RefCell<ClassInstance>>),
    /// The absence of a value.
    Void,
}

/// The payload of `Value::Array`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayValue {
    /// Every element must be accepted by this type.
    pub element_type: TypeValue,
    /// The elements, in order.
    pub items:        Vec<Value>,
}

impl ArrayValue {
    /// Reads the element at `index`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for a negative or too large index.
    pub fn get(&self, index: i64, line: usize) -> EvalResult<Value> {
        let position = index_to_usize(index, self.items.len(), line)?;
        Ok(self.items[position].clone())
    }
}

impl PartialEq for Value {
    /// Scalars compare by payload, arrays and objects by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            (Self::Void, Self::Void) => true,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Int(n) => Self::Int(*n),
            LiteralValue::Float(n) => Self::Float(*n),
            LiteralValue::Double(n) => Self::Double(*n),
            LiteralValue::Decimal(n) => Self::Decimal(*n),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::String(s) => Self::String(s.clone()),
            LiteralValue::Char(c) => Self::Char(*c),
        }
    }
}

impl Value {
    /// Builds a new array value.
    #[must_use]
    pub fn new_array(element_type: TypeValue, items: Vec<Self>) -> Self {
        Self::Array(Rc::new(RefCell::new(ArrayValue { element_type, items })))
    }

    /// The value an uninitialised slot of type `ty` starts with.
    ///
    /// # Example
    /// ```
    /// use tessera::interpreter::value::{core::Value, types::TypeValue};
    ///
    /// assert_eq!(Value::default_for(&TypeValue::Int), Value::Int(0));
    /// assert_eq!(Value::default_for(&TypeValue::String), Value::String(String::new()));
    /// assert_eq!(Value::default_for(&TypeValue::Class("Node".into())), Value::Void);
    /// ```
    #[must_use]
    pub fn default_for(ty: &TypeValue) -> Self {
        match ty {
            TypeValue::Int => Self::Int(0),
            TypeValue::Float => Self::Float(0.0),
            TypeValue::Double => Self::Double(0.0),
            TypeValue::Decimal => Self::Decimal(Decimal::ZERO),
            TypeValue::Bool => Self::Bool(false),
            TypeValue::String => Self::String(String::new()),
            TypeValue::Char => Self::Char('\0'),
            TypeValue::Void | TypeValue::Array(_) | TypeValue::Class(_) => Self::Void,
        }
    }

    /// The runtime type of the value.
    #[must_use]
    pub fn type_of(&self) -> TypeValue {
        match self {
            Self::Int(_) => TypeValue::Int,
            Self::Float(_) => TypeValue::Float,
            Self::Double(_) => TypeValue::Double,
            Self::Decimal(_) => TypeValue::Decimal,
            Self::Bool(_) => TypeValue::Bool,
            Self::String(_) => TypeValue::String,
            Self::Char(_) => TypeValue::Char,
            Self::Array(array) => array.borrow().element_type.clone().array_of(),
            Self::Object(object) => TypeValue::Class(object.borrow().class.name.clone()),
            Self::Void => TypeValue::Void,
        }
    }

    /// The runtime type name, as used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.type_of().to_string()
    }

    /// Converts the value to `bool`, or returns an error if not boolean.
    ///
    /// Used for conditions in `if`, loops, ternaries and logical operators.
    ///
    /// # Errors
    /// `ExpectedBoolean` naming the actual type.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::ExpectedBoolean { found: other.type_name(),
                                                         line }),
        }
    }

    /// Converts the value to `i64`, or returns an error if not an integer.
    ///
    /// # Errors
    /// `TypeMismatch` if the value is not an `int`.
    pub fn as_int(&self, line: usize) -> EvalResult<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            other => Err(RuntimeError::TypeMismatch { expected: TypeValue::Int.to_string(),
                                                      found: other.type_name(),
                                                      line }),
        }
    }

    /// The number of elements of an array or characters of a string.
    ///
    /// # Errors
    /// `InvalidMemberTarget` for any other variant.
    pub fn length(&self, line: usize) -> EvalResult<Self> {
        let len = match self {
            Self::Array(array) => array.borrow().items.len(),
            Self::String(s) => s.chars().count(),
            other => {
                return Err(RuntimeError::InvalidMemberTarget { found: other.type_name(),
                                                               member: "length".to_string(),
                                                               line });
            },
        };
        Ok(Self::Int(usize_to_i64(len, line)?))
    }

    /// Reads `self[index]`: an element of an array or a character of a
    /// string.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for a bad index, `NotIndexable` for other
    /// variants.
    pub fn index(&self, index: i64, line: usize) -> EvalResult<Self> {
        match self {
            Self::Array(array) => array.borrow().get(index, line),
            Self::String(s) => {
                let len = s.chars().count();
                let position = index_to_usize(index, len, line)?;
                s.chars()
                 .nth(position)
                 .map(Self::Char)
                 .ok_or(RuntimeError::IndexOutOfBounds { index, len, line })
            },
            other => Err(RuntimeError::NotIndexable { found: other.type_name(),
                                                      line }),
        }
    }

    /// Writes `self[index] = value` on an array.
    ///
    /// The element type is checked before the array is borrowed mutably,
    /// since `value` may share its storage.
    ///
    /// # Errors
    /// `IndexOutOfBounds` for a bad index, `TypeMismatch` if the element
    /// type does not accept `value`, `NotIndexable` for other variants.
    pub fn set_index(&self, index: i64, value: Self, line: usize) -> EvalResult<()> {
        let Self::Array(array) = self else {
            return Err(RuntimeError::NotIndexable { found: self.type_name(),
                                                    line });
        };
        let element_type = array.borrow().element_type.clone();
        if !element_type.accepts(&value) {
            return Err(RuntimeError::TypeMismatch { expected: element_type.to_string(),
                                                    found: value.type_name(),
                                                    line });
        }

        let mut array = array.borrow_mut();
        let position = index_to_usize(index, array.items.len(), line)?;
        array.items[position] = value;
        Ok(())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Double(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Array(array) => {
                write!(f, "[")?;
                for (i, item) in array.borrow().items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            },
            Self::Object(object) => write!(f, "<{}>", object.borrow().class.name),
            Self::Void => write!(f, "void"),
        }
    }
}
