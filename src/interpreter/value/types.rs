use std::fmt;

use crate::interpreter::value::core::Value;

/// The declared type of a variable, field, parameter or return value.
///
/// Types are nominal: a slot of type `T` only accepts values whose variant
/// is exactly `T`. Class types additionally accept instances of subclasses
/// and of classes implementing the named interface; class and array slots
/// may also hold `void`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeValue {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `decimal`
    Decimal,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `char`
    Char,
    /// `void`
    Void,
    /// `T[]`
    Array(Box<Self>),
    /// A class, interface or enum name.
    Class(String),
}

impl TypeValue {
    /// Resolves a written type name. Unknown names are class names; they are
    /// checked against the class table when used.
    ///
    /// # Example
    /// ```
    /// use tessera::interpreter::value::types::TypeValue;
    ///
    /// assert_eq!(TypeValue::from_name("boolean"), TypeValue::Bool);
    /// assert_eq!(TypeValue::from_name("Shape"), TypeValue::Class("Shape".to_string()));
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "int" => Self::Int,
            "float" => Self::Float,
            "double" => Self::Double,
            "decimal" => Self::Decimal,
            "bool" | "boolean" => Self::Bool,
            "string" => Self::String,
            "char" => Self::Char,
            "void" => Self::Void,
            other => Self::Class(other.to_string()),
        }
    }

    /// Wraps the type into an array of itself.
    #[must_use]
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// The element type, if this is an array type.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// Checks whether `value` may be stored in a slot of this type.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Double, Value::Double(_))
            | (Self::Decimal, Value::Decimal(_))
            | (Self::Bool, Value::Bool(_))
            | (Self::String, Value::String(_))
            | (Self::Char, Value::Char(_))
            | (Self::Void | Self::Array(_) | Self::Class(_), Value::Void) => true,
            (Self::Array(element), Value::Array(array)) => array.borrow().element_type == **element,
            (Self::Class(name), Value::Object(object)) => object.borrow().class.is_a(name),
            _ => false,
        }
    }
}

impl fmt::Display for TypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Decimal => write!(f, "decimal"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Char => write!(f, "char"),
            Self::Void => write!(f, "void"),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Class(name) => write!(f, "{name}"),
        }
    }
}
