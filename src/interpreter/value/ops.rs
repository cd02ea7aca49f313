use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

fn invalid(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::InvalidOperation { op: op.to_string(),
                                     left: left.type_name(),
                                     right: right.type_name(),
                                     line }
}

impl Value {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// `&&` and `||` are accepted here as plain (non short-circuiting)
    /// operations; the evaluator short-circuits before calling this.
    ///
    /// # Errors
    /// `InvalidOperation` when the operands are of different variants or the
    /// variant does not support `op`; `DivisionByZero` and `Overflow` from
    /// arithmetic.
    ///
    /// # Example
    /// ```
    /// use tessera::{ast::BinaryOperator, error::RuntimeError, interpreter::value::core::Value};
    ///
    /// let sum = Value::Int(2).apply_binary(BinaryOperator::Add, &Value::Int(3), 1).unwrap();
    /// assert_eq!(sum, Value::Int(5));
    ///
    /// let err = Value::Int(2).apply_binary(BinaryOperator::Add, &Value::Bool(true), 1)
    ///                        .unwrap_err();
    /// assert!(matches!(err, RuntimeError::InvalidOperation { .. }));
    /// ```
    pub fn apply_binary(&self, op: BinaryOperator, other: &Self, line: usize) -> EvalResult<Self> {
        match op {
            BinaryOperator::Add => self.add(other, line),
            BinaryOperator::Subtract => self.subtract(other, line),
            BinaryOperator::Multiply => self.multiply(other, line),
            BinaryOperator::Divide => self.divide(other, line),
            BinaryOperator::Modulo => self.modulo(other, line),
            BinaryOperator::Greater => self.greater(other, line),
            BinaryOperator::GreaterEqual => self.greater_equal(other, line),
            BinaryOperator::Less => self.less(other, line),
            BinaryOperator::LessEqual => self.less_equal(other, line),
            BinaryOperator::Equal => self.equals(other, line),
            BinaryOperator::NotEqual => self.not_equals(other, line),
            BinaryOperator::And => self.and(other, line),
            BinaryOperator::Or => self.or(other, line),
            BinaryOperator::ShiftLeft
            | BinaryOperator::ShiftRight
            | BinaryOperator::UnsignedShiftRight => self.shift(op, other, line),
        }
    }

    /// Applies a unary operator.
    ///
    /// # Errors
    /// Whatever the underlying multiplication or inequality raises.
    pub fn apply_unary(&self, op: UnaryOperator, line: usize) -> EvalResult<Self> {
        match op {
            UnaryOperator::Negate => self.negate(line),
            UnaryOperator::Not => self.not(line),
        }
    }

    /// `self + other`. Numbers add, strings concatenate.
    pub fn add(&self, other: &Self, line: usize) -> EvalResult<Self> {
        use Value::{Decimal, Double, Float, Int, String};

        match (self, other) {
            (Int(a), Int(b)) => a.checked_add(*b).map(Int).ok_or(RuntimeError::Overflow { line }),
            (Float(a), Float(b)) => Ok(Float(a + b)),
            (Double(a), Double(b)) => Ok(Double(a + b)),
            (Decimal(a), Decimal(b)) => {
                a.checked_add(*b).map(Decimal).ok_or(RuntimeError::Overflow { line })
            },
            (String(a), String(b)) => Ok(String(format!("{a}{b}"))),
            _ => Err(invalid(BinaryOperator::Add, self, other, line)),
        }
    }

    /// `self - other`.
    pub fn subtract(&self, other: &Self, line: usize) -> EvalResult<Self> {
        use Value::{Decimal, Double, Float, Int};

        match (self, other) {
            (Int(a), Int(b)) => a.checked_sub(*b).map(Int).ok_or(RuntimeError::Overflow { line }),
            (Float(a), Float(b)) => Ok(Float(a - b)),
            (Double(a), Double(b)) => Ok(Double(a - b)),
            (Decimal(a), Decimal(b)) => {
                a.checked_sub(*b).map(Decimal).ok_or(RuntimeError::Overflow { line })
            },
            _ => Err(invalid(BinaryOperator::Subtract, self, other, line)),
        }
    }

    /// `self * other`.
    pub fn multiply(&self, other: &Self, line: usize) -> EvalResult<Self> {
        use Value::{Decimal, Double, Float, Int};

        match (self, other) {
            (Int(a), Int(b)) => a.checked_mul(*b).map(Int).ok_or(RuntimeError::Overflow { line }),
            (Float(a), Float(b)) => Ok(Float(a * b)),
            (Double(a), Double(b)) => Ok(Double(a * b)),
            (Decimal(a), Decimal(b)) => {
                a.checked_mul(*b).map(Decimal).ok_or(RuntimeError::Overflow { line })
            },
            _ => Err(invalid(BinaryOperator::Multiply, self, other, line)),
        }
    }

    /// `self / other`. Integer division truncates toward zero.
    pub fn divide(&self, other: &Self, line: usize) -> EvalResult<Self> {
        use Value::{Decimal, Double, Float, Int};

        if self.same_variant(other) && other.is_zero() {
            return Err(RuntimeError::DivisionByZero { line });
        }
        match (self, other) {
            (Int(a), Int(b)) => a.checked_div(*b).map(Int).ok_or(RuntimeError::Overflow { line }),
            (Float(a), Float(b)) => Ok(Float(a / b)),
            (Double(a), Double(b)) => Ok(Double(a / b)),
            (Decimal(a), Decimal(b)) => {
                a.checked_div(*b).map(Decimal).ok_or(RuntimeError::Overflow { line })
            },
            _ => Err(invalid(BinaryOperator::Divide, self, other, line)),
        }
    }

    /// `self % other`. The result takes the sign of the dividend.
    pub fn modulo(&self, other: &Self, line: usize) -> EvalResult<Self> {
        use Value::{Decimal, Double, Float, Int};

        if self.same_variant(other) && other.is_zero() {
            return Err(RuntimeError::DivisionByZero { line });
        }
        match (self, other) {
            (Int(a), Int(b)) => a.checked_rem(*b).map(Int).ok_or(RuntimeError::Overflow { line }),
            (Float(a), Float(b)) => Ok(Float(a % b)),
            (Double(a), Double(b)) => Ok(Double(a % b)),
            (Decimal(a), Decimal(b)) => {
                a.checked_rem(*b).map(Decimal).ok_or(RuntimeError::Overflow { line })
            },
            _ => Err(invalid(BinaryOperator::Modulo, self, other, line)),
        }
    }

    /// `self > other`.
    pub fn greater(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let ordering = self.compare(BinaryOperator::Greater, other, line)?;
        Ok(Self::Bool(ordering == Some(Ordering::Greater)))
    }

    /// `self >= other`.
    pub fn greater_equal(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let ordering = self.compare(BinaryOperator::GreaterEqual, other, line)?;
        Ok(Self::Bool(matches!(ordering, Some(Ordering::Greater | Ordering::Equal))))
    }

    /// `self < other`.
    pub fn less(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let ordering = self.compare(BinaryOperator::Less, other, line)?;
        Ok(Self::Bool(ordering == Some(Ordering::Less)))
    }

    /// `self <= other`.
    pub fn less_equal(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let ordering = self.compare(BinaryOperator::LessEqual, other, line)?;
        Ok(Self::Bool(matches!(ordering, Some(Ordering::Less | Ordering::Equal))))
    }

    /// `self == other`. Arrays and objects compare by reference.
    pub fn equals(&self, other: &Self, line: usize) -> EvalResult<Self> {
        if !self.same_variant(other) {
            return Err(invalid(BinaryOperator::Equal, self, other, line));
        }
        Ok(Self::Bool(self == other))
    }

    /// `self != other`.
    pub fn not_equals(&self, other: &Self, line: usize) -> EvalResult<Self> {
        if !self.same_variant(other) {
            return Err(invalid(BinaryOperator::NotEqual, self, other, line));
        }
        Ok(Self::Bool(self != other))
    }

    /// `self && other`, on two `bool` values.
    pub fn and(&self, other: &Self, line: usize) -> EvalResult<Self> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Ok(Self::Bool(*a && *b)),
            _ => Err(invalid(BinaryOperator::And, self, other, line)),
        }
    }

    /// `self || other`, on two `bool` values.
    pub fn or(&self, other: &Self, line: usize) -> EvalResult<Self> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Ok(Self::Bool(*a || *b)),
            _ => Err(invalid(BinaryOperator::Or, self, other, line)),
        }
    }

    /// Unary minus: multiplication by `-1` of the operand's own variant.
    pub fn negate(&self, line: usize) -> EvalResult<Self> {
        let minus_one = match self {
            Self::Float(_) => Self::Float(-1.0),
            Self::Double(_) => Self::Double(-1.0),
            Self::Decimal(_) => Self::Decimal(Decimal::NEGATIVE_ONE),
            _ => Self::Int(-1),
        };
        self.multiply(&minus_one, line)
    }

    /// Logical not: inequality with `true`.
    pub fn not(&self, line: usize) -> EvalResult<Self> {
        self.not_equals(&Self::Bool(true), line)
    }

    /// Integer shifts. The shift count is masked to `0..=63`; `>>` keeps the
    /// sign, `>>>` fills with zeros.
    #[allow(clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_possible_wrap)]
    fn shift(&self, op: BinaryOperator, other: &Self, line: usize) -> EvalResult<Self> {
        let (Self::Int(value), Self::Int(count)) = (self, other) else {
            return Err(invalid(op, self, other, line));
        };
        let count = (count & 63) as u32;
        let shifted = match op {
            BinaryOperator::ShiftLeft => value.wrapping_shl(count),
            BinaryOperator::ShiftRight => value.wrapping_shr(count),
            _ => ((*value as u64) >> count) as i64,
        };
        Ok(Self::Int(shifted))
    }

    /// Orders two values of the same numeric or `char` variant. `None`
    /// means unordered (a NaN operand).
    fn compare(&self,
               op: BinaryOperator,
               other: &Self,
               line: usize)
               -> EvalResult<Option<Ordering>> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Ok(Some(a.cmp(b))),
            (Self::Float(a), Self::Float(b)) => Ok(a.partial_cmp(b)),
            (Self::Double(a), Self::Double(b)) => Ok(a.partial_cmp(b)),
            (Self::Decimal(a), Self::Decimal(b)) => Ok(Some(a.cmp(b))),
            (Self::Char(a), Self::Char(b)) => Ok(Some(a.cmp(b))),
            _ => Err(invalid(op, self, other, line)),
        }
    }

    fn same_variant(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    fn is_zero(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Float(n) => *n == 0.0,
            Self::Double(n) => *n == 0.0,
            Self::Decimal(n) => n.is_zero(),
            _ => false,
        }
    }
}
