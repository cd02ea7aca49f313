use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use tessera::{
    ast::{BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::value::{core::Value, types::TypeValue},
};

#[test]
fn integer_arithmetic() {
    assert_eq!(Value::Int(7).divide(&Value::Int(2), 1).unwrap(), Value::Int(3));
    assert_eq!(Value::Int(-7).divide(&Value::Int(2), 1).unwrap(), Value::Int(-3));
    assert_eq!(Value::Int(-7).modulo(&Value::Int(3), 1).unwrap(), Value::Int(-1));
    assert_eq!(Value::Int(5).apply_unary(UnaryOperator::Negate, 1).unwrap(), Value::Int(-5));

    assert!(matches!(Value::Int(1).divide(&Value::Int(0), 4),
                     Err(RuntimeError::DivisionByZero { line: 4 })));
    assert!(matches!(Value::Int(i64::MAX).add(&Value::Int(1), 2),
                     Err(RuntimeError::Overflow { line: 2 })));
    assert!(matches!(Value::Int(i64::MIN).divide(&Value::Int(-1), 3),
                     Err(RuntimeError::Overflow { .. })));
}

#[test]
fn fractional_arithmetic() {
    let sum = Value::Decimal(Decimal::new(1, 1)).add(&Value::Decimal(Decimal::new(2, 1)), 1)
                                                .unwrap();
    assert_eq!(sum, Value::Decimal(Decimal::new(3, 1)));
    assert_eq!(Value::Double(1.5).multiply(&Value::Double(2.0), 1).unwrap(), Value::Double(3.0));
    assert_eq!(Value::Float(1.0).subtract(&Value::Float(0.5), 1).unwrap(), Value::Float(0.5));
    assert!(matches!(Value::Double(1.0).divide(&Value::Double(0.0), 1),
                     Err(RuntimeError::DivisionByZero { .. })));
}

fn numeric_samples() -> [(Value, Value, Value); 4] {
    [(Value::Int(6), Value::Int(4), Value::Int(0)),
     (Value::Float(1.5), Value::Float(0.25), Value::Float(0.0)),
     (Value::Double(2.5), Value::Double(-4.0), Value::Double(0.0)),
     (Value::Decimal(Decimal::new(125, 2)), Value::Decimal(Decimal::new(3, 1)), Value::Decimal(Decimal::ZERO))]
}

#[test]
fn every_numeric_variant_rejects_zero_divisors() {
    for (value, _, zero) in numeric_samples() {
        assert!(matches!(value.divide(&zero, 5), Err(RuntimeError::DivisionByZero { line: 5 })),
                "{} / 0",
                value.type_name());
        assert!(matches!(value.modulo(&zero, 6), Err(RuntimeError::DivisionByZero { line: 6 })),
                "{} % 0",
                value.type_name());
        assert!(matches!(zero.divide(&zero, 7), Err(RuntimeError::DivisionByZero { .. })));
    }
}

#[test]
fn addition_and_multiplication_commute() {
    for (a, b, _) in numeric_samples() {
        assert_eq!(a.add(&b, 1).unwrap(), b.add(&a, 1).unwrap());
        assert_eq!(a.multiply(&b, 1).unwrap(), b.multiply(&a, 1).unwrap());
    }
}

#[test]
fn operators_name_both_operand_types() {
    let operators = [BinaryOperator::Add,
                     BinaryOperator::Subtract,
                     BinaryOperator::Multiply,
                     BinaryOperator::Divide,
                     BinaryOperator::Modulo,
                     BinaryOperator::Greater,
                     BinaryOperator::GreaterEqual,
                     BinaryOperator::Less,
                     BinaryOperator::LessEqual,
                     BinaryOperator::Equal,
                     BinaryOperator::NotEqual,
                     BinaryOperator::And,
                     BinaryOperator::Or,
                     BinaryOperator::ShiftLeft,
                     BinaryOperator::ShiftRight,
                     BinaryOperator::UnsignedShiftRight];

    for op in operators {
        let err = Value::Int(1).apply_binary(op, &Value::from("one"), 3).unwrap_err();
        assert_eq!(err.to_string(),
                   format!("Error on line 3: Type error: operator '{op}' cannot be applied to int and string."));
    }

    let decimal = Value::Decimal(Decimal::ONE);
    let err = Value::Float(1.0).divide(&decimal, 2).unwrap_err();
    assert!(matches!(err, RuntimeError::InvalidOperation { ref left, ref right, .. }
                         if left == "float" && right == "decimal"));
}

#[test]
fn mixed_variants_are_rejected() {
    let err = Value::Int(1).add(&Value::Double(1.0), 9).unwrap_err();
    assert_eq!(err.to_string(),
               "Error on line 9: Type error: operator '+' cannot be applied to int and double.");
    assert!(Value::Int(1).equals(&Value::Void, 1).is_err());
    assert!(Value::Bool(true).add(&Value::Bool(true), 1).is_err());
}

#[test]
fn comparisons_and_logic() {
    assert_eq!(Value::Char('a').less(&Value::Char('b'), 1).unwrap(), Value::Bool(true));
    assert_eq!(Value::Double(f64::NAN).less_equal(&Value::Double(1.0), 1).unwrap(),
               Value::Bool(false));
    assert_eq!(Value::from("x").equals(&Value::from("x"), 1).unwrap(), Value::Bool(true));
    assert_eq!(Value::Bool(false).apply_unary(UnaryOperator::Not, 1).unwrap(), Value::Bool(true));
    assert_eq!(Value::Bool(true).apply_binary(BinaryOperator::Or, &Value::Bool(false), 1)
                                .unwrap(),
               Value::Bool(true));
}

#[test]
fn shifts() {
    let shift = |value: i64, op: BinaryOperator, count: i64| {
        Value::Int(value).apply_binary(op, &Value::Int(count), 1).unwrap()
    };
    assert_eq!(shift(1, BinaryOperator::ShiftLeft, 4), Value::Int(16));
    assert_eq!(shift(-16, BinaryOperator::ShiftRight, 2), Value::Int(-4));
    assert_eq!(shift(-1, BinaryOperator::UnsignedShiftRight, 60), Value::Int(15));
    assert_eq!(shift(1, BinaryOperator::ShiftLeft, 64), Value::Int(1));
}

#[test]
fn arrays_compare_by_identity() {
    let a = Value::new_array(TypeValue::Int, vec![Value::Int(1)]);
    let b = Value::new_array(TypeValue::Int, vec![Value::Int(1)]);
    assert_eq!(a.equals(&a.clone(), 1).unwrap(), Value::Bool(true));
    assert_eq!(a.equals(&b, 1).unwrap(), Value::Bool(false));
}

#[test]
fn indexing() {
    let array = Value::new_array(TypeValue::Int, vec![Value::Int(1), Value::Int(2)]);
    array.set_index(1, Value::Int(5), 1).unwrap();
    assert_eq!(array.index(1, 1).unwrap(), Value::Int(5));
    assert_eq!(array.to_string(), "[1, 5]");
    assert_eq!(array.length(1).unwrap(), Value::Int(2));

    assert!(matches!(array.index(-1, 1), Err(RuntimeError::IndexOutOfBounds { .. })));
    assert!(matches!(array.set_index(2, Value::Int(0), 1),
                     Err(RuntimeError::IndexOutOfBounds { .. })));
    assert!(matches!(array.set_index(0, Value::Bool(true), 1),
                     Err(RuntimeError::TypeMismatch { .. })));

    let text = Value::from("héllo");
    assert_eq!(text.index(1, 1).unwrap(), Value::Char('é'));
    assert_eq!(text.length(1).unwrap(), Value::Int(5));
    assert!(matches!(Value::Int(3).index(0, 1), Err(RuntimeError::NotIndexable { .. })));
}

#[test]
fn nested_arrays_check_element_types() {
    let inner = Value::new_array(TypeValue::Int, vec![Value::Int(1)]);
    let outer = Value::new_array(TypeValue::Int.array_of(), vec![Value::Void]);
    outer.set_index(0, inner.clone(), 1).unwrap();
    assert_eq!(outer.index(0, 1).unwrap(), inner);
    assert_eq!(outer.type_name(), "int[][]");
}

#[test]
fn declared_types_accept_matching_values() {
    assert!(TypeValue::Int.accepts(&Value::Int(1)));
    assert!(!TypeValue::Int.accepts(&Value::Double(1.0)));
    assert!(!TypeValue::Int.accepts(&Value::Void));
    assert!(TypeValue::Class("Node".into()).accepts(&Value::Void));
    assert!(TypeValue::Void.accepts(&Value::Void));

    let ints = Value::new_array(TypeValue::Int, Vec::new());
    assert!(TypeValue::Int.array_of().accepts(&ints));
    assert!(!TypeValue::String.array_of().accepts(&ints));

    assert_eq!(TypeValue::from_name("bool"), TypeValue::Bool);
    assert_eq!(TypeValue::from_name("string").array_of().to_string(), "string[]");
}
