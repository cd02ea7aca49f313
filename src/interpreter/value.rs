/// Runtime values.
///
/// Defines the closed `Value` sum type, the homogeneous `ArrayValue`
/// payload, type defaults and string conversion.
pub mod core;

/// Declared types.
///
/// `TypeValue` describes the type of a slot independently of any concrete
/// value, and decides which values a slot accepts.
pub mod types;

/// Operator contracts.
///
/// Every binary and unary operator is defined here, per value variant.
/// Operators only combine operands of the same variant; anything else is a
/// type error naming both operand types.
pub mod ops;

/// Class metadata and instances.
///
/// Holds the registered shape of a class (fields, methods, constructor,
/// static storage) and the per-object field map created by `new`. Also
/// declares the `NativeModule` plugin trait used to register classes built
/// in Rust.
pub mod class;
