//! Error constructors for the evaluator and builtins.
//!
//! Every runtime message is built here so wording stays consistent.
//! Builtins convert these into `Object::Error` with `.into()`.

use morph_ir::BinaryOp;

use crate::object::ObjectType;
use crate::RuntimeError;

// Function dispatch

#[cold]
pub fn undefined_function(namespace: &str, name: &str) -> RuntimeError {
    if namespace == crate::registry::DEFAULT_NAMESPACE {
        RuntimeError::new(format!("undefined function `{name}`"))
    } else {
        RuntimeError::new(format!("undefined function `{namespace}.{name}`"))
    }
}

#[cold]
pub fn too_few_arguments(name: &str, expected: usize, got: usize) -> RuntimeError {
    RuntimeError::new(format!(
        "too few arguments to `{name}`: expected {expected}, got {got}"
    ))
}

#[cold]
pub fn too_many_arguments(name: &str, expected: usize, got: usize) -> RuntimeError {
    RuntimeError::new(format!(
        "too many arguments to `{name}`: expected {expected}, got {got}"
    ))
}

#[cold]
pub fn invalid_argument_type(name: &str, arg: &str, found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!(
        "invalid argument type for `{name}`: `{arg}` cannot be {found}"
    ))
}

#[cold]
pub fn invalid_return_type(name: &str, found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("invalid return type from `{name}`: {found}"))
}

// Operators

#[cold]
pub fn binary_type_mismatch(op: BinaryOp, left: ObjectType, right: ObjectType) -> RuntimeError {
    RuntimeError::new(format!(
        "unsupported operand types for `{}`: {left} and {right}",
        op.as_symbol()
    ))
}

#[cold]
pub fn unary_type_mismatch(symbol: &str, operand: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("unsupported operand type for `{symbol}`: {operand}"))
}

#[cold]
pub fn integer_overflow(op: BinaryOp) -> RuntimeError {
    RuntimeError::new(format!("integer overflow in `{}`", op.as_symbol()))
}

#[cold]
pub fn negation_overflow() -> RuntimeError {
    RuntimeError::new("integer overflow in `-`")
}

#[cold]
pub fn float_overflow(op: BinaryOp) -> RuntimeError {
    RuntimeError::new(format!("float result of `{}` is not finite", op.as_symbol()))
}

#[cold]
pub fn division_by_zero() -> RuntimeError {
    RuntimeError::new("division by zero")
}

#[cold]
pub fn modulo_by_zero() -> RuntimeError {
    RuntimeError::new("modulo by zero")
}

// Paths

#[cold]
pub fn cannot_access_field(field: &str, found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("cannot access field `{field}` on {found}"))
}

#[cold]
pub fn cannot_index(found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("cannot index into {found}"))
}

#[cold]
pub fn invalid_index_type(found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("index must be an integer or string, found {found}"))
}

#[cold]
pub fn negative_index(index: i64) -> RuntimeError {
    RuntimeError::new(format!("negative array index {index}"))
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> RuntimeError {
    RuntimeError::new(format!(
        "array index {index} out of bounds for length {len}"
    ))
}

#[cold]
pub fn cannot_assign_field(field: &str, found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("cannot assign field `{field}` on {found}"))
}

#[cold]
pub fn cannot_assign_index(found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("cannot assign by index on {found}"))
}

#[cold]
pub fn invalid_assignment_target() -> RuntimeError {
    RuntimeError::new("invalid assignment target")
}

// Conversions

#[cold]
pub fn cannot_convert(value: &str, target: &str) -> RuntimeError {
    RuntimeError::new(format!("cannot convert {value} to {target}"))
}

#[cold]
pub fn cannot_parse(text: &str, target: &str) -> RuntimeError {
    RuntimeError::new(format!("cannot parse {text:?} as {target}"))
}

#[cold]
pub fn invalid_time_format(format: &str) -> RuntimeError {
    RuntimeError::new(format!("invalid time format {format:?}"))
}

#[cold]
pub fn time_out_of_range() -> RuntimeError {
    RuntimeError::new("time out of range")
}

// Higher-order builtins

#[cold]
pub fn map_key_not_string(found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("map key must be a string, found {found}"))
}

#[cold]
pub fn join_requires_strings(found: ObjectType) -> RuntimeError {
    RuntimeError::new(format!("join requires an array of strings, found {found}"))
}
