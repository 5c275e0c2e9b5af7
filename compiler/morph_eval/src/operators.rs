//! Binary and unary operator semantics.
//!
//! Dispatch matches on the operand pair. The object universe is closed, so
//! every supported combination is listed and everything else falls through
//! to a type mismatch.

use std::cmp::Ordering;

use morph_ir::{BinaryOp, UnaryOp};

use crate::errors::{
    binary_type_mismatch, division_by_zero, float_overflow, integer_overflow, modulo_by_zero,
    negation_overflow, unary_type_mismatch,
};
use crate::{Object, RuntimeError};

type OpResult = Result<Object, RuntimeError>;

/// Evaluate `left op right` on already-evaluated operands.
///
/// `&&` and `||` are handled here on values; the interpreter short-circuits
/// them before the right operand is evaluated.
pub fn evaluate_binary(op: BinaryOp, left: &Object, right: &Object) -> OpResult {
    match op {
        BinaryOp::Eq => return Ok(Object::Boolean(left == right)),
        BinaryOp::NotEq => return Ok(Object::Boolean(left != right)),
        BinaryOp::And => return Ok(Object::Boolean(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => return Ok(Object::Boolean(left.is_truthy() || right.is_truthy())),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            return compare(op, left, right);
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {}
    }

    match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => eval_int_binary(op, *a, *b),
        (Object::String(a), Object::String(b)) if op == BinaryOp::Add => {
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(b);
            Ok(Object::string(joined))
        }
        _ => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => eval_float_binary(op, a, b),
            _ => Err(binary_type_mismatch(op, left.type_of(), right.type_of())),
        },
    }
}

/// Integer arithmetic. Overflow is an error; division stays integral only
/// when it is exact.
#[allow(
    clippy::cast_precision_loss,
    reason = "inexact division promotes to float"
)]
fn eval_int_binary(op: BinaryOp, a: i64, b: i64) -> OpResult {
    let checked = |result: Option<i64>| result.map(Object::Integer).ok_or_else(|| integer_overflow(op));
    match op {
        BinaryOp::Add => checked(a.checked_add(b)),
        BinaryOp::Sub => checked(a.checked_sub(b)),
        BinaryOp::Mul => checked(a.checked_mul(b)),
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            match a.checked_rem(b) {
                Some(0) => checked(a.checked_div(b)),
                Some(_) => Ok(Object::Float(a as f64 / b as f64)),
                None => Err(integer_overflow(op)),
            }
        }
        BinaryOp::Mod => {
            if b == 0 {
                return Err(modulo_by_zero());
            }
            checked(a.checked_rem(b))
        }
        _ => Err(binary_type_mismatch(
            op,
            crate::ObjectType::Integer,
            crate::ObjectType::Integer,
        )),
    }
}

fn eval_float_binary(op: BinaryOp, a: f64, b: f64) -> OpResult {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(division_by_zero());
            }
            a / b
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(modulo_by_zero());
            }
            a % b
        }
        _ => {
            return Err(binary_type_mismatch(
                op,
                crate::ObjectType::Float,
                crate::ObjectType::Float,
            ))
        }
    };
    if result.is_finite() {
        Ok(Object::Float(result))
    } else {
        Err(float_overflow(op))
    }
}

/// Ordering for numbers, strings and times.
fn compare(op: BinaryOp, left: &Object, right: &Object) -> OpResult {
    let ordering = match (left, right) {
        (Object::Integer(a), Object::Integer(b)) => Some(a.cmp(b)),
        (Object::String(a), Object::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Object::Time(a), Object::Time(b)) => Some(a.cmp(b)),
        _ => match (left.as_float(), right.as_float()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(binary_type_mismatch(op, left.type_of(), right.type_of())),
        },
    };
    // NaN cannot reach here from JSON or arithmetic, but compares false.
    let Some(ordering) = ordering else {
        return Ok(Object::Boolean(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(binary_type_mismatch(op, left.type_of(), right.type_of())),
    };
    Ok(Object::Boolean(result))
}

/// Evaluate a prefix operator.
pub fn evaluate_unary(op: UnaryOp, operand: &Object) -> OpResult {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Object::Boolean(!value.is_truthy())),
        (UnaryOp::Neg, Object::Integer(n)) => n
            .checked_neg()
            .map(Object::Integer)
            .ok_or_else(negation_overflow),
        (UnaryOp::Neg, Object::Float(f)) => Ok(Object::Float(-f)),
        (UnaryOp::Neg, other) => Err(unary_type_mismatch(op.as_symbol(), other.type_of())),
    }
}
