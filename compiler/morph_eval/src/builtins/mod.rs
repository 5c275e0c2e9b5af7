//! The standard library registered in `std`.
//!
//! Each builtin is a plain function over its already-checked arguments.
//! Implementations return `Result` internally and [`lift`] folds errors
//! back into `Object::Error` for the registry.

mod collections;
mod control;
mod numeric;
mod strings;
mod time;

use crate::errors;
use crate::object::ObjectMap;
use crate::registry::FunctionRegistry;
use crate::{Object, RuntimeError};

type BuiltinResult = Result<Object, RuntimeError>;

/// Register every builtin in the default namespace.
pub fn register_builtins(registry: &mut FunctionRegistry) {
    collections::register(registry);
    control::register(registry);
    numeric::register(registry);
    strings::register(registry);
    time::register(registry);
}

/// Adapt a fallible builtin to the registry's calling convention.
fn lift(f: fn(&[Object]) -> BuiltinResult) -> impl Fn(&[Object]) -> Object + Send + Sync {
    move |args| f(args).unwrap_or_else(Object::from)
}

/// Arity error for a slice pattern that did not match. The registry checks
/// arity first, so this only fires when a builtin is called directly.
#[cold]
fn arity(name: &str, expected: usize, args: &[Object]) -> RuntimeError {
    if args.len() < expected {
        errors::too_few_arguments(name, expected, args.len())
    } else {
        errors::too_many_arguments(name, expected, args.len())
    }
}

/// Build a small map object from literal keys.
fn object_map<const N: usize>(entries: [(&str, Object); N]) -> Object {
    Object::map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<ObjectMap>(),
    )
}

/// Length as an integer object.
fn count(n: usize) -> Object {
    Object::Integer(i64::try_from(n).unwrap_or(i64::MAX))
}
