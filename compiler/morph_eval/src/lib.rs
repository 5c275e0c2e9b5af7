//! Morph Eval - object model and tree-walking evaluator for morph.
//!
//! # Architecture
//!
//! - [`Object`]: the closed runtime value universe, with JSON lift/lower
//! - [`Environment`]: flat name bindings plus the function registry
//! - [`Interpreter`]: statement execution and expression evaluation over a
//!   shared AST; errors and terminate requests travel as [`Signal`]s
//! - [`FunctionRegistry`]: namespaced, signature-checked functions; the
//!   builtins live in `std`
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics
//!
//! A parsed program and its registry are immutable and shared; every run
//! owns its environment, so runs may proceed concurrently.

mod arrow;
mod builtins;
mod environment;
pub mod errors;
pub mod interpreter;
mod object;
mod operators;
mod registry;
mod signal;

pub use arrow::{ArrowFrame, ArrowFunction, RETURN_NAME};
pub use builtins::register_builtins;
pub use environment::Environment;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use object::{
    cast_array, cast_auto, cast_bool, cast_error, cast_float, cast_int, cast_map, cast_string,
    cast_time, format_time_rfc3339, from_json, object_null, object_terminate,
    object_terminate_drop, to_json, EncodeError, Heap, Object, ObjectMap, ObjectType,
};
pub use operators::{evaluate_binary, evaluate_unary};
pub use registry::{
    ArgSpec, Example, FunctionAttrs, FunctionEntry, FunctionImpl, FunctionRegistry, Namespace,
    TypeSet, DEFAULT_NAMESPACE,
};
pub use signal::{EvalResult, RuntimeError, Signal};

/// Variable bound to the program input.
pub const INPUT_NAME: &str = "@in";

/// Variable read as the program output.
pub const OUTPUT_NAME: &str = "@out";
