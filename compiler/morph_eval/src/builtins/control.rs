//! Error recovery, null fallbacks and run termination.
//!
//! The interpreter evaluates `catch`, `coalesce` and `fallback` itself so it
//! can trap an error or stop at the first non-null argument before the rest
//! are evaluated. The entries here document them and serve hosts that call
//! through the registry directly, where arguments are already values.

use crate::object::{object_terminate, object_terminate_drop};
use crate::registry::{FunctionEntry, FunctionRegistry, TypeSet};
use crate::Object;

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_std(
        FunctionEntry::new("catch", catch)
            .describe("The first argument, or the second if evaluating the first failed.")
            .arg("value", TypeSet::ANY)
            .arg("fallback", TypeSet::ANY)
            .tagged(&["control"])
            .example(
                "null",
                "set x = 5; set @out = catch(x.bogus.path, x * 2)",
                "10",
            )
            .example("null", "set @out = catch(1 / 0, \"oops\")", r#""oops""#),
    );
    for name in ["coalesce", "fallback"] {
        registry.register_std(
            FunctionEntry::new(name, coalesce)
                .describe("The first argument that is not null, or null.")
                .arg("values", TypeSet::ANY)
                .variadic()
                .tagged(&["control"])
                .example(
                    r#"{"b": 2}"#,
                    format!("set @out = {name}(@in.a, @in.b, 3)"),
                    "2",
                )
                .example("null", format!("set @out = {name}(null, null)"), "null"),
        );
    }
    registry.register_std(
        FunctionEntry::new("drop", |_: &[Object]| object_terminate_drop())
            .describe("Stop the run and discard every variable; the output is null.")
            .tagged(&["control"])
            .example(r#"{"a": 1}"#, "set @out = @in; drop(); set y = 1", "null"),
    );
    registry.register_std(
        FunctionEntry::new("emit", |_: &[Object]| object_terminate())
            .describe("Stop the run and keep the variables set so far.")
            .tagged(&["control"])
            .example(r#"{"a": 1}"#, "set @out = @in.a; emit(); set @out = 2", "1"),
    );
}

fn catch(args: &[Object]) -> Object {
    match args {
        [Object::Error(_), fallback] => fallback.clone(),
        [value, _] => value.clone(),
        _ => super::arity("catch", 2, args).into(),
    }
}

fn coalesce(args: &[Object]) -> Object {
    args.iter()
        .find(|value| !value.is_null())
        .cloned()
        .unwrap_or(Object::Null)
}
