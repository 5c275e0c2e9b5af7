#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::{from_json, to_json, FunctionEntry, FunctionRegistry, RuntimeError, TypeSet, INPUT_NAME};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn compile(source: &str) -> SharedAst {
    let out = morph_parse::parse(source);
    assert!(!out.has_errors(), "parse errors: {:?}", out.errors);
    out.ast.into_shared()
}

/// Run and return the final environment.
fn run_env(source: &str, input: Value) -> Result<Environment, Signal> {
    let ast = compile(source);
    let mut interpreter = Interpreter::builder(&ast).input(from_json(&input)).build();
    interpreter.run()?;
    Ok(interpreter.into_env())
}

fn var(source: &str, input: Value, name: &str) -> Value {
    let env = run_env(source, input).expect("run failed");
    to_json(env.get(name).unwrap_or(&Object::Null)).unwrap()
}

fn error(source: &str) -> RuntimeError {
    match run_env(source, Value::Null) {
        Err(Signal::Error(error)) => error,
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn set_and_read_back() {
    assert_eq!(var("set x = 1 + 2", Value::Null, "x"), json!(3));
    assert_eq!(var("set x = \"a\"; set y = x + \"b\"", Value::Null, "y"), json!("ab"));
}

#[test]
fn when_and_else() {
    let source = "when @in.mood == \"happy\" :: set dest = \"🙂\" else set dest = \"🙁\"";
    assert_eq!(var(source, json!({"mood": "happy"}), "dest"), json!("🙂"));
    assert_eq!(var(source, json!({"mood": "sad"}), "dest"), json!("🙁"));
}

#[test]
fn unbound_identifiers_read_as_null() {
    assert_eq!(var("set x = nothing", Value::Null, "x"), Value::Null);
    assert_eq!(var("set x = nothing.deep[3].path", Value::Null, "x"), Value::Null);
}

#[test]
fn missing_paths_read_as_null() {
    let input = json!({"a": {"b": [10, 20]}});
    assert_eq!(var("set x = @in.a.b[1]", input.clone(), "x"), json!(20));
    assert_eq!(var("set x = @in.a.b.1", input.clone(), "x"), json!(20));
    assert_eq!(var("set x = @in.a.b[9]", input.clone(), "x"), Value::Null);
    assert_eq!(var("set x = @in.a[\"b\"][0]", input.clone(), "x"), json!(10));
    assert_eq!(var("set x = @in.a.b.name", input.clone(), "x"), Value::Null);
    assert_eq!(var("set x = @in.zzz.y.z", input, "x"), Value::Null);
}

#[test]
fn reading_through_a_scalar_is_an_error() {
    assert_eq!(error("set x = 5; set y = x.field").message, "cannot access field `field` on integer");
    assert_eq!(error("set x = \"s\"; set y = x[0]").message, "cannot index into string");
}

#[test]
fn path_assignment_vivifies() {
    assert_eq!(
        var("set a.b.c = 1; set a.b.d = 2", Value::Null, "a"),
        json!({"b": {"c": 1, "d": 2}})
    );
    assert_eq!(var("set xs[0] = 1; set xs[1] = 2", Value::Null, "xs"), json!([1, 2]));
    assert_eq!(
        var("set m.list[0].name = \"n\"", Value::Null, "m"),
        json!({"list": [{"name": "n"}]})
    );
    let key = "set k = \"dyn\"; set m[k] = true";
    assert_eq!(var(key, Value::Null, "m"), json!({"dyn": true}));
}

#[test]
fn path_assignment_errors() {
    assert_eq!(error("set x = 5; set x.y = 1").message, "cannot assign field `y` on integer");
    assert_eq!(
        error("set xs = [1]; set xs[3] = 1").message,
        "array index 3 out of bounds for length 1"
    );
    assert_eq!(error("set xs = [1]; set xs[-1] = 1").message, "negative array index -1");
    assert_eq!(error("set m = {}; set m[true] = 1").message, "index must be an integer or string, found boolean");
}

#[test]
fn writes_to_input_do_not_touch_copies() {
    let env = run_env("set copy = @in; set @in.a = 2", json!({"a": 1})).unwrap();
    assert_eq!(to_json(env.get("copy").unwrap()).unwrap(), json!({"a": 1}));
    assert_eq!(to_json(env.get(INPUT_NAME).unwrap()).unwrap(), json!({"a": 2}));
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(var("set x = false && 1 / 0", Value::Null, "x"), json!(false));
    assert_eq!(var("set x = true || 1 / 0", Value::Null, "x"), json!(true));
    assert_eq!(var("set x = 1 && \"s\"", Value::Null, "x"), json!(true));
}

#[test]
fn blocks_stop_at_the_first_error() {
    let ast = compile("{ set a = 1; set b = 1 / 0; set c = 3 }");
    let mut interpreter = Interpreter::builder(&ast).build();
    assert!(interpreter.run().is_err());
    assert!(interpreter.env().contains("a"));
    assert!(!interpreter.env().contains("c"));
}

#[test]
fn errors_carry_the_innermost_span() {
    let source = "set x = 1 + (2 / 0)";
    let err = error(source);
    assert_eq!(err.message, "division by zero");
    let span = err.span.unwrap();
    assert_eq!(span.slice(source), Some("2 / 0"));
}

#[test]
fn builtin_errors_carry_the_call_span() {
    let source = "set x = len(1)";
    let err = error(source);
    assert_eq!(err.message, "invalid argument type for `len`: `value` cannot be integer");
    assert_eq!(err.span.unwrap().slice(source), Some("len(1)"));
}

#[test]
fn catch_traps_errors_only() {
    assert_eq!(var("set x = 5; set y = catch(x.bogus.path, x * 2)", Value::Null, "y"), json!(10));
    assert_eq!(var("set y = catch(7, 1 / 0)", Value::Null, "y"), json!(7));
    assert_eq!(var("set y = std.catch(undefined_fn(), \"f\")", Value::Null, "y"), json!("f"));
    assert_eq!(error("set y = catch(1)").message, "too few arguments to `catch`: expected 2, got 1");
}

#[test]
fn catch_does_not_trap_terminate() {
    assert!(matches!(
        run_env("set y = catch(drop(), 1)", Value::Null),
        Err(Signal::Terminate { drop: true })
    ));
}

#[test]
fn coalesce_is_lazy() {
    assert_eq!(var("set y = coalesce(null, 2, 1 / 0)", Value::Null, "y"), json!(2));
    assert_eq!(var("set y = fallback(@in.a, @in.b)", json!({"b": "b"}), "y"), json!("b"));
    assert_eq!(var("set y = coalesce(null, null)", Value::Null, "y"), Value::Null);
}

#[test]
fn terminate_stops_the_run() {
    match run_env("set x = 1; emit(); set y = 2", Value::Null) {
        Err(Signal::Terminate { drop: false }) => {}
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        run_env("set x = map([1], e ~> { drop() })", Value::Null),
        Err(Signal::Terminate { drop: true })
    ));
}

#[test]
fn arrows_do_not_see_outer_variables() {
    let source = "set outer = 10; set r = map([1, 2], e ~> { set return = coalesce(outer, e.value) })";
    assert_eq!(var(source, Value::Null, "r"), json!([1, 2]));
}

#[test]
fn arrow_writes_to_entry_do_not_leak() {
    let source = "set xs = [1, 2]; set r = map(xs, e ~> { set e.value = 99 })";
    let env = run_env(source, Value::Null).unwrap();
    assert_eq!(to_json(env.get("xs").unwrap()).unwrap(), json!([1, 2]));
    assert_eq!(to_json(env.get("r").unwrap()).unwrap(), json!([1, 2]));
}

#[test]
fn map_over_map_return_forms() {
    let input = json!({"a": 1, "b": 2});
    assert_eq!(
        var("set r = map(@in, e ~> { set return = e.value * 10 })", input.clone(), "r"),
        json!({"a": 10, "b": 20})
    );
    assert_eq!(
        var("set r = map(@in, e ~> { set return.key = upper(e.key) })", input.clone(), "r"),
        json!({"A": 1, "B": 2})
    );
    let nested = json!({"a": {"key": "z", "value": 1}, "b": {"value": 3, "other": 4}});
    assert_eq!(
        var("set r = map(@in, e ~> { set return = e.value })", nested.clone(), "r"),
        nested
    );
    assert_eq!(
        var("set r = map(@in, e ~> { set return.value = e.value.value })", nested, "r"),
        json!({"a": 1, "b": 3})
    );
    assert_eq!(
        error("set r = map({a: 1}, e ~> { set return.key = 5 })").message,
        "map key must be a string, found integer"
    );
}

#[test]
fn errors_inside_arrows_fail_the_call() {
    assert_eq!(
        error("set r = map([1, 0], e ~> { set return = 1 / e.value })").message,
        "division by zero"
    );
}

#[test]
fn host_functions_in_custom_namespaces() {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register(
        "util",
        FunctionEntry::new("double", |args: &[Object]| {
            Object::Integer(args[0].as_int().unwrap_or_default() * 2)
        })
        .arg("n", TypeSet::INTEGER)
        .returns("n", TypeSet::INTEGER),
    );
    let ast = compile("set x = util.double(21); set y = Util.double(1)");
    let mut interpreter = Interpreter::builder(&ast).registry(Arc::new(registry)).build();
    interpreter.run().unwrap();
    assert_eq!(interpreter.env().get("x"), Some(&Object::Integer(42)));
    assert_eq!(interpreter.env().get("y"), Some(&Object::Integer(2)));
}

#[test]
fn undefined_functions_are_runtime_errors() {
    assert_eq!(error("set x = nope(1)").message, "undefined function `nope`");
    assert_eq!(error("set x = ns.nope()").message, "undefined function `ns.nope`");
}

#[test]
fn map_literal_duplicate_keys_keep_last() {
    assert_eq!(var("set m = {a: 1, a: 2}", Value::Null, "m"), json!({"a": 2}));
}

#[test]
fn deep_expression_nesting_runs() {
    let depth = 2_000;
    let source = format!("set x = {}1{}", "(".repeat(depth), " + 1)".repeat(depth));
    assert_eq!(var(&source, Value::Null, "x"), json!(2_001));
}
