#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use morph::{FunctionEntry, FunctionRegistry, MorphError, Object, OutputMode, Program, TypeSet};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn run(source: &str, input: Value) -> Value {
    Program::compile(source)
        .unwrap()
        .run_value(&input)
        .unwrap()
}

#[test]
fn when_sets_destination() {
    let source = "WHEN @in.mood == \"happy\" :: SET dest = \"🙂\"\nSET @out = dest";
    assert_eq!(run(source, json!({"mood": "happy"})), json!("🙂"));
    assert_eq!(run(source, json!({"mood": "sad"})), Value::Null);
}

#[test]
fn map_rewrites_keys_and_values() {
    let source = r#"SET res = map(@in, e ~> { SET return.key = "p_" + e.key; SET return.value = e.value * 2 }); SET @out = res"#;
    assert_eq!(
        run(source, json!({"a": 1, "b": 2, "c": 3})),
        json!({"p_a": 2, "p_b": 4, "p_c": 6})
    );
}

#[test]
fn filter_by_index() {
    let source = "SET @out = filter(@in, e ~> { IF e.index >= 2 :: SET return = true })";
    assert_eq!(run(source, json!([1, 2, "3", 4])), json!(["3", 4]));
}

#[test]
fn reduce_sums_converted_values() {
    let source = "SET @out = reduce(@in, 0, e ~> { SET return = e.current + int(e.value) })";
    assert_eq!(run(source, json!([1, 2, "3"])), json!(6));
}

#[test]
fn drop_discards_everything() {
    let source = "set x = \"a\"; drop(); set y = 1";
    assert_eq!(run(source, json!({"any": "thing"})), Value::Null);
    assert_eq!(run(source, Value::Null), Value::Null);
}

#[test]
fn catch_recovers_from_bad_path() {
    let output = run(
        "set x = 5; set y = catch(x.bogus.path, x * 2)",
        Value::Null,
    );
    assert_eq!(output["y"], json!(10));
    assert_eq!(output["x"], json!(5));
}

#[test]
fn emit_keeps_what_was_set() {
    let source = "set @out = 1; emit(); set @out = 2";
    assert_eq!(run(source, Value::Null), json!(1));
}

#[test]
fn environment_is_output_without_out() {
    assert_eq!(
        run("set a = 1; set b.c = [true]", json!("x")),
        json!({"@in": "x", "a": 1, "b": {"c": [true]}})
    );
}

#[test]
fn out_only_mode_yields_null_without_out() {
    let program = Program::builder("set a = 1")
        .output(OutputMode::OutOnly)
        .build()
        .unwrap();
    assert_eq!(program.output_mode(), OutputMode::OutOnly);
    assert_eq!(program.run_value(&Value::Null).unwrap(), Value::Null);

    let program = Program::builder("set @out = 2")
        .output(OutputMode::OutOnly)
        .build()
        .unwrap();
    assert_eq!(program.run_value(&Value::Null).unwrap(), json!(2));
}

#[test]
fn byte_interface() {
    let program = Program::compile("set @out = {name: upper(@in.name), n: len(@in.tags)}").unwrap();
    let output = program.run(br#"{"name": "ada", "tags": ["a", "b"]}"#).unwrap();
    assert_eq!(
        serde_json::from_slice::<Value>(&output).unwrap(),
        json!({"name": "ADA", "n": 2})
    );
}

#[test]
fn program_runs_are_independent() {
    let program = Program::compile("set @out = coalesce(seen, 0) + @in; set seen = 100").unwrap();
    assert_eq!(program.run_value(&json!(1)).unwrap(), json!(1));
    assert_eq!(program.run_value(&json!(2)).unwrap(), json!(2));
}

#[test]
fn parse_errors_are_all_reported() {
    let error = Program::compile("set = 1\nset y = 2\nset z = )").unwrap_err();
    let MorphError::Parse { diagnostics } = &error else {
        panic!("expected a parse error, got {error:?}");
    };
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(
        error.to_string(),
        "1:5: expected expression, found `=`\n3:9: expected expression, found `)`"
    );
    assert_eq!(error.diagnostics(), diagnostics.clone());
}

#[test]
fn runtime_errors_carry_line_and_column() {
    let program = Program::compile("set a = 1\nset b = a / 0").unwrap();
    let error = program.run_value(&Value::Null).unwrap_err();
    assert!(matches!(error, MorphError::Runtime { line: 2, .. }), "{error:?}");
    assert_eq!(error.to_string(), "2:9: division by zero");
    assert_eq!(error.diagnostics().len(), 1);
}

#[test]
fn undefined_function_is_a_runtime_error() {
    let error = Program::compile("set @out = nope(1)")
        .unwrap()
        .run_value(&Value::Null)
        .unwrap_err();
    assert_eq!(error.to_string(), "1:12: undefined function `nope`");
}

#[test]
fn invalid_json_input() {
    let program = Program::compile("set @out = @in").unwrap();
    let error = program.run(b"{not json").unwrap_err();
    assert!(matches!(error, MorphError::InvalidInput(_)), "{error:?}");
}

#[test]
fn non_finite_output_cannot_encode() {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register_std(FunctionEntry::new("inf", |_: &[Object]| Object::Float(f64::INFINITY)));
    let program = Program::builder("set @out = inf()")
        .registry(Arc::new(registry))
        .build()
        .unwrap();
    let error = program.run_value(&Value::Null).unwrap_err();
    assert!(matches!(error, MorphError::Encode(_)), "{error:?}");
}

#[test]
fn host_functions_in_custom_namespace() {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register(
        "host",
        FunctionEntry::new("double", |args: &[Object]| match args {
            [Object::Integer(n)] => n
                .checked_mul(2)
                .map_or_else(|| Object::error("too large to double"), Object::Integer),
            _ => Object::Null,
        })
        .arg("n", TypeSet::INTEGER),
    );
    let program = Program::builder("set @out = host.double(@in)")
        .registry(Arc::new(registry))
        .build()
        .unwrap();
    assert_eq!(program.run_value(&json!(21)).unwrap(), json!(42));

    let error = program.run_value(&json!("x")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "1:12: invalid argument type for `double`: `n` cannot be string"
    );
    let error = program.run_value(&json!(i64::MAX)).unwrap_err();
    assert_eq!(error.to_string(), "1:12: too large to double");
}

#[test]
fn programs_are_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Program>();

    let program = Arc::new(Program::compile("set @out = @in * 2").unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let program = Arc::clone(&program);
            std::thread::spawn(move || program.run_value(&json!(i)).unwrap())
        })
        .collect();
    let outputs: Vec<Value> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(outputs, vec![json!(0), json!(2), json!(4), json!(6)]);
}

#[test]
fn format_canonicalizes_source() {
    assert_eq!(
        morph::format("SET x = 1+2*3\nWHEN x > 1 :: SET @out = x").unwrap(),
        "set x = 1 + (2 * 3)\nwhen x > 1 :: set @out = x\n"
    );
    assert!(matches!(morph::format("set = 1"), Err(MorphError::Parse { .. })));
}

#[test]
fn tracing_init_is_idempotent() {
    morph::init_tracing();
    morph::init_tracing();
}
