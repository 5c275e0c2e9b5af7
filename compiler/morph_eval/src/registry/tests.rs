#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn sum(args: &[Object]) -> Object {
    Object::Integer(args.iter().filter_map(Object::as_int).sum())
}

fn registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::new();
    registry.register_std(
        FunctionEntry::new("sum", sum)
            .arg("first", TypeSet::INTEGER)
            .arg("rest", TypeSet::INTEGER)
            .variadic()
            .returns("total", TypeSet::INTEGER),
    );
    registry.register(
        " Text ",
        FunctionEntry::new("shout", |args: &[Object]| {
            Object::string(args[0].as_string().unwrap_or_default().to_uppercase())
        })
        .arg("s", TypeSet::STRING)
        .returns("s", TypeSet::STRING),
    );
    registry.register_std(
        FunctionEntry::new("liar", |_: &[Object]| Object::Integer(1)).returns("s", TypeSet::STRING),
    );
    registry
}

fn message(object: Object) -> String {
    match object {
        Object::Error(message) => message,
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn unqualified_calls_resolve_in_std() {
    let registry = registry();
    assert_eq!(
        registry.call(DEFAULT_NAMESPACE, "sum", &[Object::Integer(1), Object::Integer(2)]),
        Object::Integer(3)
    );
}

#[test]
fn namespaces_are_trimmed_and_lowercased() {
    let registry = registry();
    assert_eq!(registry.namespace_names(), vec!["std", "text"]);
    assert_eq!(
        registry.call("TEXT", "shout", &[Object::string("hi")]),
        Object::string("HI")
    );
    assert_eq!(registry.get("text", "shout").unwrap().namespace(), "text");
}

#[test]
fn variadic_tail_uses_last_spec() {
    let registry = registry();
    let args = [1, 2, 3, 4].map(Object::Integer);
    assert_eq!(registry.call("std", "sum", &args), Object::Integer(10));
    assert_eq!(
        message(registry.call("std", "sum", &[Object::Integer(1), Object::Integer(2), Object::Null])),
        "invalid argument type for `sum`: `rest` cannot be null"
    );
}

#[test]
fn arity_is_checked() {
    let registry = registry();
    assert_eq!(
        message(registry.call("std", "sum", &[Object::Integer(1)])),
        "too few arguments to `sum`: expected 2, got 1"
    );
    assert_eq!(
        message(registry.call("text", "shout", &[Object::string("a"), Object::string("b")])),
        "too many arguments to `shout`: expected 1, got 2"
    );
}

#[test]
fn return_type_is_checked() {
    assert_eq!(
        message(registry().call("std", "liar", &[])),
        "invalid return type from `liar`: integer"
    );
}

#[test]
fn unknown_functions() {
    let registry = registry();
    assert_eq!(message(registry.call("std", "nope", &[])), "undefined function `nope`");
    assert_eq!(message(registry.call("Missing", "f", &[])), "undefined function `missing.f`");
}

#[test]
fn reregistration_overwrites() {
    let mut registry = registry();
    registry.register_std(FunctionEntry::new("sum", |_: &[Object]| Object::Integer(0)));
    assert_eq!(registry.call("std", "sum", &[]), Object::Integer(0));
}

#[test]
fn entries_are_sorted() {
    let registry = registry();
    let names: Vec<_> = registry
        .entries()
        .iter()
        .map(|e| format!("{}.{}", e.namespace(), e.name()))
        .collect();
    assert_eq!(names, vec!["std.liar", "std.sum", "text.shout"]);
}

#[test]
fn type_set_display() {
    assert_eq!(TypeSet::ANY.to_string(), "any");
    assert_eq!(TypeSet::NUMBER.to_string(), "integer|float");
    assert_eq!((TypeSet::STRING | TypeSet::MAP).to_string(), "string|map");
}

#[test]
fn builtins_are_documented() {
    let registry = FunctionRegistry::with_builtins();
    for entry in registry.entries() {
        assert!(!entry.description().is_empty(), "{} has no description", entry.name());
        assert!(!entry.examples().is_empty(), "{} has no examples", entry.name());
        assert!(!entry.tags().is_empty(), "{} has no tags", entry.name());
    }
    assert!(registry.get("std", "parse_time").is_some());
    assert!(registry.get("std", "fallback").unwrap().is_variadic());
}
