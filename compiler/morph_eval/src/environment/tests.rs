#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

fn env() -> Environment {
    Environment::new(Arc::new(FunctionRegistry::new()))
}

#[test]
fn set_and_get() {
    let mut env = env();
    env.set("x", Object::Integer(42));
    assert_eq!(env.get("x"), Some(&Object::Integer(42)));
    assert_eq!(env.get("y"), None);
    assert!(env.contains("x"));
}

#[test]
fn rebinding_replaces() {
    let mut env = env();
    env.set("x", Object::Integer(1));
    env.set("x", Object::string("two"));
    assert_eq!(env.get("x"), Some(&Object::string("two")));
    assert_eq!(env.len(), 1);
}

#[test]
fn slot_creates_null_binding() {
    let mut env = env();
    *env.slot("fresh") = Object::Boolean(true);
    assert_eq!(env.get("fresh"), Some(&Object::Boolean(true)));

    let slot = env.slot("other");
    assert!(slot.is_null());
}

#[test]
fn to_object_is_sorted_map() {
    let mut env = env();
    env.set("b", Object::Integer(2));
    env.set("a", Object::Integer(1));
    let object = env.to_object();
    let keys: Vec<_> = object.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn clear_and_remove() {
    let mut env = env();
    env.set("a", Object::Integer(1));
    env.set("b", Object::Integer(2));
    assert_eq!(env.remove("a"), Some(Object::Integer(1)));
    env.clear();
    assert!(env.is_empty());
}
