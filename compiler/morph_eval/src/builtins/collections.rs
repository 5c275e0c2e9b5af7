//! Collection builtins, including the higher-order `map`, `filter` and
//! `reduce`.
//!
//! Higher-order builtins call the arrow once per element with a fresh
//! `entry` map (`key` or `index`, `value`, and for `reduce` `current`) and
//! read the body's `return` binding afterwards. The source collection is
//! only ever read, so iteration always builds a new collection.

use crate::arrow::{ArrowFrame, ArrowFunction};
use crate::errors;
use crate::object::ObjectMap;
use crate::registry::{FunctionEntry, FunctionRegistry, TypeSet};
use crate::Object;

use super::{arity, count, lift, object_map, BuiltinResult};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_std(
        FunctionEntry::new("len", lift(len))
            .describe("Number of characters in a string or elements in a collection.")
            .arg("value", TypeSet::STRING | TypeSet::COLLECTION)
            .returns("length", TypeSet::INTEGER)
            .tagged(&["collections", "strings"])
            .example(r#"{"name": "héllo"}"#, "set @out = len(@in.name)", "5")
            .example("[1, 2, 3]", "set @out = len(@in)", "3"),
    );
    registry.register_std(
        FunctionEntry::new("append", lift(append))
            .describe("A new array with the value added at the end.")
            .arg("array", TypeSet::ARRAY)
            .arg("value", TypeSet::VALUE)
            .returns("array", TypeSet::ARRAY)
            .tagged(&["collections"])
            .example("[1, 2]", "set @out = append(@in, 3)", "[1, 2, 3]"),
    );
    registry.register_std(
        FunctionEntry::new("contains", lift(contains))
            .describe(
                "Whether an array holds an equal element, a string holds a substring, \
                 or a map holds a key.",
            )
            .arg("haystack", TypeSet::STRING | TypeSet::COLLECTION)
            .arg("needle", TypeSet::VALUE)
            .returns("found", TypeSet::BOOLEAN)
            .tagged(&["collections", "strings"])
            .example("[1, 2, 3]", "set @out = contains(@in, 2.0)", "true")
            .example(r#""morning""#, r#"set @out = contains(@in, "night")"#, "false")
            .example(r#"{"a": 1}"#, r#"set @out = contains(@in, "a")"#, "true"),
    );
    registry.register_std(
        FunctionEntry::new("keys", lift(keys))
            .describe("The keys of a map, sorted.")
            .arg("map", TypeSet::MAP)
            .returns("keys", TypeSet::ARRAY)
            .tagged(&["collections"])
            .example(r#"{"b": 1, "a": 2}"#, "set @out = keys(@in)", r#"["a", "b"]"#),
    );
    registry.register_std(
        FunctionEntry::new("values", lift(values))
            .describe("The values of a map, in key order.")
            .arg("map", TypeSet::MAP)
            .returns("values", TypeSet::ARRAY)
            .tagged(&["collections"])
            .example(r#"{"b": 1, "a": 2}"#, "set @out = values(@in)", "[2, 1]"),
    );
    registry.register_std(
        FunctionEntry::new("map", map)
            .describe(
                "Transform every element. Over a map the body may set `return.key` and \
                 `return.value`, or bind `return` to replace the value; over an array it \
                 sets `return`. Unset parts keep the original.",
            )
            .arg("collection", TypeSet::COLLECTION)
            .arg("function", TypeSet::ARROW_FUNCTION)
            .returns("collection", TypeSet::COLLECTION)
            .tagged(&["collections", "higher-order"])
            .example(
                r#"{"a": 1, "b": 2, "c": 3}"#,
                r#"set @out = map(@in, e ~> { set return.key = "p_" + e.key; set return.value = e.value * 2 })"#,
                r#"{"p_a": 2, "p_b": 4, "p_c": 6}"#,
            )
            .example(
                "[1, 2, 3]",
                "set @out = map(@in, e ~> { set return = e.value + e.index })",
                "[1, 3, 5]",
            ),
    );
    registry.register_std(
        FunctionEntry::new("filter", filter)
            .describe("Keep the elements whose body sets a truthy `return`.")
            .arg("collection", TypeSet::COLLECTION)
            .arg("function", TypeSet::ARROW_FUNCTION)
            .returns("collection", TypeSet::COLLECTION)
            .tagged(&["collections", "higher-order"])
            .example(
                r#"[1, 2, "3", 4]"#,
                "set @out = filter(@in, e ~> { if e.index >= 2 :: set return = true })",
                r#"["3", 4]"#,
            )
            .example(
                r#"{"keep": 1, "drop": 0}"#,
                "set @out = filter(@in, e ~> { set return = e.value })",
                r#"{"keep": 1}"#,
            ),
    );
    registry.register_std(
        FunctionEntry::new("reduce", reduce)
            .describe(
                "Fold a collection. `entry.current` holds the accumulator; a bound \
                 `return` becomes the next one.",
            )
            .arg("collection", TypeSet::COLLECTION)
            .arg("initial", TypeSet::VALUE)
            .arg("function", TypeSet::ARROW_FUNCTION)
            .returns("result", TypeSet::VALUE)
            .tagged(&["collections", "higher-order"])
            .example(
                r#"[1, 2, "3"]"#,
                "set @out = reduce(@in, 0, e ~> { set return = e.current + int(e.value) })",
                "6",
            ),
    );
}

fn len(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("len", 1, args));
    };
    match value {
        Object::String(s) => Ok(count(s.chars().count())),
        Object::Array(items) => Ok(count(items.len())),
        Object::Map(map) => Ok(count(map.len())),
        other => Err(errors::invalid_argument_type("len", "value", other.type_of())),
    }
}

fn append(args: &[Object]) -> BuiltinResult {
    let [Object::Array(items), value] = args else {
        return Err(arity("append", 2, args));
    };
    let mut items = items.to_vec();
    items.push(value.clone());
    Ok(Object::array(items))
}

fn contains(args: &[Object]) -> BuiltinResult {
    let [haystack, needle] = args else {
        return Err(arity("contains", 2, args));
    };
    let found = match (haystack, needle) {
        (Object::Array(items), needle) => items.iter().any(|item| item == needle),
        (Object::String(s), Object::String(sub)) => s.contains(sub.as_str()),
        (Object::Map(map), Object::String(key)) => map.contains_key(key.as_str()),
        (_, other) => {
            return Err(errors::invalid_argument_type(
                "contains",
                "needle",
                other.type_of(),
            ))
        }
    };
    Ok(Object::Boolean(found))
}

fn keys(args: &[Object]) -> BuiltinResult {
    let [Object::Map(map)] = args else {
        return Err(arity("keys", 1, args));
    };
    Ok(Object::array(map.keys().map(|k| Object::string(k.as_str())).collect()))
}

fn values(args: &[Object]) -> BuiltinResult {
    let [Object::Map(map)] = args else {
        return Err(arity("values", 1, args));
    };
    Ok(Object::array(map.values().cloned().collect()))
}

/// Run the arrow; a signal from its body becomes the builtin's result.
fn invoke(func: &ArrowFunction, entry: Object) -> Result<ArrowFrame, Object> {
    func.call(entry).map_err(crate::Signal::into_object)
}

fn map(args: &[Object]) -> Object {
    let [collection, Object::ArrowFunction(func)] = args else {
        return arity("map", 2, args).into();
    };
    let result: Result<Object, Object> = match collection {
        Object::Map(source) => map_entries(source, func),
        Object::Array(source) => map_items(source, func),
        other => Err(errors::invalid_argument_type("map", "collection", other.type_of()).into()),
    };
    result.unwrap_or_else(|signal| signal)
}

fn map_entries(source: &ObjectMap, func: &ArrowFunction) -> Result<Object, Object> {
    let mut out = ObjectMap::new();
    for (key, value) in source {
        let entry = object_map([
            ("key", Object::string(key.as_str())),
            ("value", value.clone()),
        ]);
        let frame = invoke(func, entry)?;
        let mut key = key.clone();
        let mut value = value.clone();
        match frame.returned() {
            None => {}
            // `return.key` / `return.value`, each optional.
            Some(Object::Map(returned)) if frame.returned_by_path() => {
                match returned.get("key") {
                    None | Some(Object::Null) => {}
                    Some(Object::String(new_key)) => key = new_key.as_str().to_string(),
                    Some(other) => return Err(errors::map_key_not_string(other.type_of()).into()),
                }
                if let Some(new_value) = returned.get("value") {
                    value = new_value.clone();
                }
            }
            // `set return = v` replaces the value and keeps the key.
            Some(other) => value = other.clone(),
        }
        out.insert(key, value);
    }
    Ok(Object::map(out))
}

fn map_items(source: &[Object], func: &ArrowFunction) -> Result<Object, Object> {
    let mut out = Vec::with_capacity(source.len());
    for (index, value) in source.iter().enumerate() {
        let entry = object_map([("index", count(index)), ("value", value.clone())]);
        let frame = invoke(func, entry)?;
        out.push(frame.returned().cloned().unwrap_or_else(|| value.clone()));
    }
    Ok(Object::array(out))
}

fn filter(args: &[Object]) -> Object {
    let [collection, Object::ArrowFunction(func)] = args else {
        return arity("filter", 2, args).into();
    };
    let kept = |frame: &ArrowFrame| frame.returned().is_some_and(Object::is_truthy);
    let result: Result<Object, Object> = match collection {
        Object::Map(source) => source
            .iter()
            .try_fold(ObjectMap::new(), |mut out, (key, value)| {
                let entry = object_map([
                    ("key", Object::string(key.as_str())),
                    ("value", value.clone()),
                ]);
                if kept(&invoke(func, entry)?) {
                    out.insert(key.clone(), value.clone());
                }
                Ok::<_, Object>(out)
            })
            .map(Object::map),
        Object::Array(source) => source
            .iter()
            .enumerate()
            .try_fold(Vec::new(), |mut out, (index, value)| {
                let entry = object_map([("index", count(index)), ("value", value.clone())]);
                if kept(&invoke(func, entry)?) {
                    out.push(value.clone());
                }
                Ok::<_, Object>(out)
            })
            .map(Object::array),
        other => Err(errors::invalid_argument_type("filter", "collection", other.type_of()).into()),
    };
    result.unwrap_or_else(|signal| signal)
}

fn reduce(args: &[Object]) -> Object {
    let [collection, initial, Object::ArrowFunction(func)] = args else {
        return arity("reduce", 3, args).into();
    };
    let step = |current: Object, position: (&str, Object), value: &Object| -> Result<Object, Object> {
        let entry = object_map([
            position,
            ("value", value.clone()),
            ("current", current.clone()),
        ]);
        let frame = invoke(func, entry)?;
        Ok(next_accumulator(&frame).unwrap_or(current))
    };
    let result: Result<Object, Object> = match collection {
        Object::Map(source) => source.iter().try_fold(initial.clone(), |acc, (key, value)| {
            step(acc, ("key", Object::string(key.as_str())), value)
        }),
        Object::Array(source) => source
            .iter()
            .enumerate()
            .try_fold(initial.clone(), |acc, (index, value)| {
                step(acc, ("index", count(index)), value)
            }),
        other => Err(errors::invalid_argument_type("reduce", "collection", other.type_of()).into()),
    };
    result.unwrap_or_else(|signal| signal)
}

/// `return` when bound, otherwise whatever the body left in `entry.current`.
fn next_accumulator(frame: &ArrowFrame) -> Option<Object> {
    frame
        .returned()
        .or_else(|| frame.entry().and_then(|entry| entry.get("current")))
        .cloned()
}
