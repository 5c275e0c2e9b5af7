//! String builtins.

use crate::errors;
use crate::registry::{FunctionEntry, FunctionRegistry, TypeSet};
use crate::Object;

use super::{arity, lift, BuiltinResult};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_std(
        FunctionEntry::new("string", lift(string))
            .describe(
                "Text form of a value. Times print as RFC 3339, maps and arrays as JSON.",
            )
            .arg("value", TypeSet::VALUE)
            .returns("string", TypeSet::STRING)
            .tagged(&["strings", "conversion"])
            .example(r#"{"n": 42}"#, "set @out = string(@in.n)", r#""42""#)
            .example("[1, true]", "set @out = string(@in)", r#""[1,true]""#),
    );
    registry.register_std(
        FunctionEntry::new("upper", lift(upper))
            .describe("Uppercase a string.")
            .arg("string", TypeSet::STRING)
            .returns("string", TypeSet::STRING)
            .tagged(&["strings"])
            .example(r#""abc""#, "set @out = upper(@in)", r#""ABC""#),
    );
    registry.register_std(
        FunctionEntry::new("lower", lift(lower))
            .describe("Lowercase a string.")
            .arg("string", TypeSet::STRING)
            .returns("string", TypeSet::STRING)
            .tagged(&["strings"])
            .example(r#""AbC""#, "set @out = lower(@in)", r#""abc""#),
    );
    registry.register_std(
        FunctionEntry::new("trim", lift(trim))
            .describe("Strip leading and trailing whitespace.")
            .arg("string", TypeSet::STRING)
            .returns("string", TypeSet::STRING)
            .tagged(&["strings"])
            .example(r#""  hi \n""#, "set @out = trim(@in)", r#""hi""#),
    );
    registry.register_std(
        FunctionEntry::new("split", lift(split))
            .describe("Split a string on a separator.")
            .arg("string", TypeSet::STRING)
            .arg("separator", TypeSet::STRING)
            .returns("parts", TypeSet::ARRAY)
            .tagged(&["strings"])
            .example(r#""a,b,,c""#, r#"set @out = split(@in, ",")"#, r#"["a", "b", "", "c"]"#),
    );
    registry.register_std(
        FunctionEntry::new("join", lift(join))
            .describe("Join an array of strings with a separator.")
            .arg("parts", TypeSet::ARRAY)
            .arg("separator", TypeSet::STRING)
            .returns("string", TypeSet::STRING)
            .tagged(&["strings"])
            .example(r#"["a", "b"]"#, r#"set @out = join(@in, "-")"#, r#""a-b""#),
    );
    registry.register_std(
        FunctionEntry::new("type", lift(type_name))
            .describe("The type name of a value.")
            .arg("value", TypeSet::ANY)
            .returns("type", TypeSet::STRING)
            .tagged(&["conversion"])
            .example(r#"{"a": 1.5}"#, "set @out = type(@in.a)", r#""float""#)
            .example("null", "set @out = type(@in.missing)", r#""null""#),
    );
}

fn string(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("string", 1, args));
    };
    match value {
        Object::String(_) => Ok(value.clone()),
        other => Ok(Object::string(other.to_string())),
    }
}

fn with_str(name: &str, args: &[Object], f: impl FnOnce(&str) -> String) -> BuiltinResult {
    match args {
        [Object::String(s)] => Ok(Object::string(f(s.as_str()))),
        [other] => Err(errors::invalid_argument_type(name, "string", other.type_of())),
        _ => Err(arity(name, 1, args)),
    }
}

fn upper(args: &[Object]) -> BuiltinResult {
    with_str("upper", args, str::to_uppercase)
}

fn lower(args: &[Object]) -> BuiltinResult {
    with_str("lower", args, str::to_lowercase)
}

fn trim(args: &[Object]) -> BuiltinResult {
    with_str("trim", args, |s| s.trim().to_string())
}

fn split(args: &[Object]) -> BuiltinResult {
    let [Object::String(s), Object::String(separator)] = args else {
        return Err(arity("split", 2, args));
    };
    Ok(Object::array(
        s.split(separator.as_str()).map(Object::string).collect(),
    ))
}

fn join(args: &[Object]) -> BuiltinResult {
    let [Object::Array(parts), Object::String(separator)] = args else {
        return Err(arity("join", 2, args));
    };
    let parts = parts
        .iter()
        .map(|part| {
            part.as_string()
                .ok_or_else(|| errors::join_requires_strings(part.type_of()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Object::string(parts.join(separator.as_str())))
}

fn type_name(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("type", 1, args));
    };
    Ok(Object::string(value.type_name()))
}
