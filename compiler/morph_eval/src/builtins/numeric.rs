//! Numeric builtins and conversions.

use std::cmp::Ordering;

use crate::errors;
use crate::registry::{FunctionEntry, FunctionRegistry, TypeSet};
use crate::Object;

use super::{arity, lift, BuiltinResult};

pub(super) fn register(registry: &mut FunctionRegistry) {
    registry.register_std(
        FunctionEntry::new("min", lift(min))
            .describe("The smaller of two numbers. Integer only when both are integers.")
            .arg("a", TypeSet::NUMBER)
            .arg("b", TypeSet::NUMBER)
            .returns("min", TypeSet::NUMBER)
            .tagged(&["numbers"])
            .example("null", "set @out = min(3, 2)", "2")
            .example("null", "set @out = min(1, 1.5)", "1.0"),
    );
    registry.register_std(
        FunctionEntry::new("max", lift(max))
            .describe("The larger of two numbers. Integer only when both are integers.")
            .arg("a", TypeSet::NUMBER)
            .arg("b", TypeSet::NUMBER)
            .returns("max", TypeSet::NUMBER)
            .tagged(&["numbers"])
            .example(r#"{"a": 4, "b": 9}"#, "set @out = max(@in.a, @in.b)", "9"),
    );
    registry.register_std(
        FunctionEntry::new("int", lift(int))
            .describe(
                "Convert to an integer. Floats truncate toward zero, strings are parsed, \
                 booleans become 0 or 1 and times become unix seconds.",
            )
            .arg(
                "value",
                TypeSet::NUMBER | TypeSet::STRING | TypeSet::BOOLEAN | TypeSet::TIME,
            )
            .returns("integer", TypeSet::INTEGER)
            .tagged(&["numbers", "conversion"])
            .example(r#""42""#, "set @out = int(@in)", "42")
            .example("null", "set @out = int(-2.7)", "-2"),
    );
    registry.register_std(
        FunctionEntry::new("float", lift(float))
            .describe("Convert to a float. Strings are parsed, booleans become 0.0 or 1.0.")
            .arg("value", TypeSet::NUMBER | TypeSet::STRING | TypeSet::BOOLEAN)
            .returns("float", TypeSet::FLOAT)
            .tagged(&["numbers", "conversion"])
            .example(r#""2.5""#, "set @out = float(@in)", "2.5"),
    );
}

fn min(args: &[Object]) -> BuiltinResult {
    pick("min", args, Ordering::Less)
}

fn max(args: &[Object]) -> BuiltinResult {
    pick("max", args, Ordering::Greater)
}

/// Return `b` when it orders `want` relative to `a`, else `a`. Mixed
/// operands compare and return as floats.
fn pick(name: &str, args: &[Object], want: Ordering) -> BuiltinResult {
    let [a, b] = args else {
        return Err(arity(name, 2, args));
    };
    if let (Object::Integer(x), Object::Integer(y)) = (a, b) {
        return Ok(Object::Integer(if y.cmp(x) == want { *y } else { *x }));
    }
    match (a.as_float(), b.as_float()) {
        (Some(x), Some(y)) => Ok(Object::Float(if y.partial_cmp(&x) == Some(want) { y } else { x })),
        (None, _) => Err(errors::invalid_argument_type(name, "a", a.type_of())),
        (_, None) => Err(errors::invalid_argument_type(name, "b", b.type_of())),
    }
}

fn int(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("int", 1, args));
    };
    match value {
        Object::Integer(n) => Ok(Object::Integer(*n)),
        Object::Float(f) => float_to_int(*f).ok_or_else(|| errors::cannot_convert(&f.to_string(), "integer")),
        Object::String(s) => {
            let text = s.trim();
            if let Ok(n) = text.parse::<i64>() {
                return Ok(Object::Integer(n));
            }
            text.parse::<f64>()
                .ok()
                .and_then(float_to_int)
                .ok_or_else(|| errors::cannot_parse(s, "integer"))
        }
        Object::Boolean(b) => Ok(Object::Integer(i64::from(*b))),
        Object::Time(t) => Ok(Object::Integer(t.timestamp())),
        other => Err(errors::invalid_argument_type("int", "value", other.type_of())),
    }
}

/// Truncate toward zero; `None` for NaN, infinities and values outside `i64`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
fn float_to_int(f: f64) -> Option<Object> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    let truncated = f.trunc();
    (truncated.is_finite() && (-TWO_POW_63..TWO_POW_63).contains(&truncated))
        .then(|| Object::Integer(truncated as i64))
}

fn float(args: &[Object]) -> BuiltinResult {
    let [value] = args else {
        return Err(arity("float", 1, args));
    };
    match value {
        Object::Integer(_) | Object::Float(_) => Ok(Object::Float(value.as_float().unwrap_or_default())),
        Object::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Object::Float)
            .ok_or_else(|| errors::cannot_parse(s, "float")),
        Object::Boolean(b) => Ok(Object::Float(f64::from(u8::from(*b)))),
        other => Err(errors::invalid_argument_type("float", "value", other.type_of())),
    }
}
