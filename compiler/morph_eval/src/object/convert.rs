//! Lifting JSON values into objects and lowering objects back to JSON.

use morph_stack::ensure_sufficient_stack;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::{format_time_rfc3339, Object, ObjectMap, ObjectType};

/// An object that has no JSON form reached the encoder.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EncodeError {
    #[error("cannot encode {0} object as JSON")]
    Unencodable(ObjectType),
    #[error("cannot encode non-finite float {0} as JSON")]
    NonFiniteFloat(f64),
}

/// Lift a decoded JSON value into the object universe.
///
/// Numbers become `Integer` when they are whole and fit in an `i64`, so
/// `2.0` lifts to `Integer(2)`.
pub fn from_json(value: &Value) -> Object {
    ensure_sufficient_stack(|| match value {
        Value::Null => Object::Null,
        Value::Bool(b) => Object::Boolean(*b),
        Value::Number(n) => lift_number(n),
        Value::String(s) => Object::string(s.as_str()),
        Value::Array(items) => Object::array(items.iter().map(from_json).collect()),
        Value::Object(fields) => Object::map(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect::<ObjectMap>(),
        ),
    })
}

fn lift_number(n: &Number) -> Object {
    if let Some(i) = n.as_i64() {
        return Object::Integer(i);
    }
    match n.as_f64() {
        Some(f) => whole_float_to_int(f).map_or(Object::Float(f), Object::Integer),
        None => Object::Null,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    reason = "range and integrality are checked before the cast"
)]
fn whole_float_to_int(f: f64) -> Option<i64> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f)).then_some(f as i64)
}

/// Lower an object to JSON.
///
/// Times encode as RFC 3339 strings. `Error`, `Terminate`, arrow functions
/// and non-finite floats have no JSON form.
pub fn to_json(object: &Object) -> Result<Value, EncodeError> {
    ensure_sufficient_stack(|| match object {
        Object::Null => Ok(Value::Null),
        Object::Boolean(b) => Ok(Value::Bool(*b)),
        Object::Integer(n) => Ok(Value::Number((*n).into())),
        Object::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or(EncodeError::NonFiniteFloat(*f)),
        Object::String(s) => Ok(Value::String(s.to_string())),
        Object::Time(t) => Ok(Value::String(format_time_rfc3339(*t))),
        Object::Array(items) => items
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Object::Map(fields) => {
            let mut out = Map::new();
            for (key, value) in fields.iter() {
                out.insert(key.clone(), to_json(value)?);
            }
            Ok(Value::Object(out))
        }
        Object::ArrowFunction(_) | Object::Error(_) | Object::Terminate { .. } => {
            Err(EncodeError::Unencodable(object.type_of()))
        }
    })
}
