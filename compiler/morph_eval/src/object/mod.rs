//! The runtime object universe.
//!
//! [`Object`] is a closed tagged sum. Scalars are stored inline; strings,
//! maps and arrays live behind a [`Heap`] so cloning an object is cheap and
//! writes copy only the branch they touch.
//!
//! `Error` and `Terminate` are objects too: builtins return them like any
//! other value and the interpreter turns them into [`Signal`](crate::Signal)s
//! at the call boundary.

mod convert;
mod heap;
mod wrap;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Timelike, Utc};

pub use convert::{from_json, to_json, EncodeError};
pub use heap::Heap;
pub use wrap::{
    cast_array, cast_auto, cast_bool, cast_error, cast_float, cast_int, cast_map, cast_string,
    cast_time, object_null, object_terminate, object_terminate_drop,
};

use crate::arrow::ArrowFunction;

/// Map contents. Keys iterate in sorted order.
pub type ObjectMap = BTreeMap<String, Object>;

/// A runtime value.
#[derive(Clone)]
pub enum Object {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Heap<String>),
    /// UTC instant with nanosecond precision.
    Time(DateTime<Utc>),
    Map(Heap<ObjectMap>),
    Array(Heap<Vec<Object>>),
    ArrowFunction(ArrowFunction),
    Error(String),
    /// Stop the run; with `drop` the environment is discarded.
    Terminate {
        drop: bool,
    },
}

/// The type tag of an [`Object`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Time,
    Map,
    Array,
    ArrowFunction,
    Error,
    Terminate,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            ObjectType::Null => "null",
            ObjectType::Boolean => "boolean",
            ObjectType::Integer => "integer",
            ObjectType::Float => "float",
            ObjectType::String => "string",
            ObjectType::Time => "time",
            ObjectType::Map => "map",
            ObjectType::Array => "array",
            ObjectType::ArrowFunction => "function",
            ObjectType::Error => "error",
            ObjectType::Terminate => "terminate",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Object {
    #[inline]
    pub fn string(value: impl Into<String>) -> Self {
        Object::String(Heap::new(value.into()))
    }

    #[inline]
    pub fn map(entries: ObjectMap) -> Self {
        Object::Map(Heap::new(entries))
    }

    #[inline]
    pub fn array(items: Vec<Object>) -> Self {
        Object::Array(Heap::new(items))
    }

    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }

    pub fn type_of(&self) -> ObjectType {
        match self {
            Object::Null => ObjectType::Null,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Integer(_) => ObjectType::Integer,
            Object::Float(_) => ObjectType::Float,
            Object::String(_) => ObjectType::String,
            Object::Time(_) => ObjectType::Time,
            Object::Map(_) => ObjectType::Map,
            Object::Array(_) => ObjectType::Array,
            Object::ArrowFunction(_) => ObjectType::ArrowFunction,
            Object::Error(_) => ObjectType::Error,
            Object::Terminate { .. } => ObjectType::Terminate,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_of().name()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// `Null`, `false`, zero and empty strings/maps/arrays are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null | Object::Error(_) => false,
            Object::Boolean(b) => *b,
            Object::Integer(n) => *n != 0,
            Object::Float(f) => *f != 0.0,
            Object::String(s) => !s.is_empty(),
            Object::Map(m) => !m.is_empty(),
            Object::Array(a) => !a.is_empty(),
            Object::Time(_) | Object::ArrowFunction(_) | Object::Terminate { .. } => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Object::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Floats, with integers promoted.
    #[allow(
        clippy::cast_precision_loss,
        reason = "numeric promotion follows IEEE rounding"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Object::Float(f) => Some(*f),
            Object::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Object::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ObjectMap> {
        match self {
            Object::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Object::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_arrow_function(&self) -> Option<&ArrowFunction> {
        match self {
            Object::ArrowFunction(f) => Some(f),
            _ => None,
        }
    }

    /// Field lookup on a map; anything else has no fields.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.as_map().and_then(|m| m.get(key))
    }
}

/// Structural equality.
///
/// Integers and floats compare as real numbers. An `Error` is never equal
/// to anything, itself included.
impl PartialEq for Object {
    #[allow(clippy::float_cmp, reason = "structural equality on floats is exact")]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Null, Object::Null) => true,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Integer(a), Object::Float(b)) | (Object::Float(b), Object::Integer(a)) => {
                int_equals_float(*a, *b)
            }
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Time(a), Object::Time(b)) => a == b,
            (Object::Map(a), Object::Map(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::ArrowFunction(a), Object::ArrowFunction(b)) => a.same_body(b),
            (Object::Terminate { drop: a }, Object::Terminate { drop: b }) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison: the float must be integral and inside the `i64` range.
#[allow(
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    reason = "range and integrality are checked before the cast"
)]
fn int_equals_float(int: i64, float: f64) -> bool {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    float.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&float) && float as i64 == int
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => f.write_str("Null"),
            Object::Boolean(b) => write!(f, "Boolean({b})"),
            Object::Integer(n) => write!(f, "Integer({n})"),
            Object::Float(x) => write!(f, "Float({x:?})"),
            Object::String(s) => write!(f, "String({:?})", s.as_str()),
            Object::Time(t) => write!(f, "Time({})", format_time_rfc3339(*t)),
            Object::Map(m) => f.debug_map().entries(m.iter()).finish(),
            Object::Array(a) => f.debug_list().entries(a.iter()).finish(),
            Object::ArrowFunction(func) => write!(f, "ArrowFunction({} ~> ...)", func.param()),
            Object::Error(message) => write!(f, "Error({message:?})"),
            Object::Terminate { drop } => write!(f, "Terminate {{ drop: {drop} }}"),
        }
    }
}

/// Text form used by `string(x)` and string conversion.
///
/// Scalars print bare, times print as RFC 3339, collections print as JSON.
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => f.write_str("null"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Integer(n) => write!(f, "{n}"),
            Object::Float(x) => write!(f, "{x}"),
            Object::String(s) => f.write_str(s),
            Object::Time(t) => f.write_str(&format_time_rfc3339(*t)),
            Object::Map(_) | Object::Array(_) => match to_json(self) {
                Ok(json) => write!(f, "{json}"),
                Err(_) => f.write_str("<unencodable>"),
            },
            Object::ArrowFunction(func) => write!(f, "{} ~> {{...}}", func.param()),
            Object::Error(message) => f.write_str(message),
            Object::Terminate { drop: true } => f.write_str("<drop>"),
            Object::Terminate { drop: false } => f.write_str("<emit>"),
        }
    }
}

/// RFC 3339 with as many fractional digits as the instant needs: trailing
/// zeros are trimmed and whole seconds carry no fraction.
pub fn format_time_rfc3339(time: DateTime<Utc>) -> String {
    if time.nanosecond() % 1_000_000_000 == 0 {
        return time.to_rfc3339_opts(SecondsFormat::Secs, true);
    }
    let nanos = time.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let fraction = nanos.trim_end_matches('Z').trim_end_matches('0');
    format!("{fraction}Z")
}

#[cfg(test)]
mod tests;
