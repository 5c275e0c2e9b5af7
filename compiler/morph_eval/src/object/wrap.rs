//! Constructors for host-registered functions.
//!
//! Together with the `as_*` accessors and [`Object::type_of`] these form
//! the API a custom function uses to read its arguments and build results.

use chrono::{DateTime, Utc};

use super::{from_json, Object, ObjectMap};

pub fn cast_int(value: i64) -> Object {
    Object::Integer(value)
}

pub fn cast_float(value: f64) -> Object {
    Object::Float(value)
}

pub fn cast_string(value: impl Into<String>) -> Object {
    Object::string(value)
}

pub fn cast_bool(value: bool) -> Object {
    Object::Boolean(value)
}

pub fn cast_map(value: ObjectMap) -> Object {
    Object::map(value)
}

pub fn cast_array(value: Vec<Object>) -> Object {
    Object::array(value)
}

pub fn cast_time(value: DateTime<Utc>) -> Object {
    Object::Time(value)
}

pub fn cast_error(message: impl Into<String>) -> Object {
    Object::error(message)
}

/// Build an object from any JSON-shaped host value.
pub fn cast_auto(value: &serde_json::Value) -> Object {
    from_json(value)
}

pub fn object_null() -> Object {
    Object::Null
}

/// `emit()`: stop the run and keep the environment.
pub fn object_terminate() -> Object {
    Object::Terminate { drop: false }
}

/// `drop()`: stop the run and discard the environment.
pub fn object_terminate_drop() -> Object {
    Object::Terminate { drop: true }
}
