#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn truthiness() {
    assert!(!Object::Null.is_truthy());
    assert!(!Object::Boolean(false).is_truthy());
    assert!(!Object::Integer(0).is_truthy());
    assert!(!Object::Float(0.0).is_truthy());
    assert!(!Object::string("").is_truthy());
    assert!(!Object::array(vec![]).is_truthy());
    assert!(!Object::map(ObjectMap::new()).is_truthy());
    assert!(Object::Integer(-1).is_truthy());
    assert!(Object::string("0").is_truthy());
    assert!(Object::Time(Utc.timestamp_opt(0, 0).unwrap()).is_truthy());
}

#[test]
fn integers_and_floats_compare_as_reals() {
    assert_eq!(Object::Integer(2), Object::Float(2.0));
    assert_ne!(Object::Integer(2), Object::Float(2.5));
    assert_ne!(Object::Integer(i64::MAX), Object::Float(f64::MAX));
    assert_ne!(Object::Integer(0), Object::Null);
}

#[test]
fn errors_never_compare_equal() {
    let error = Object::error("boom");
    assert_ne!(error, error.clone());
    assert_ne!(error, Object::Null);
}

#[test]
fn collections_compare_structurally() {
    let a = from_json(&json!({"x": [1, 2.5, {"y": null}]}));
    let b = from_json(&json!({"x": [1.0, 2.5, {"y": null}]}));
    assert_eq!(a, b);
    let c = from_json(&json!({"x": [1, 2.5]}));
    assert_ne!(a, c);
}

#[test]
fn whole_json_floats_lift_to_integers() {
    assert!(matches!(from_json(&json!(2.0)), Object::Integer(2)));
    assert!(matches!(from_json(&json!(2.5)), Object::Float(_)));
    assert!(matches!(from_json(&json!(-7)), Object::Integer(-7)));
}

#[test]
fn json_round_trip_keeps_shape() {
    let value = json!({"b": [true, null, "s"], "a": {"n": 1, "f": 0.5}});
    assert_eq!(to_json(&from_json(&value)).unwrap(), value);
}

#[test]
fn times_encode_as_rfc3339() {
    let t = Utc.timestamp_opt(1_700_000_000, 5_000_000).unwrap();
    assert_eq!(to_json(&Object::Time(t)).unwrap(), json!("2023-11-14T22:13:20.005Z"));
    let whole = Utc.timestamp_opt(0, 0).unwrap();
    assert_eq!(Object::Time(whole).to_string(), "1970-01-01T00:00:00Z");
}

#[test]
fn time_fractions_drop_trailing_zeros() {
    let half = Utc.timestamp_opt(1, 500_000_000).unwrap();
    assert_eq!(format_time_rfc3339(half), "1970-01-01T00:00:01.5Z");
    let micros = Utc.timestamp_opt(1, 120_000).unwrap();
    assert_eq!(format_time_rfc3339(micros), "1970-01-01T00:00:01.00012Z");
    let nanos = Utc.timestamp_opt(1, 1).unwrap();
    assert_eq!(format_time_rfc3339(nanos), "1970-01-01T00:00:01.000000001Z");
}

#[test]
fn signals_and_non_finite_floats_do_not_encode() {
    assert_eq!(
        to_json(&Object::error("x")),
        Err(EncodeError::Unencodable(ObjectType::Error))
    );
    assert_eq!(
        to_json(&object_terminate_drop()),
        Err(EncodeError::Unencodable(ObjectType::Terminate))
    );
    assert!(matches!(
        to_json(&Object::array(vec![Object::Float(f64::NAN)])),
        Err(EncodeError::NonFiniteFloat(_))
    ));
}

#[test]
fn display_forms() {
    assert_eq!(Object::Null.to_string(), "null");
    assert_eq!(Object::Float(1.5).to_string(), "1.5");
    assert_eq!(Object::string("raw").to_string(), "raw");
    assert_eq!(from_json(&json!({"b": 1, "a": [1, "x"]})).to_string(), r#"{"a":[1,"x"],"b":1}"#);
}

#[test]
fn map_keys_iterate_sorted() {
    let object = from_json(&json!({"c": 1, "a": 2, "b": 3}));
    let keys: Vec<_> = object.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn accessors() {
    assert_eq!(Object::Integer(3).as_float(), Some(3.0));
    assert_eq!(Object::Float(3.0).as_int(), None);
    assert_eq!(Object::string("s").as_string(), Some("s"));
    assert_eq!(from_json(&json!({"k": true})).get("k"), Some(&Object::Boolean(true)));
    assert_eq!(Object::Integer(1).get("k"), None);
    assert_eq!(cast_auto(&json!([1])).type_name(), "array");
    assert_eq!(cast_int(1).type_of(), ObjectType::Integer);
}

fn json_value() -> impl Strategy<Value = serde_json::Value> {
    let leaf = prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,4}".prop_map(serde_json::Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(serde_json::Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| serde_json::Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn lift_then_lower_is_identity(value in json_value()) {
        prop_assert_eq!(to_json(&from_json(&value)).unwrap(), value);
    }

    #[test]
    fn lifted_values_equal_themselves(value in json_value()) {
        let object = from_json(&value);
        prop_assert_eq!(object.clone(), object);
    }
}
