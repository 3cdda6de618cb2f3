//! Plain-JSON conversion for payloads.
//!
//! The serde derives on [`Value`] use the tagged `{ "type": ..., "data": ... }`
//! layout. Config frontends usually hand us plain JSON instead, so this module
//! converts between the two given a target [`Type`]. Marks never cross this
//! boundary in either direction.

use hashbrown::HashMap;
use serde_json::{json, Map, Value as JsonValue};
use thiserror::Error;

use crate::ty::Type;
use crate::value::{Repr, Value};

/// Errors produced while converting between plain JSON and values.
#[derive(Debug, Error)]
pub enum ValueJsonError {
    #[error("unknown values have no plain JSON form")]
    UnknownValue,
    #[error("json value {found} does not fit type {expected:?}")]
    TypeMismatch { expected: Type, found: String },
    #[error("number {0} is not representable as f64")]
    BadNumber(String),
}

/// Convert a value into plain JSON. Null payloads become JSON null; unknown
/// payloads (at any depth) have no plain form and error. Marks are ignored
/// at every level.
pub fn to_plain_json(value: &Value) -> Result<JsonValue, ValueJsonError> {
    match &value.repr {
        Repr::Unknown(_) => Err(ValueJsonError::UnknownValue),
        Repr::Null(_) => Ok(JsonValue::Null),
        Repr::Bool(b) => Ok(JsonValue::Bool(*b)),
        Repr::Number(n) => Ok(json!(n)),
        Repr::String(s) => Ok(JsonValue::String(s.clone())),
        Repr::List(items) | Repr::Tuple(items) => Ok(JsonValue::Array(
            items
                .iter()
                .map(to_plain_json)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Repr::Map(entries) | Repr::Object(entries) => {
            let mut out = Map::new();
            for (key, item) in entries {
                out.insert(key.clone(), to_plain_json(item)?);
            }
            Ok(JsonValue::Object(out))
        }
    }
}

/// Convert plain JSON into a value of the given type. `Type::Dynamic` infers
/// the shape from the JSON itself (objects become maps, arrays become lists).
pub fn from_plain_json(ty: &Type, json: JsonValue) -> Result<Value, ValueJsonError> {
    if json.is_null() {
        return Ok(Value::null(ty.clone()));
    }
    match ty {
        Type::Bool => match json {
            JsonValue::Bool(b) => Ok(Value::bool(b)),
            other => Err(mismatch(ty, &other)),
        },
        Type::Number => match json {
            JsonValue::Number(n) => n
                .as_f64()
                .map(Value::number)
                .ok_or_else(|| ValueJsonError::BadNumber(n.to_string())),
            other => Err(mismatch(ty, &other)),
        },
        Type::String => match json {
            JsonValue::String(s) => Ok(Value::string(s)),
            other => Err(mismatch(ty, &other)),
        },
        Type::List(elem) => match json {
            JsonValue::Array(items) => Ok(Value::list(
                items
                    .into_iter()
                    .map(|item| from_plain_json(elem, item))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            other => Err(mismatch(ty, &other)),
        },
        Type::Map(elem) => match json {
            JsonValue::Object(entries) => {
                let mut out = HashMap::new();
                for (key, item) in entries {
                    out.insert(key, from_plain_json(elem, item)?);
                }
                Ok(Value::map(out))
            }
            other => Err(mismatch(ty, &other)),
        },
        Type::Object(fields) => match json {
            JsonValue::Object(mut entries) => {
                let mut out = HashMap::new();
                for field in fields {
                    let item = entries.remove(&field.name).unwrap_or(JsonValue::Null);
                    out.insert(field.name.clone(), from_plain_json(&field.ty, item)?);
                }
                Ok(Value::object(out))
            }
            other => Err(mismatch(ty, &other)),
        },
        Type::Tuple(elems) => match json {
            JsonValue::Array(items) if items.len() == elems.len() => Ok(Value::tuple(
                elems
                    .iter()
                    .zip(items)
                    .map(|(elem_ty, item)| from_plain_json(elem_ty, item))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            other => Err(mismatch(ty, &other)),
        },
        Type::Dynamic => infer_from_json(json),
    }
}

fn infer_from_json(json: JsonValue) -> Result<Value, ValueJsonError> {
    match json {
        JsonValue::Null => Ok(Value::null(Type::Dynamic)),
        JsonValue::Bool(b) => Ok(Value::bool(b)),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Value::number)
            .ok_or_else(|| ValueJsonError::BadNumber(n.to_string())),
        JsonValue::String(s) => Ok(Value::string(s)),
        JsonValue::Array(items) => Ok(Value::list(
            items
                .into_iter()
                .map(infer_from_json)
                .collect::<Result<Vec<_>, _>>()?,
        )),
        JsonValue::Object(entries) => {
            let mut out = HashMap::new();
            for (key, item) in entries {
                out.insert(key, infer_from_json(item)?);
            }
            Ok(Value::map(out))
        }
    }
}

fn mismatch(expected: &Type, found: &JsonValue) -> ValueJsonError {
    ValueJsonError::TypeMismatch {
        expected: expected.clone(),
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marks::Mark;

    #[test]
    fn round_trips_scalars() {
        let v = from_plain_json(&Type::Number, json!(42.0)).expect("number");
        assert_eq!(v.as_number(), Some(42.0));
        assert_eq!(to_plain_json(&v).expect("json"), json!(42.0));
    }

    #[test]
    fn round_trips_nested_collections() {
        let ty = Type::List(Box::new(Type::String));
        let v = from_plain_json(&ty, json!(["a", "b"])).expect("list");
        assert_eq!(v.index(1).and_then(Value::as_str), Some("b"));
        assert_eq!(to_plain_json(&v).expect("json"), json!(["a", "b"]));
    }

    #[test]
    fn dynamic_infers_shape() {
        let v = from_plain_json(&Type::Dynamic, json!({ "a": true })).expect("map");
        assert_eq!(v.get_attr("a").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn null_json_becomes_typed_null() {
        let v = from_plain_json(&Type::String, JsonValue::Null).expect("null");
        assert!(v.is_null());
        assert_eq!(v.type_of(), Type::String);
    }

    #[test]
    fn unknown_has_no_plain_form() {
        let err = to_plain_json(&Value::dynamic()).expect_err("should fail");
        assert!(matches!(err, ValueJsonError::UnknownValue));
    }

    #[test]
    fn marks_do_not_leak_into_json() {
        let v = Value::list(vec![Value::number(1.0)]).mark(Mark::Sensitive);
        assert_eq!(to_plain_json(&v).expect("json"), json!([1.0]));
    }

    #[test]
    fn mismatched_json_reports_expected_type() {
        let err = from_plain_json(&Type::Bool, json!("nope")).expect_err("should fail");
        assert!(matches!(err, ValueJsonError::TypeMismatch { .. }));
    }
}
