// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Projection of decoded CBOR values into JSON.
//!
//! - byte strings become `{"_b64": <base64url, no padding>}`
//! - tagged items become `{"_tag": <n>, "_value": <projection>}`
//! - map keys are stringified (see [`key_to_string`])
//! - integers outside the i64/u64 range become decimal text
//! - `undefined` and non-finite floats become `null`
//!
//! The projection is total. Lifting its output back with [`json_to_value`] and
//! projecting again yields the same JSON.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hc1_abstractions::{CborValue, MapKey};
use serde_json::{Map, Number, Value};

pub(crate) const B64_KEY: &str = "_b64";
pub(crate) const TAG_KEY: &str = "_tag";
pub(crate) const TAG_VALUE_KEY: &str = "_value";

pub(crate) fn to_json_safe(value: &CborValue) -> Value {
    match value {
        CborValue::Integer(i) => integer_to_json(*i),
        CborValue::Bytes(b) => bytes_to_json(b),
        CborValue::Text(s) => Value::String(s.clone()),
        CborValue::Bool(b) => Value::Bool(*b),
        CborValue::Null | CborValue::Undefined => Value::Null,
        CborValue::Simple(n) => Value::from(*n),
        CborValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        CborValue::Array(items) => Value::Array(items.iter().map(to_json_safe).collect()),
        CborValue::Map(entries) => {
            let mut out = Map::new();
            for (k, v) in entries {
                let key = key_to_string(k);
                // Entries are visited in key order, so the later key in that order wins.
                if out.contains_key(&key) {
                    tracing::warn!(key = %key, "map keys collide after stringification; keeping the later entry");
                }
                out.insert(key, to_json_safe(v));
            }
            Value::Object(out)
        }
        CborValue::Tagged(tag, inner) => {
            let mut out = Map::new();
            out.insert(TAG_KEY.to_string(), Value::from(*tag));
            out.insert(TAG_VALUE_KEY.to_string(), to_json_safe(inner));
            Value::Object(out)
        }
    }
}

fn bytes_to_json(b: &[u8]) -> Value {
    let mut out = Map::new();
    out.insert(B64_KEY.to_string(), Value::String(URL_SAFE_NO_PAD.encode(b)));
    Value::Object(out)
}

fn integer_to_json(i: i128) -> Value {
    if let Ok(n) = i64::try_from(i) {
        Value::from(n)
    } else if let Ok(n) = u64::try_from(i) {
        Value::from(n)
    } else {
        Value::String(i.to_string())
    }
}

/// JSON object key for a CBOR map key.
///
/// Scalars render as their JSON literal text (`1`, `true`, `null`, `1.5`), with
/// `NaN`/`Infinity` spelled out. Byte strings use base64url, and arrays, maps
/// and tags use the compact JSON text of their projection.
fn key_to_string(key: &MapKey) -> String {
    match key {
        MapKey::Int(i) => i.to_string(),
        MapKey::Text(s) => s.clone(),
        MapKey::Bytes(b) => URL_SAFE_NO_PAD.encode(b),
        MapKey::Bool(b) => b.to_string(),
        MapKey::Null => "null".to_string(),
        MapKey::Undefined => "undefined".to_string(),
        MapKey::Simple(n) => format!("simple({n})"),
        MapKey::Float(f) => float_key_to_string(f.value()),
        MapKey::Array(_) | MapKey::Map(_) | MapKey::Tagged(..) => {
            to_json_safe(&CborValue::from(key.clone())).to_string()
        }
    }
}

fn float_key_to_string(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f64::INFINITY {
        "Infinity".to_string()
    } else if f == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        Number::from_f64(f).map(|n| n.to_string()).unwrap_or_default()
    }
}

/// Lift a JSON tree into the value model, treating every object key as text.
///
/// No `_b64`/`_tag` wrapper is decoded back into bytes or tags; wrappers stay
/// plain maps so that projecting the result reproduces the input.
pub(crate) fn json_to_value(json: &Value) -> CborValue {
    match json {
        Value::Null => CborValue::Null,
        Value::Bool(b) => CborValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CborValue::Integer(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                CborValue::Integer(i128::from(u))
            } else {
                CborValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => CborValue::Text(s.clone()),
        Value::Array(items) => CborValue::Array(items.iter().map(json_to_value).collect()),
        Value::Object(entries) => CborValue::Map(
            entries
                .iter()
                .map(|(k, v)| (MapKey::Text(k.clone()), json_to_value(v)))
                .collect(),
        ),
    }
}
