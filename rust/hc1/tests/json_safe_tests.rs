// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JSON projection: byte-string wrapping, key stringification, totality and idempotence.

use std::collections::BTreeMap;

use hc1::{decode_cbor, json_to_value, to_json_safe, CborValue, FloatKey, MapKey};
use proptest::prelude::*;
use serde_json::json;

fn map(entries: Vec<(MapKey, CborValue)>) -> CborValue {
    CborValue::Map(entries.into_iter().collect::<BTreeMap<_, _>>())
}

/// True when the tree holds nothing but JSON-native values.
fn only_json_leaves(v: &serde_json::Value) -> bool {
    match v {
        serde_json::Value::Number(n) => n.as_f64().map_or(true, f64::is_finite),
        serde_json::Value::Array(items) => items.iter().all(only_json_leaves),
        serde_json::Value::Object(m) => m.values().all(only_json_leaves),
        _ => true,
    }
}

#[test]
fn wraps_byte_strings_as_unpadded_base64url() {
    assert_eq!(to_json_safe(&CborValue::Bytes(vec![0xfb, 0xff])), json!({"_b64": "-_8"}));
    assert_eq!(to_json_safe(&CborValue::Bytes(vec![])), json!({"_b64": ""}));
}

#[test]
fn stringifies_map_keys() {
    let v = map(vec![
        (MapKey::Int(-260), map(vec![(MapKey::Int(1), CborValue::Text("x".into()))])),
        (MapKey::Int(4), CborValue::Integer(1_735_689_600)),
        (MapKey::Text("ver".into()), CborValue::Text("1.3.0".into())),
        (MapKey::Bool(true), CborValue::Null),
        (MapKey::Bytes(vec![0xff]), CborValue::Bool(false)),
    ]);
    assert_eq!(
        to_json_safe(&v),
        json!({
            "-260": {"1": "x"},
            "4": 1_735_689_600,
            "ver": "1.3.0",
            "true": null,
            "_w": false,
        })
    );
}

#[test]
fn stringifies_non_label_scalar_keys() {
    let v = map(vec![
        (MapKey::Null, CborValue::Integer(1)),
        (MapKey::Undefined, CborValue::Integer(2)),
        (MapKey::Simple(16), CborValue::Integer(3)),
        (MapKey::Float(FloatKey(1.5)), CborValue::Integer(4)),
        (MapKey::Float(FloatKey(1.0)), CborValue::Integer(5)),
        (MapKey::Float(FloatKey(f64::NAN)), CborValue::Integer(6)),
        (MapKey::Float(FloatKey(f64::NEG_INFINITY)), CborValue::Integer(7)),
    ]);
    assert_eq!(
        to_json_safe(&v),
        json!({
            "null": 1,
            "undefined": 2,
            "simple(16)": 3,
            "1.5": 4,
            "1.0": 5,
            "NaN": 6,
            "-Infinity": 7,
        })
    );
}

#[test]
fn stringifies_composite_keys_as_compact_json() {
    let v = map(vec![
        (MapKey::Array(vec![MapKey::Int(1), MapKey::Bytes(vec![0xff])]), CborValue::Integer(1)),
        (MapKey::Map(vec![(MapKey::Int(1), MapKey::Null)]), CborValue::Integer(2)),
        (MapKey::Tagged(1, Box::new(MapKey::Int(0))), CborValue::Integer(3)),
    ]);
    assert_eq!(
        to_json_safe(&v),
        json!({
            r#"[1,{"_b64":"_w"}]"#: 1,
            r#"{"1":null}"#: 2,
            r#"{"_tag":1,"_value":0}"#: 3,
        })
    );
}

#[test]
fn decoded_null_and_float_keys_project() {
    // {null: 1, 1.5: 2}
    let v = decode_cbor(&[0xa2, 0xf6, 0x01, 0xfb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0, 0x02], 64).unwrap();
    assert_eq!(to_json_safe(&v), json!({"null": 1, "1.5": 2}));
}

#[test]
fn colliding_keys_keep_the_later_entry() {
    // Integers order before text, so the text key wins.
    let v = map(vec![
        (MapKey::Int(1), CborValue::Text("int".into())),
        (MapKey::Text("1".into()), CborValue::Text("text".into())),
    ]);
    assert_eq!(to_json_safe(&v), json!({"1": "text"}));

    // Byte strings order after text, so the byte-string key wins.
    let v = map(vec![
        (MapKey::Text("_w".into()), CborValue::Text("text".into())),
        (MapKey::Bytes(vec![0xff]), CborValue::Text("bytes".into())),
    ]);
    assert_eq!(to_json_safe(&v), json!({"_w": "bytes"}));
}

#[test]
fn maps_sequences_element_wise() {
    let v = CborValue::Array(vec![CborValue::Integer(1), CborValue::Bytes(b"a".to_vec()), CborValue::Array(vec![])]);
    assert_eq!(to_json_safe(&v), json!([1, {"_b64": "YQ"}, []]));
}

#[test]
fn projects_non_json_scalars() {
    assert_eq!(to_json_safe(&CborValue::Undefined), json!(null));
    assert_eq!(to_json_safe(&CborValue::Simple(16)), json!(16));
    assert_eq!(to_json_safe(&CborValue::Float(f64::NAN)), json!(null));
    assert_eq!(to_json_safe(&CborValue::Float(f64::INFINITY)), json!(null));
    assert_eq!(to_json_safe(&CborValue::Float(2.5)), json!(2.5));
    assert_eq!(to_json_safe(&CborValue::Integer(u64::MAX as i128)), json!(u64::MAX));
    assert_eq!(
        to_json_safe(&CborValue::Integer(-(1i128 << 64))),
        json!("-18446744073709551616")
    );
}

#[test]
fn projects_tags_as_wrappers() {
    let v = CborValue::Tagged(
        1004,
        Box::new(CborValue::Tagged(24, Box::new(CborValue::Bytes(vec![0xa0])))),
    );
    assert_eq!(
        to_json_safe(&v),
        json!({"_tag": 1004, "_value": {"_tag": 24, "_value": {"_b64": "oA"}}})
    );
}

#[test]
fn reprojecting_safe_output_is_a_no_op() {
    let v = map(vec![
        (MapKey::Int(1), CborValue::Bytes(vec![1, 2, 3])),
        (MapKey::Int(-260), CborValue::Tagged(18, Box::new(CborValue::Array(vec![CborValue::Float(0.5)])))),
    ]);
    let once = to_json_safe(&v);
    let twice = to_json_safe(&json_to_value(&once));
    assert_eq!(once, twice);
}

fn arb_key() -> impl Strategy<Value = MapKey> {
    prop_oneof![
        any::<i64>().prop_map(|i| MapKey::Int(i128::from(i))),
        "[a-z]{0,6}".prop_map(MapKey::Text),
        proptest::collection::vec(any::<u8>(), 0..6).prop_map(MapKey::Bytes),
        any::<bool>().prop_map(MapKey::Bool),
        Just(MapKey::Null),
        any::<u8>().prop_map(MapKey::Simple),
        any::<f64>().prop_map(|f| MapKey::Float(FloatKey(f))),
    ]
}

fn arb_value() -> impl Strategy<Value = CborValue> {
    let leaf = prop_oneof![
        (-(1i128 << 64)..(1i128 << 64)).prop_map(CborValue::Integer),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(CborValue::Bytes),
        ".{0,8}".prop_map(CborValue::Text),
        any::<bool>().prop_map(CborValue::Bool),
        Just(CborValue::Null),
        Just(CborValue::Undefined),
        any::<u8>().prop_map(CborValue::Simple),
        any::<f64>().prop_map(CborValue::Float),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(CborValue::Array),
            proptest::collection::btree_map(arb_key(), inner.clone(), 0..8).prop_map(CborValue::Map),
            (any::<u64>(), inner).prop_map(|(t, v)| CborValue::Tagged(t, Box::new(v))),
        ]
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: the projection is total and produces only JSON-representable leaves.
    #[test]
    fn prop_projection_is_total(v in arb_value()) {
        let json = to_json_safe(&v);
        prop_assert!(only_json_leaves(&json));
        prop_assert!(serde_json::to_string(&json).is_ok());
    }

    /// Property: projecting already-safe output again changes nothing.
    #[test]
    fn prop_projection_is_idempotent(v in arb_value()) {
        let once = to_json_safe(&v);
        let twice = to_json_safe(&json_to_value(&once));
        prop_assert_eq!(once, twice);
    }
}
