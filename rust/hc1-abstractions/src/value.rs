// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generic decoded CBOR value model.
//!
//! Every stage after CBOR decoding consumes these types. The model covers all
//! CBOR major types, and any well-formed item may be used as a map key (see
//! [`MapKey`]).

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Map key. Mirrors [`CborValue`] with a total order so that any CBOR item can
/// be used as a key in a `BTreeMap`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MapKey {
    /// Integer label (COSE header labels and CWT claim keys).
    Int(i128),
    /// Text label (HCERT field names).
    Text(String),
    Bytes(Vec<u8>),
    Bool(bool),
    Null,
    Undefined,
    Simple(u8),
    Float(FloatKey),
    Array(Vec<MapKey>),
    /// Map used as a key; entries are kept in key order.
    Map(Vec<(MapKey, MapKey)>),
    Tagged(u64, Box<MapKey>),
}

/// Floating point map key, ordered by [`f64::total_cmp`].
///
/// Equality is bitwise, so `0.0` and `-0.0` are distinct keys and NaN keys
/// compare equal to themselves.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(pub f64);

impl FloatKey {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CborValue {
    /// Any CBOR integer. `i128` holds the full range of major types 0 and 1.
    Integer(i128),
    Bytes(Vec<u8>),
    Text(String),
    Bool(bool),
    Null,
    Undefined,
    /// Simple value other than false/true/null/undefined.
    Simple(u8),
    Float(f64),
    Array(Vec<CborValue>),
    Map(BTreeMap<MapKey, CborValue>),
    /// Semantic tag number and the wrapped item.
    Tagged(u64, Box<CborValue>),
}

impl CborValue {
    /// An empty map, the value used for absent protected headers and payloads.
    pub fn empty_map() -> Self {
        CborValue::Map(BTreeMap::new())
    }

    pub fn as_map(&self) -> Option<&BTreeMap<MapKey, CborValue>> {
        match self {
            CborValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CborValue::Integer(i) => i64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Looks up an integer key when `self` is a map.
    pub fn get(&self, key: i128) -> Option<&CborValue> {
        self.as_map().and_then(|m| m.get(&MapKey::Int(key)))
    }

    /// Strips any number of semantic tags and returns the innermost item.
    pub fn unwrap_tags(self) -> CborValue {
        let mut current = self;
        while let CborValue::Tagged(_, inner) = current {
            current = *inner;
        }
        current
    }
}

impl From<CborValue> for MapKey {
    fn from(value: CborValue) -> Self {
        match value {
            CborValue::Integer(i) => MapKey::Int(i),
            CborValue::Bytes(b) => MapKey::Bytes(b),
            CborValue::Text(s) => MapKey::Text(s),
            CborValue::Bool(b) => MapKey::Bool(b),
            CborValue::Null => MapKey::Null,
            CborValue::Undefined => MapKey::Undefined,
            CborValue::Simple(n) => MapKey::Simple(n),
            CborValue::Float(f) => MapKey::Float(FloatKey(f)),
            CborValue::Array(items) => MapKey::Array(items.into_iter().map(MapKey::from).collect()),
            CborValue::Map(entries) => MapKey::Map(entries.into_iter().map(|(k, v)| (k, MapKey::from(v))).collect()),
            CborValue::Tagged(tag, inner) => MapKey::Tagged(tag, Box::new(MapKey::from(*inner))),
        }
    }
}

impl From<MapKey> for CborValue {
    fn from(key: MapKey) -> Self {
        match key {
            MapKey::Int(i) => CborValue::Integer(i),
            MapKey::Text(s) => CborValue::Text(s),
            MapKey::Bytes(b) => CborValue::Bytes(b),
            MapKey::Bool(b) => CborValue::Bool(b),
            MapKey::Null => CborValue::Null,
            MapKey::Undefined => CborValue::Undefined,
            MapKey::Simple(n) => CborValue::Simple(n),
            MapKey::Float(f) => CborValue::Float(f.value()),
            MapKey::Array(items) => CborValue::Array(items.into_iter().map(CborValue::from).collect()),
            MapKey::Map(entries) => CborValue::Map(entries.into_iter().map(|(k, v)| (k, CborValue::from(v))).collect()),
            MapKey::Tagged(tag, inner) => CborValue::Tagged(tag, Box::new(CborValue::from(*inner))),
        }
    }
}
