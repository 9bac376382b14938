// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Generic CBOR (RFC 8949) decoding into [`CborValue`].
//!
//! The input must hold exactly one data item. Definite and indefinite lengths
//! are both accepted. Nesting of arrays, maps and tags is bounded by the caller's
//! depth ceiling so hostile input fails instead of exhausting the stack.

use std::collections::BTreeMap;

use hc1_abstractions::{CborValue, DecodeStage, Hc1Error, MapKey};
use minicbor::data::Type;
use minicbor::Decoder;
use tracing::instrument;

fn cbor_err<E: std::fmt::Display>(e: E) -> Hc1Error {
    Hc1Error::format(DecodeStage::Cbor, format!("invalid CBOR: {e}"))
}

/// Decode a single CBOR data item, rejecting trailing bytes.
#[instrument(level = "debug", skip_all, fields(input_len = input.len()))]
pub(crate) fn decode_cbor(input: &[u8], max_depth: usize) -> Result<CborValue, Hc1Error> {
    if input.is_empty() {
        return Err(Hc1Error::format(DecodeStage::Cbor, "empty CBOR input"));
    }

    let mut dec = Decoder::new(input);
    let value = decode_value(&mut dec, 0, max_depth)?;

    if dec.position() != input.len() {
        return Err(Hc1Error::format(
            DecodeStage::Cbor,
            format!("trailing bytes after CBOR item ({} unread)", input.len() - dec.position()),
        ));
    }

    Ok(value)
}

fn enter(depth: usize, max_depth: usize) -> Result<usize, Hc1Error> {
    let next = depth + 1;
    if next > max_depth {
        return Err(Hc1Error::resource_limit(
            DecodeStage::Cbor,
            format!("nesting depth exceeds {max_depth}"),
        ));
    }
    Ok(next)
}

/// Consumes a `break` stop code if it is next, returning whether it was found.
fn take_break(dec: &mut Decoder<'_>) -> Result<bool, Hc1Error> {
    if dec.datatype().map_err(cbor_err)? == Type::Break {
        dec.set_position(dec.position() + 1);
        return Ok(true);
    }
    Ok(false)
}

fn decode_value(dec: &mut Decoder<'_>, depth: usize, max_depth: usize) -> Result<CborValue, Hc1Error> {
    match dec.datatype().map_err(cbor_err)? {
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::I8
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Int => {
            let i = dec.int().map_err(cbor_err)?;
            Ok(CborValue::Integer(i128::from(i)))
        }
        Type::Bytes => Ok(CborValue::Bytes(dec.bytes().map_err(cbor_err)?.to_vec())),
        Type::BytesIndef => {
            let mut out = Vec::new();
            for chunk in dec.bytes_iter().map_err(cbor_err)? {
                out.extend_from_slice(chunk.map_err(cbor_err)?);
            }
            Ok(CborValue::Bytes(out))
        }
        Type::String => Ok(CborValue::Text(dec.str().map_err(cbor_err)?.to_string())),
        Type::StringIndef => {
            let mut out = String::new();
            for chunk in dec.str_iter().map_err(cbor_err)? {
                out.push_str(chunk.map_err(cbor_err)?);
            }
            Ok(CborValue::Text(out))
        }
        Type::Bool => Ok(CborValue::Bool(dec.bool().map_err(cbor_err)?)),
        Type::Null => {
            dec.null().map_err(cbor_err)?;
            Ok(CborValue::Null)
        }
        Type::Undefined => {
            dec.undefined().map_err(cbor_err)?;
            Ok(CborValue::Undefined)
        }
        Type::Simple => Ok(CborValue::Simple(dec.simple().map_err(cbor_err)?)),
        Type::F16 => Ok(CborValue::Float(f64::from(dec.f16().map_err(cbor_err)?))),
        Type::F32 => Ok(CborValue::Float(f64::from(dec.f32().map_err(cbor_err)?))),
        Type::F64 => Ok(CborValue::Float(dec.f64().map_err(cbor_err)?)),
        Type::Array | Type::ArrayIndef => {
            let depth = enter(depth, max_depth)?;
            let len = dec.array().map_err(cbor_err)?;
            let mut out = Vec::new();
            match len {
                Some(n) => {
                    for _ in 0..n {
                        out.push(decode_value(dec, depth, max_depth)?);
                    }
                }
                None => {
                    while !take_break(dec)? {
                        out.push(decode_value(dec, depth, max_depth)?);
                    }
                }
            }
            Ok(CborValue::Array(out))
        }
        Type::Map | Type::MapIndef => {
            let depth = enter(depth, max_depth)?;
            let len = dec.map().map_err(cbor_err)?;
            let mut out = BTreeMap::new();
            match len {
                Some(n) => {
                    for _ in 0..n {
                        let key = decode_key(dec, depth, max_depth)?;
                        let value = decode_value(dec, depth, max_depth)?;
                        out.insert(key, value);
                    }
                }
                None => {
                    while !take_break(dec)? {
                        let key = decode_key(dec, depth, max_depth)?;
                        let value = decode_value(dec, depth, max_depth)?;
                        out.insert(key, value);
                    }
                }
            }
            Ok(CborValue::Map(out))
        }
        Type::Tag => {
            let depth = enter(depth, max_depth)?;
            let tag = dec.tag().map_err(cbor_err)?;
            let inner = decode_value(dec, depth, max_depth)?;
            Ok(CborValue::Tagged(tag.as_u64(), Box::new(inner)))
        }
        other => Err(Hc1Error::format(
            DecodeStage::Cbor,
            format!("unsupported CBOR item: {other:?}"),
        )),
    }
}

/// Any well-formed item may be a key; it is decoded like a value and converted.
fn decode_key(dec: &mut Decoder<'_>, depth: usize, max_depth: usize) -> Result<MapKey, Hc1Error> {
    decode_value(dec, depth, max_depth).map(MapKey::from)
}
