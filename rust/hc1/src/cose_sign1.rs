// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 envelope unwrapping.
//!
//! COSE_Sign1 is defined in RFC 9052:
//!
//! ```text
//! COSE_Sign1 = [ protected : bstr,
//!               unprotected : map,
//!               payload : bstr / null,
//!               signature : bstr ]
//! ```
//!
//! The envelope arrives as an already decoded [`CborValue`]. Any semantic tags
//! around it (normally tag 18) are stripped. The protected header and payload
//! byte strings each hold a nested CBOR map and are decoded here; the signature
//! is kept as raw bytes.

use hc1_abstractions::{CborValue, CoseSign1Envelope, DecodeStage, Hc1Error, COSE_SIGN1_TAG};
use tracing::instrument;

use crate::cbor::decode_cbor;

const NOT_SIGN1: &str = "not a valid COSE_Sign1 structure";

fn cose_err(message: impl Into<String>) -> Hc1Error {
    Hc1Error::format(DecodeStage::CoseSign1, message)
}

#[instrument(level = "debug", skip_all)]
pub(crate) fn unwrap_cose_sign1(value: CborValue, max_depth: usize) -> Result<CoseSign1Envelope, Hc1Error> {
    if let CborValue::Tagged(tag, _) = &value {
        if *tag != COSE_SIGN1_TAG {
            tracing::debug!(tag = *tag, "outer tag is not COSE_Sign1; stripping it");
        }
    }

    let items = match value.unwrap_tags() {
        CborValue::Array(items) if items.len() == 4 => items,
        _ => return Err(cose_err(NOT_SIGN1)),
    };

    let mut items = items.into_iter();
    let (Some(protected), Some(unprotected), Some(payload), Some(signature)) =
        (items.next(), items.next(), items.next(), items.next())
    else {
        return Err(cose_err(NOT_SIGN1));
    };

    let protected = decode_embedded_map(protected, "protected header", max_depth)?;

    // Unprotected headers are passed through untouched; only a map is useful to callers.
    if !matches!(unprotected, CborValue::Map(_)) {
        tracing::warn!("COSE_Sign1 unprotected header is not a map; passing it through");
    }

    let payload = decode_embedded_map(payload, "payload", max_depth)?;

    let signature = match signature {
        CborValue::Bytes(b) => b,
        _ => return Err(cose_err("signature is not a byte string")),
    };

    Ok(CoseSign1Envelope {
        protected,
        unprotected,
        payload,
        signature,
    })
}

/// Decode a bstr-wrapped CBOR map. An empty bstr (or `null`) means an empty map.
fn decode_embedded_map(item: CborValue, what: &str, max_depth: usize) -> Result<CborValue, Hc1Error> {
    let bytes = match item {
        CborValue::Null => return Ok(CborValue::empty_map()),
        CborValue::Bytes(b) if b.is_empty() => return Ok(CborValue::empty_map()),
        CborValue::Bytes(b) => b,
        _ => return Err(cose_err(format!("{what} is not a byte string"))),
    };

    match decode_cbor(&bytes, max_depth)? {
        map @ CborValue::Map(_) => Ok(map),
        _ => Err(cose_err(format!("{what} is not a CBOR map"))),
    }
}
