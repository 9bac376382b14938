// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use hc1_abstractions::{
    CborValue, CoseSection, CoseSign1Envelope, CwtClaims, DecodeOptions, DecodedHc1, Hc1Document, Hc1Error, KeyId,
};
use tracing::instrument;

use crate::{base45, cbor, cose_sign1, cwt, json_safe, token, zlib};

/// Decode an `HC1:` token into its JSON-representable document using default options.
pub fn decode_hc1(token: &str) -> Result<Hc1Document, Hc1Error> {
    decode_hc1_with_options(token, &DecodeOptions::default())
}

/// Decode an `HC1:` token into its JSON-representable document.
pub fn decode_hc1_with_options(token: &str, options: &DecodeOptions) -> Result<Hc1Document, Hc1Error> {
    parse_hc1(token, options).map(|decoded| to_document(&decoded))
}

/// Run the full pipeline and return the typed result, before JSON projection.
#[instrument(level = "debug", skip_all, fields(token_len = token.len()))]
pub fn parse_hc1(token: &str, options: &DecodeOptions) -> Result<DecodedHc1, Hc1Error> {
    let text = token::strip_hc1_prefix(token)?;
    let compressed = base45::decode(text)?;
    let cose_cbor = zlib::inflate(&compressed, options.max_decompressed_len)?;
    let cose = cbor::decode_cbor(&cose_cbor, options.max_nesting_depth)?;
    let envelope = cose_sign1::unwrap_cose_sign1(cose, options.max_nesting_depth)?;

    let kid = cwt::extract_kid(&envelope);
    let alg = cwt::extract_alg(&envelope);
    let claims = cwt::extract_cwt_claims(&envelope.payload);

    tracing::debug!(
        alg = ?alg,
        has_kid = kid.is_some(),
        has_hcert = claims.hcert.is_some(),
        "decoded HC1 token"
    );

    Ok(DecodedHc1 {
        envelope,
        alg,
        kid,
        claims,
    })
}

/// Project a decoded token into the output document.
pub fn to_document(decoded: &DecodedHc1) -> Hc1Document {
    let envelope = &decoded.envelope;
    Hc1Document {
        cose: CoseSection {
            protected: json_safe::to_json_safe(&envelope.protected),
            unprotected: json_safe::to_json_safe(&envelope.unprotected),
            kid_b64: decoded.kid.as_ref().map(cwt::kid_b64),
            signature: json_safe::to_json_safe(&CborValue::Bytes(envelope.signature.clone())),
        },
        payload: json_safe::to_json_safe(&decoded.claims.claims),
        hcert: decoded.claims.hcert.as_ref().map(json_safe::to_json_safe),
    }
}

/// Strip the `HC1:` prefix.
pub fn strip_hc1_prefix(token: &str) -> Result<&str, Hc1Error> {
    token::strip_hc1_prefix(token)
}

/// Decode base45 text into bytes.
pub fn base45_decode(input: &str) -> Result<Vec<u8>, Hc1Error> {
    base45::decode(input)
}

/// Encode bytes as base45 text.
pub fn base45_encode(input: &[u8]) -> String {
    base45::encode(input)
}

/// Inflate a zlib stream, failing with `ResourceLimit` once the output exceeds `max_len`.
///
/// With `max_len == None` no ceiling is applied and bounding memory is the caller's job.
pub fn inflate(input: &[u8], max_len: Option<usize>) -> Result<Vec<u8>, Hc1Error> {
    zlib::inflate(input, max_len)
}

/// Decode exactly one CBOR data item.
pub fn decode_cbor(input: &[u8], max_depth: usize) -> Result<CborValue, Hc1Error> {
    cbor::decode_cbor(input, max_depth)
}

/// Interpret a decoded value as COSE_Sign1.
pub fn unwrap_cose_sign1(value: CborValue, max_depth: usize) -> Result<CoseSign1Envelope, Hc1Error> {
    cose_sign1::unwrap_cose_sign1(value, max_depth)
}

pub fn extract_cwt_claims(claims: &CborValue) -> CwtClaims {
    cwt::extract_cwt_claims(claims)
}

pub fn extract_kid(envelope: &CoseSign1Envelope) -> Option<KeyId> {
    cwt::extract_kid(envelope)
}

pub fn kid_b64(kid: &KeyId) -> String {
    cwt::kid_b64(kid)
}

pub fn to_json_safe(value: &CborValue) -> serde_json::Value {
    json_safe::to_json_safe(value)
}

pub fn json_to_value(json: &serde_json::Value) -> CborValue {
    json_safe::json_to_value(json)
}
