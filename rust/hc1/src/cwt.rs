// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! CWT (RFC 8392) claim and HCERT extraction, plus header lookups (`kid`, `alg`).
//!
//! Absent or wrong-typed claims are reported as `None`; the claim set is not
//! schema-checked.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hc1_abstractions::{
    CborValue, CoseSign1Envelope, CwtClaims, KeyId, COSE_HEADER_ALG, COSE_HEADER_KID, CWT_CLAIM_EXPIRES_AT,
    CWT_CLAIM_HCERT, CWT_CLAIM_ISSUED_AT, CWT_CLAIM_ISSUER, HCERT_V1,
};
use tracing::instrument;

#[instrument(level = "debug", skip_all)]
pub(crate) fn extract_cwt_claims(claims: &CborValue) -> CwtClaims {
    let hcert = claims
        .get(CWT_CLAIM_HCERT)
        .and_then(|container| container.get(HCERT_V1))
        .cloned();

    if hcert.is_none() {
        tracing::debug!("claim set carries no HCERT");
    }

    CwtClaims {
        issuer: claims.get(CWT_CLAIM_ISSUER).and_then(CborValue::as_text).map(str::to_string),
        expires_at: claims.get(CWT_CLAIM_EXPIRES_AT).and_then(CborValue::as_i64),
        issued_at: claims.get(CWT_CLAIM_ISSUED_AT).and_then(CborValue::as_i64),
        hcert,
        claims: claims.clone(),
    }
}

/// Finds the key identifier (label 4), preferring protected over unprotected headers.
///
/// An empty KID counts as absent. Values that are neither bytes nor text are ignored.
pub(crate) fn extract_kid(envelope: &CoseSign1Envelope) -> Option<KeyId> {
    kid_from(&envelope.protected).or_else(|| kid_from(&envelope.unprotected))
}

fn kid_from(headers: &CborValue) -> Option<KeyId> {
    match headers.get(COSE_HEADER_KID)? {
        CborValue::Bytes(b) if !b.is_empty() => Some(KeyId::Bytes(b.clone())),
        CborValue::Text(s) if !s.is_empty() => Some(KeyId::Text(s.clone())),
        _ => None,
    }
}

pub(crate) fn extract_alg(envelope: &CoseSign1Envelope) -> Option<i64> {
    envelope.protected.get(COSE_HEADER_ALG).and_then(CborValue::as_i64)
}

/// Display form of a KID: base64url (no padding) for bytes, unchanged for text.
pub(crate) fn kid_b64(kid: &KeyId) -> String {
    match kid {
        KeyId::Bytes(b) => URL_SAFE_NO_PAD.encode(b),
        KeyId::Text(s) => s.clone(),
    }
}
