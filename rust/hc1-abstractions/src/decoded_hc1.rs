// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Decoded HC1 types: the unwrapped COSE_Sign1 envelope and the CWT claims it carries.

use crate::value::CborValue;

/// Literal prefix every HC1 token starts with.
pub const HC1_PREFIX: &str = "HC1:";

/// Standard CBOR tag number used for COSE_Sign1.
pub const COSE_SIGN1_TAG: u64 = 18;

/// COSE header label `alg`.
pub const COSE_HEADER_ALG: i128 = 1;
/// COSE header label `kid`.
pub const COSE_HEADER_KID: i128 = 4;

pub const CWT_CLAIM_ISSUER: i128 = 1;
pub const CWT_CLAIM_EXPIRES_AT: i128 = 4;
pub const CWT_CLAIM_ISSUED_AT: i128 = 6;
/// CWT claim holding the health certificate container.
pub const CWT_CLAIM_HCERT: i128 = -260;
/// Key of the HCERT payload inside the `-260` container.
pub const HCERT_V1: i128 = 1;

/// A COSE_Sign1 structure after tag removal and nested header/payload decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct CoseSign1Envelope {
    /// Decoded protected header map; empty when the bstr was empty.
    pub protected: CborValue,
    /// Unprotected headers exactly as they appeared in the outer array.
    pub unprotected: CborValue,
    /// Decoded CWT claim set; empty when the payload bstr was empty.
    pub payload: CborValue,
    /// Raw signature bytes. Never verified.
    pub signature: Vec<u8>,
}

/// Key identifier from COSE header label 4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyId {
    Bytes(Vec<u8>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CwtClaims {
    /// `iss` (label 1), when present as text.
    pub issuer: Option<String>,
    /// `exp` (label 4), seconds since the epoch, when present as an integer.
    pub expires_at: Option<i64>,
    /// `iat` (label 6), seconds since the epoch, when present as an integer.
    pub issued_at: Option<i64>,
    /// The HCERT payload at `-260 -> 1`; `None` when the token omits it.
    pub hcert: Option<CborValue>,
    /// The full claim set.
    pub claims: CborValue,
}

/// Everything extracted from one HC1 token, before JSON projection.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedHc1 {
    pub envelope: CoseSign1Envelope,
    /// Protected-header `alg` (label 1), when present as an integer.
    pub alg: Option<i64>,
    pub kid: Option<KeyId>,
    pub claims: CwtClaims,
}
