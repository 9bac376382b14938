// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! HC1 health certificate token decoder.
//!
//! Reverses the four nested encodings of an `HC1:` token:
//!
//! ```text
//! "HC1:" + base45( zlib( COSE_Sign1 [ protected, unprotected, payload(CWT), signature ] ) )
//! ```
//!
//! and surfaces the headers, the CWT claim set and the embedded HCERT payload as
//! a JSON-representable document. Signatures are carried through but never
//! verified.
//!
//! The pipeline is synchronous and stateless; every call is independent and may
//! run concurrently with others.

// Pipeline stages.
mod base45;
mod cbor;
mod cose_sign1;
mod cwt;
mod json_safe;
mod token;
mod zlib;

mod api;

pub use hc1_abstractions::{
    CborValue, CoseSection, CoseSign1Envelope, CwtClaims, DecodeOptions, DecodeStage, DecodedHc1, FloatKey, Hc1Document,
    Hc1Error, KeyId, MapKey, COSE_SIGN1_TAG, CWT_CLAIM_HCERT, HC1_PREFIX, HCERT_V1,
};

pub use api::{
    base45_decode,
    base45_encode,
    decode_cbor,
    decode_hc1,
    decode_hc1_with_options,
    extract_cwt_claims,
    extract_kid,
    inflate,
    json_to_value,
    kid_b64,
    parse_hc1,
    strip_hc1_prefix,
    to_document,
    to_json_safe,
    unwrap_cose_sign1,
};
