// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared interfaces and datatypes for the HC1 Rust crates.
//!
//! This crate holds the types that flow between pipeline stages and out to
//! callers:
//! - the generic decoded CBOR value model
//! - the error taxonomy and decode options
//! - the decoded COSE_Sign1 envelope and CWT claims
//! - the JSON-representable output document
//!
//! It has no decoding logic of its own; see the `hc1` crate for that.

pub mod decoded_hc1;
pub mod document;
pub mod error;
pub mod options;
pub mod value;

pub use decoded_hc1::{
    CoseSign1Envelope, CwtClaims, DecodedHc1, KeyId, COSE_HEADER_ALG, COSE_HEADER_KID, COSE_SIGN1_TAG,
    CWT_CLAIM_EXPIRES_AT, CWT_CLAIM_HCERT, CWT_CLAIM_ISSUED_AT, CWT_CLAIM_ISSUER, HC1_PREFIX, HCERT_V1,
};
pub use document::{CoseSection, Hc1Document};
pub use error::{DecodeStage, Hc1Error};
pub use options::{DecodeOptions, DEFAULT_MAX_DECOMPRESSED_LEN, DEFAULT_MAX_NESTING_DEPTH};
pub use value::{CborValue, FloatKey, MapKey};
