// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `hc1` integration tests.
//!
//! Synthetic COSE_Sign1 messages are built with `minicbor::Encoder`, compressed
//! with `flate2` and base45-encoded with the crate's own encoder, so each test
//! can drive the whole pipeline from a token string.

#![allow(dead_code)]

use std::io::Write as _;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use minicbor::data::Tag;
use minicbor::Encoder;

pub(crate) const FIXTURE_TOKEN: &str = include_str!("../fixtures/hc1_vaccination.txt");
pub(crate) const FIXTURE_EXPECTED_JSON: &str = include_str!("../fixtures/hc1_vaccination.json");

pub(crate) fn fixture_token() -> &'static str {
    FIXTURE_TOKEN.trim_end_matches(['\r', '\n'])
}

pub(crate) fn fixture_expected() -> serde_json::Value {
    serde_json::from_str(FIXTURE_EXPECTED_JSON).expect("fixture json")
}

/// `{1: -7}` (alg: ES256), optionally with a byte-string kid (label 4).
pub(crate) fn protected_header(kid: Option<&[u8]>) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf);
    enc.map(if kid.is_some() { 2 } else { 1 }).unwrap();
    enc.i64(1).unwrap();
    enc.i64(-7).unwrap();
    if let Some(kid) = kid {
        enc.i64(4).unwrap();
        enc.bytes(kid).unwrap();
    }
    buf
}

/// A small CWT claim set: `{1: iss, 4: exp, 6: iat, -260: {1: {"ver": "1.3.0", "dob": "1990-01-01"}}}`.
pub(crate) fn cwt_claims(iss: &str, exp: i64, iat: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf);
    enc.map(4).unwrap();
    enc.i64(1).unwrap();
    enc.str(iss).unwrap();
    enc.i64(4).unwrap();
    enc.i64(exp).unwrap();
    enc.i64(6).unwrap();
    enc.i64(iat).unwrap();
    enc.i64(-260).unwrap();
    enc.map(1).unwrap();
    enc.i64(1).unwrap();
    enc.map(2).unwrap();
    enc.str("ver").unwrap();
    enc.str("1.3.0").unwrap();
    enc.str("dob").unwrap();
    enc.str("1990-01-01").unwrap();
    buf
}

/// Minimal set of values the unprotected header map is built from in tests.
#[derive(Clone, Debug)]
pub(crate) enum Unprotected<'a> {
    Empty,
    Kid(&'a [u8]),
    KidText(&'a str),
    /// Encodes an array in place of the map.
    NotAMap,
}

/// Encode `[protected, unprotected, payload, signature]`, optionally wrapped in tag 18.
pub(crate) fn encode_sign1(
    tagged: bool,
    protected: &[u8],
    unprotected: Unprotected<'_>,
    payload: &[u8],
    signature: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    if tagged {
        enc.tag(Tag::new(18)).unwrap();
    }
    enc.array(4).unwrap();
    enc.bytes(protected).unwrap();
    match unprotected {
        Unprotected::Empty => {
            enc.map(0).unwrap();
        }
        Unprotected::Kid(kid) => {
            enc.map(1).unwrap();
            enc.i64(4).unwrap();
            enc.bytes(kid).unwrap();
        }
        Unprotected::KidText(kid) => {
            enc.map(1).unwrap();
            enc.i64(4).unwrap();
            enc.str(kid).unwrap();
        }
        Unprotected::NotAMap => {
            enc.array(1).unwrap();
            enc.u8(7).unwrap();
        }
    }
    enc.bytes(payload).unwrap();
    enc.bytes(signature).unwrap();
    out
}

pub(crate) fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut z = ZlibEncoder::new(Vec::new(), Compression::default());
    z.write_all(data).unwrap();
    z.finish().unwrap()
}

/// `"HC1:" + base45(zlib(cose))`.
pub(crate) fn make_token(cose: &[u8]) -> String {
    format!("HC1:{}", hc1::base45_encode(&zlib_compress(cose)))
}

/// A well-formed tagged COSE_Sign1 carrying `cwt_claims("DE", ..)` and a protected kid.
pub(crate) fn basic_sign1() -> Vec<u8> {
    encode_sign1(
        true,
        &protected_header(Some(&[0xde, 0xad, 0xbe, 0xef])),
        Unprotected::Empty,
        &cwt_claims("DE", 1_700_000_000, 1_690_000_000),
        &[0x5a; 64],
    )
}
