// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Base45 text encoding (RFC 9285).
//!
//! Two bytes `[a, b]` form `n = a * 256 + b`, written as three characters
//! `c + d * 45 + e * 45 * 45 = n` in the order `c d e`. A trailing single byte
//! is written as two characters.

use hc1_abstractions::{DecodeStage, Hc1Error};
use tracing::instrument;

const ALPHABET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

fn digit(c: u8) -> Option<u16> {
    ALPHABET.iter().position(|&a| a == c).map(|p| p as u16)
}

fn invalid(message: String) -> Hc1Error {
    Hc1Error::format(DecodeStage::Base45, message)
}

#[instrument(level = "debug", skip_all, fields(input_len = input.len()))]
pub(crate) fn decode(input: &str) -> Result<Vec<u8>, Hc1Error> {
    let digits = input
        .char_indices()
        .map(|(offset, c)| {
            u8::try_from(c)
                .ok()
                .and_then(digit)
                .map(u32::from)
                .ok_or_else(|| invalid(format!("invalid base45 character {c:?} at offset {offset}")))
        })
        .collect::<Result<Vec<u32>, Hc1Error>>()?;

    if digits.len() % 3 == 1 {
        return Err(invalid(format!("invalid base45 length {} (length mod 3 is 1)", digits.len())));
    }

    let mut out = Vec::with_capacity(digits.len() / 3 * 2 + 1);
    for (i, group) in digits.chunks(3).enumerate() {
        match *group {
            [c, d, e] => {
                let n = c + d * 45 + e * 45 * 45;
                if n > 0xFFFF {
                    return Err(invalid(format!("base45 group {i} decodes to {n}, above 0xFFFF")));
                }
                out.push((n >> 8) as u8);
                out.push((n & 0xFF) as u8);
            }
            [c, d] => {
                let n = c + d * 45;
                if n > 0xFF {
                    return Err(invalid(format!("trailing base45 group decodes to {n}, above 0xFF")));
                }
                out.push(n as u8);
            }
            _ => return Err(invalid("invalid base45 grouping".to_string())),
        }
    }

    Ok(out)
}

pub(crate) fn encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(2) * 3);
    for pair in input.chunks(2) {
        let (mut n, width) = match pair {
            [a, b] => (u32::from(*a) * 256 + u32::from(*b), 3),
            [a] => (u32::from(*a), 2),
            _ => continue,
        };
        for _ in 0..width {
            out.push(char::from(ALPHABET[(n % 45) as usize]));
            n /= 45;
        }
    }
    out
}
