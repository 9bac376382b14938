// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! zlib (RFC 1950) decompression.
//!
//! The stream must carry the 2-byte zlib header, a complete deflate stream and
//! the Adler-32 trailer. Truncated streams are rejected instead of yielding a
//! partial result.

use flate2::{Decompress, FlushDecompress, Status};
use hc1_abstractions::{DecodeStage, Hc1Error};
use tracing::instrument;

const MIN_CHUNK: usize = 256;

#[instrument(level = "debug", skip_all, fields(input_len = input.len(), max_len = ?max_len))]
pub(crate) fn inflate(input: &[u8], max_len: Option<usize>) -> Result<Vec<u8>, Hc1Error> {
    if input.is_empty() {
        return Err(Hc1Error::decompression("empty zlib stream"));
    }

    let mut z = Decompress::new(true);
    let mut out: Vec<u8> = Vec::with_capacity(input.len().saturating_mul(4).max(MIN_CHUNK));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity().max(MIN_CHUNK));
        }

        let in_before = z.total_in();
        let out_before = z.total_out();
        let consumed = usize::try_from(in_before).unwrap_or(input.len()).min(input.len());

        let status = z
            .decompress_vec(&input[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| Hc1Error::decompression(format!("invalid zlib stream: {e}")))?;

        if let Some(max) = max_len {
            if out.len() > max {
                return Err(Hc1Error::resource_limit(
                    DecodeStage::Inflate,
                    format!("decompressed size exceeds {max} bytes"),
                ));
            }
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let progressed = z.total_in() != in_before || z.total_out() != out_before;
                if !progressed && out.len() < out.capacity() {
                    return Err(Hc1Error::decompression("truncated zlib stream"));
                }
            }
        }
    }

    let consumed = usize::try_from(z.total_in()).unwrap_or(input.len());
    if consumed < input.len() {
        tracing::warn!(trailing = input.len() - consumed, "ignoring bytes after zlib stream");
    }

    tracing::debug!(output_len = out.len(), "inflated");
    Ok(out)
}
