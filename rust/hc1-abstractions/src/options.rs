// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Default ceiling for the inflated COSE_Sign1 size (1 MiB).
///
/// QR-borne tokens inflate to a few kilobytes; anything near this bound is hostile.
pub const DEFAULT_MAX_DECOMPRESSED_LEN: usize = 1024 * 1024;

/// Default ceiling for CBOR container/tag nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of bytes the zlib stage may produce. `None` disables the check.
    pub max_decompressed_len: Option<usize>,
    /// Maximum depth of nested arrays, maps and tags in any CBOR item.
    pub max_nesting_depth: usize,
}

impl DecodeOptions {
    pub fn with_max_decompressed_len(mut self, max_len: usize) -> Self {
        self.max_decompressed_len = Some(max_len);
        self
    }

    /// Inflate without a size ceiling.
    ///
    /// Only appropriate when the token source is already trusted or bounded.
    pub fn without_decompressed_len_limit(mut self) -> Self {
        self.max_decompressed_len = None;
        self
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_decompressed_len: Some(DEFAULT_MAX_DECOMPRESSED_LEN),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}
