// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that produced an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DecodeStage {
    Token,
    Base45,
    Inflate,
    Cbor,
    CoseSign1,
}

impl DecodeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeStage::Token => "token",
            DecodeStage::Base45 => "base45",
            DecodeStage::Inflate => "inflate",
            DecodeStage::Cbor => "cbor",
            DecodeStage::CoseSign1 => "cose_sign1",
        }
    }
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the HC1 decode pipeline.
///
/// Every failure aborts the whole decode; there is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Hc1Error {
    /// Malformed input: missing prefix, bad base45, invalid CBOR, bad COSE shape.
    #[error("{stage}: {message}")]
    Format { stage: DecodeStage, message: String },

    /// Corrupt, truncated or otherwise invalid zlib stream.
    #[error("inflate: {message}")]
    Decompression { message: String },

    /// Decompressed size or CBOR nesting depth exceeded the configured ceiling.
    #[error("{stage}: resource limit exceeded: {message}")]
    ResourceLimit { stage: DecodeStage, message: String },
}

impl Hc1Error {
    pub fn format(stage: DecodeStage, message: impl Into<String>) -> Self {
        Self::Format {
            stage,
            message: message.into(),
        }
    }

    pub fn decompression(message: impl Into<String>) -> Self {
        Self::Decompression {
            message: message.into(),
        }
    }

    pub fn resource_limit(stage: DecodeStage, message: impl Into<String>) -> Self {
        Self::ResourceLimit {
            stage,
            message: message.into(),
        }
    }

    pub fn stage(&self) -> DecodeStage {
        match self {
            Hc1Error::Format { stage, .. } | Hc1Error::ResourceLimit { stage, .. } => *stage,
            Hc1Error::Decompression { .. } => DecodeStage::Inflate,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Hc1Error::Format { message, .. }
            | Hc1Error::Decompression { message }
            | Hc1Error::ResourceLimit { message, .. } => message,
        }
    }
}
