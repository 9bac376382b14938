// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use hc1_abstractions::{DecodeStage, Hc1Error, HC1_PREFIX};

/// Strips the `HC1:` prefix and returns the base45 text that follows.
///
/// The remainder is not inspected; an empty remainder fails in a later stage.
pub(crate) fn strip_hc1_prefix(token: &str) -> Result<&str, Hc1Error> {
    token
        .strip_prefix(HC1_PREFIX)
        .ok_or_else(|| Hc1Error::format(DecodeStage::Token, format!("input must start with '{HC1_PREFIX}'")))
}
