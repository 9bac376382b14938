// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Consumer example for the `hc1` crate.
//!
//! Reads an `HC1:` token from the first argument (or stdin when absent) and
//! prints the decoded document as pretty JSON. The signature is NOT verified.
//!
//! Limits can be overridden with `HC1_MAX_DECOMPRESSED_LEN` and
//! `HC1_MAX_NESTING_DEPTH`; diagnostics are controlled by `RUST_LOG`.

use std::io::Read;

use anyhow::{anyhow, Context as _};
use hc1::DecodeOptions;
use tracing_subscriber::EnvFilter;

fn env_usize(name: &str) -> anyhow::Result<Option<usize>> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse::<usize>()
            .map(Some)
            .with_context(|| format!("{name} must be a non-negative integer, got {v:?}")),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow!("failed to read {name}: {e}")),
    }
}

fn options_from_env() -> anyhow::Result<DecodeOptions> {
    let mut options = DecodeOptions::default();
    if let Some(max_len) = env_usize("HC1_MAX_DECOMPRESSED_LEN")? {
        options = if max_len == 0 {
            options.without_decompressed_len_limit()
        } else {
            options.with_max_decompressed_len(max_len)
        };
    }
    if let Some(depth) = env_usize("HC1_MAX_NESTING_DEPTH")? {
        options = options.with_max_nesting_depth(depth);
    }
    Ok(options)
}

fn read_token() -> anyhow::Result<String> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg);
    }
    let mut data = String::new();
    std::io::stdin()
        .read_to_string(&mut data)
        .context("failed to read token from stdin")?;
    Ok(data.trim_end_matches(['\r', '\n']).to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let options = options_from_env()?;
    let token = read_token()?;

    let doc = hc1::decode_hc1_with_options(&token, &options).context("failed to decode HC1 token")?;
    tracing::info!(kid = ?doc.cose.kid_b64, has_hcert = doc.hcert.is_some(), "decoded");

    let text = serde_json::to_string_pretty(&doc.to_json()).context("failed to render JSON")?;
    println!("{text}");
    Ok(())
}
