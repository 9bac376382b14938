// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! JSON-representable output document.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoseSection {
    pub protected: Value,
    pub unprotected: Value,
    /// Key identifier as base64url text (or the original text KID); `null` when absent.
    pub kid_b64: Option<String>,
    pub signature: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hc1Document {
    pub cose: CoseSection,
    pub payload: Value,
    /// `null` when the claim set carries no HCERT.
    pub hcert: Option<Value>,
}

impl Hc1Document {
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "cose": {
                "protected": self.cose.protected,
                "unprotected": self.cose.unprotected,
                "kid_b64": self.cose.kid_b64,
                "signature": self.cose.signature,
            },
            "payload": self.payload,
            "hcert": self.hcert,
        })
    }
}
