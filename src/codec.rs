//! Canonical payload serialization
//!
//! Payloads are `serde_json::Value` trees: null, booleans, numbers, strings,
//! ordered lists, and string-keyed mappings, arbitrarily nested. List order
//! is preserved exactly.

use serde_json::Value;

use crate::error::StoreError;

/// Serialize a payload to bytes
pub fn encode(payload: &Value) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec(payload)?)
}

/// Parse bytes back into a payload
/// Fails with `MalformedPayload` if the bytes do not parse as a value
pub fn decode(bytes: &[u8]) -> Result<Value, StoreError> {
    Ok(serde_json::from_slice(bytes)?)
}
