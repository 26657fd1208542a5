//! JSON encoding and decoding of entities.
//!
//! All wire (de)serialization goes through these functions so nested team
//! payloads are mapped in one place, and serde failures always become
//! `ApiError::Encode` / `ApiError::Decode`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

pub fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Decode a raw response body. Bytes that are not valid UTF-8 JSON are a
/// `Decode` error like any other malformed payload.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
