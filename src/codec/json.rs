//! JSON codec using `serde_json`.
//!
//! Field names come straight from the serde derives on the model types, so the
//! encoded form is stable across builds. Absent optional fields are skipped by
//! the model's `skip_serializing_if` attributes rather than written as `null`.
//!
//! # Example
//!
//! ```
//! use exposure_api_client::codec::JsonCodec;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Message {
//!     id: u32,
//!     content: String,
//! }
//!
//! let msg = Message { id: 42, content: "hello".to_string() };
//! let encoded = JsonCodec::encode(&msg).unwrap();
//! assert_eq!(encoded, r#"{"id":42,"content":"hello"}"#);
//! let decoded: Message = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, msg);
//! ```

use bytes::Bytes;

use crate::error::Result;

/// Content type declared on every request body.
pub const CONTENT_TYPE: &str = "application/json";

/// JSON codec for request and response bodies.
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value to a compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized (for example a map with
    /// non-string keys).
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Encode a value straight into a request body.
    #[inline]
    pub fn encode_body<T: serde::Serialize>(value: &T) -> Result<Bytes> {
        Ok(Bytes::from(serde_json::to_vec(value)?))
    }

    /// Decode JSON text to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the text cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    #[serde(rename_all = "camelCase")]
    struct TestStruct {
        profile_id: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        mfa_token: Option<String>,
    }

    #[test]
    fn test_encode_omits_absent_fields() {
        let value = TestStruct {
            profile_id: 7,
            mfa_token: None,
        };
        let encoded = JsonCodec::encode(&value).unwrap();
        assert_eq!(encoded, r#"{"profileId":7}"#);
        assert!(!encoded.contains("null"));
    }

    #[test]
    fn test_encode_decode_struct() {
        let original = TestStruct {
            profile_id: 7,
            mfa_token: Some("123456".into()),
        };
        let encoded = JsonCodec::encode(&original).unwrap();
        let decoded: TestStruct = JsonCodec::decode(&encoded).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_encode_body_matches_encode() {
        let value = TestStruct {
            profile_id: 1,
            mfa_token: Some("x".into()),
        };
        let body = JsonCodec::encode_body(&value).unwrap();
        assert_eq!(&body[..], JsonCodec::encode(&value).unwrap().as_bytes());
    }

    #[test]
    fn test_decode_invalid_returns_error() {
        let result: Result<TestStruct> = JsonCodec::decode("not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_rejects_non_string_map_keys() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1u8], 1);
        assert!(JsonCodec::encode(&map).is_err());
    }
}
