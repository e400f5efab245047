//! # Continuation Tokens
//!
//! Wire format: `base64(JSON(lastEvaluatedKey))`. Opaque to callers and
//! unversioned; any change to the store's key shape invalidates outstanding
//! tokens.

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde_json::Value;

use crate::store::Key;

use super::errors::{PaginationError, PaginationResult};

/// Encoded continuation token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a store key
    pub fn encode(key: &Key) -> PaginationResult<Self> {
        let json = serde_json::to_vec(key)
            .map_err(|e| PaginationError::BadCursor(format!("unencodable key: {}", e)))?;
        Ok(Self(STANDARD.encode(json)))
    }

    /// Decode a token back into the exclusive start key it was built from
    pub fn decode(token: &str) -> PaginationResult<Key> {
        let bytes = STANDARD
            .decode(token)
            .or_else(|_| URL_SAFE.decode(token))
            .or_else(|_| URL_SAFE_NO_PAD.decode(token))
            .map_err(|_| PaginationError::BadCursor("not valid base64".to_string()))?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|_| PaginationError::BadCursor("not valid JSON".to_string()))?;

        match value {
            Value::Object(key) if !key.is_empty() && key.values().all(Value::is_string) => Ok(key),
            _ => Err(PaginationError::BadCursor(
                "not a key of string attributes".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::key_of;

    #[test]
    fn test_token_is_base64_json() {
        let cursor = Cursor::encode(&key_of("id", "abc")).unwrap();
        let raw = STANDARD.decode(cursor.as_str()).unwrap();
        assert_eq!(raw, br#"{"id":"abc"}"#);
        assert_eq!(Cursor::decode(cursor.as_str()).unwrap(), key_of("id", "abc"));
    }

    #[test]
    fn test_invalid_base64_is_bad_cursor() {
        assert!(matches!(
            Cursor::decode("not-base64!!"),
            Err(PaginationError::BadCursor(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_bad_cursor() {
        let token = STANDARD.encode("{not json");
        assert!(matches!(
            Cursor::decode(&token),
            Err(PaginationError::BadCursor(ref m)) if m.contains("JSON")
        ));
    }

    #[test]
    fn test_non_key_json_is_bad_cursor() {
        for payload in ["[1,2]", "{}", r#"{"id":5}"#, "null"] {
            let token = STANDARD.encode(payload);
            assert!(matches!(
                Cursor::decode(&token),
                Err(PaginationError::BadCursor(_))
            ));
        }
    }

    #[test]
    fn test_url_safe_alphabet_accepted() {
        let key = key_of("id", "??>>");
        let json = serde_json::to_vec(&key).unwrap();
        let token = URL_SAFE_NO_PAD.encode(json);
        assert_eq!(Cursor::decode(&token).unwrap(), key);
    }
}
