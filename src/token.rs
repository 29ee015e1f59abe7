//! Compact JWT serialization: encode, verify, decode
//!
//! A token is three non-empty Base64URL segments joined by `.`:
//! `header.payload.signature`. The signature is computed over the ASCII
//! bytes of `header.payload` exactly as they appear on the wire, never over
//! decoded content, so re-encoding a decoded token reproduces it byte for
//! byte.

use crate::algorithm::Algorithm;
use crate::claims;
use crate::error::{Error, Result};
use crate::header;
use crate::json::{self, JsonCodec, JsonObject};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_SIGNATURE_B64_SIZE, MAX_TOKEN_LENGTH,
};
use crate::utils::base64url;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Encodes and decodes compact JWTs against a JSON adapter
///
/// The adapter is fixed at construction (dependency injection); use the
/// top-level functions for the process-wide default. The codec holds no
/// per-call state, so one instance is safe to share across threads.
pub struct TokenCodec {
    json: Arc<dyn JsonCodec>,
}

impl TokenCodec {
    /// Codec over the process-wide JSON adapter as configured at call time
    pub fn new() -> Self {
        Self {
            json: json::default_json_codec(),
        }
    }

    /// Codec over an explicit JSON adapter
    pub fn with_json_codec(json: Arc<dyn JsonCodec>) -> Self {
        Self { json }
    }

    /// Encode `payload` into a signed token
    pub fn encode<T: Serialize>(
        &self,
        payload: &T,
        key: &[u8],
        algorithm: Algorithm,
    ) -> Result<String> {
        self.encode_parts(None, &json::to_value(payload)?, key, algorithm)
    }

    /// Encode `payload` into a signed token with extra header fields
    ///
    /// Extra fields serialize before `typ` and `alg`; since header bytes
    /// feed the signature, the same payload signed with and without extras
    /// yields different tokens.
    pub fn encode_with_headers<T: Serialize>(
        &self,
        extra_headers: &JsonObject,
        payload: &T,
        key: &[u8],
        algorithm: Algorithm,
    ) -> Result<String> {
        self.encode_parts(Some(extra_headers), &json::to_value(payload)?, key, algorithm)
    }

    fn encode_parts(
        &self,
        extra_headers: Option<&JsonObject>,
        payload: &Value,
        key: &[u8],
        algorithm: Algorithm,
    ) -> Result<String> {
        let header = Value::Object(header::build(extra_headers, algorithm));

        let header_b64 = base64url::encode(&self.json.serialize(&header)?);
        let payload_b64 = base64url::encode(&self.json.serialize(payload)?);

        let signing_input = format!("{header_b64}.{payload_b64}");
        let signature = algorithm.sign(key, signing_input.as_bytes())?;
        let signature_b64 = base64url::encode_bytes(&signature);

        Ok(format!("{signing_input}.{signature_b64}"))
    }

    /// Decode a token and return the payload JSON text
    ///
    /// With `verify` set, the signature is recomputed and compared in
    /// constant time and the `exp` claim (if present) is checked against
    /// current UTC time. `verify = false` skips both gates and must be an
    /// explicit, deliberate choice; the returned payload is unauthenticated.
    pub fn decode(&self, token: &str, key: &[u8], verify: bool) -> Result<String> {
        Ok(self.decode_parts(token, key, verify)?.payload_json)
    }

    /// Decode a token into the dynamic payload value
    pub fn decode_to_value(&self, token: &str, key: &[u8], verify: bool) -> Result<Value> {
        Ok(self.decode_parts(token, key, verify)?.payload)
    }

    /// Decode a token into a concrete payload type
    ///
    /// Shape mismatches between the payload JSON and `T` surface as
    /// [`Error::TypeConversion`].
    pub fn decode_to<T: DeserializeOwned>(
        &self,
        token: &str,
        key: &[u8],
        verify: bool,
    ) -> Result<T> {
        json::from_value(self.decode_parts(token, key, verify)?.payload)
    }

    /// Parse only the header segment, without any verification
    ///
    /// The returned value is untrusted until the token verifies; use it for
    /// things like key selection, never for authorization decisions.
    pub fn decode_header(&self, token: &str) -> Result<Value> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let (header_b64, _, _) = split_token(token)?;
        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        self.json.deserialize(&header_json)
    }

    fn decode_parts(&self, token: &str, key: &[u8], verify: bool) -> Result<DecodedParts> {
        if token.len() > MAX_TOKEN_LENGTH {
            return Err(Error::TokenTooLarge {
                size: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        let (header_b64, payload_b64, signature_b64) = split_token(token)?;

        if signature_b64.len() > MAX_SIGNATURE_B64_SIZE {
            return Err(Error::SignatureB64TooLarge {
                size: signature_b64.len(),
                max: MAX_SIGNATURE_B64_SIZE,
            });
        }

        let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
        let payload_json = base64url::decode_string(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
        let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

        // The header must carry a resolvable algorithm even when the caller
        // skips verification; an unresolvable header is a malformed token.
        let header = self.json.deserialize(&header_json)?;
        let algorithm = header::algorithm_of(&header)?;

        let payload = self.json.deserialize(&payload_json)?;

        if verify {
            let signing_input = format!("{header_b64}.{payload_b64}");
            algorithm.verify(key, signing_input.as_bytes(), &signature)?;
            claims::validate(&payload)?;
        }

        Ok(DecodedParts {
            payload_json,
            payload,
        })
    }
}

impl Default for TokenCodec {
    fn default() -> Self {
        Self::new()
    }
}

struct DecodedParts {
    payload_json: String,
    payload: Value,
}

/// Split a token into its three segments
///
/// Exactly two `.` separators and three non-empty segments, or the input is
/// not a JWT.
fn split_token(token: &str) -> Result<(&str, &str, &str)> {
    let mut parts = token.split('.');
    let header = parts.next().ok_or(Error::FormatInvalid)?;
    let payload = parts.next().ok_or(Error::FormatInvalid)?;
    let signature = parts.next().ok_or(Error::FormatInvalid)?;

    if parts.next().is_some() || header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(Error::FormatInvalid);
    }

    Ok((header, payload, signature))
}

// ============================================================================
// Top-level API over the process-wide JSON adapter
// ============================================================================

/// Encode `payload` into a signed token
pub fn encode<T: Serialize>(payload: &T, key: &[u8], algorithm: Algorithm) -> Result<String> {
    TokenCodec::new().encode(payload, key, algorithm)
}

/// Encode `payload` into a signed token with extra header fields
pub fn encode_with_headers<T: Serialize>(
    extra_headers: &JsonObject,
    payload: &T,
    key: &[u8],
    algorithm: Algorithm,
) -> Result<String> {
    TokenCodec::new().encode_with_headers(extra_headers, payload, key, algorithm)
}

/// Decode a token and return the payload JSON text
pub fn decode(token: &str, key: &[u8], verify: bool) -> Result<String> {
    TokenCodec::new().decode(token, key, verify)
}

/// Decode a token into the dynamic payload value
pub fn decode_to_value(token: &str, key: &[u8], verify: bool) -> Result<Value> {
    TokenCodec::new().decode_to_value(token, key, verify)
}

/// Decode a token into a concrete payload type
pub fn decode_to<T: DeserializeOwned>(token: &str, key: &[u8], verify: bool) -> Result<T> {
    TokenCodec::new().decode_to(token, key, verify)
}

/// Parse only the header segment, without any verification
pub fn decode_header(token: &str) -> Result<Value> {
    TokenCodec::new().decode_header(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const KEY: &[u8] = b"secret";

    #[test]
    fn test_split_token() {
        assert_eq!(split_token("a.b.c").unwrap(), ("a", "b", "c"));

        for bad in ["", "a", "a.b", "a.b.c.d", ".b.c", "a..c", "a.b."] {
            assert!(
                matches!(split_token(bad), Err(Error::FormatInvalid)),
                "'{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let token = encode(&json!({"sub": "user123"}), KEY, Algorithm::HS256).unwrap();
        let payload = decode_to_value(&token, KEY, true).unwrap();
        assert_eq!(payload["sub"], Value::from("user123"));
    }

    #[test]
    fn test_decode_returns_payload_text() {
        let token = encode(&json!({"sub": "user123"}), KEY, Algorithm::HS256).unwrap();
        let text = decode(&token, KEY, true).unwrap();
        assert_eq!(text, r#"{"sub":"user123"}"#);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let payload = json!({"sub": "user123", "admin": false});
        let a = encode(&payload, KEY, Algorithm::HS384).unwrap();
        let b = encode(&payload, KEY, Algorithm::HS384).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_reencode_reproduces_token() {
        let token = encode(&json!({"a": 1, "b": "two"}), KEY, Algorithm::HS256).unwrap();
        let decoded = decode_to_value(&token, KEY, true).unwrap();
        let reencoded = encode(&decoded, KEY, Algorithm::HS256).unwrap();
        assert_eq!(reencoded, token);
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let token = encode(&json!({"sub": "u"}), KEY, Algorithm::HS256).unwrap();
        let result = decode(&token, b"other-key", true);
        assert!(matches!(result, Err(Error::SignatureVerification(_))));
    }

    #[test]
    fn test_unverified_decode_skips_signature() {
        let token = encode(&json!({"sub": "u"}), KEY, Algorithm::HS256).unwrap();
        // Wrong key, but verify=false returns the payload anyway
        let payload = decode_to_value(&token, b"other-key", false).unwrap();
        assert_eq!(payload["sub"], Value::from("u"));
    }

    #[test]
    fn test_header_algorithm_checked_even_unverified() {
        let header = base64url::encode(r#"{"typ":"JWT","alg":"none"}"#);
        let payload = base64url::encode(r#"{"sub":"u"}"#);
        let token = format!("{header}.{payload}.sig0");

        let result = decode(&token, KEY, false);
        assert!(matches!(result, Err(Error::AlgorithmNoneRejected)));
    }

    #[test]
    fn test_decode_header() {
        let mut extra = JsonObject::new();
        extra.insert("kid".to_string(), Value::from("key-7"));

        let token =
            encode_with_headers(&extra, &json!({"sub": "u"}), KEY, Algorithm::HS256).unwrap();
        let header = decode_header(&token).unwrap();

        assert_eq!(header["kid"], Value::from("key-7"));
        assert_eq!(header["typ"], Value::from("JWT"));
        assert_eq!(header["alg"], Value::from("HS256"));
    }

    #[test]
    fn test_oversized_token_rejected() {
        let token = "a".repeat(MAX_TOKEN_LENGTH + 1);
        let result = decode(&token, KEY, false);
        assert!(matches!(result, Err(Error::TokenTooLarge { .. })));
    }

    #[test]
    fn test_verification_covers_wire_bytes_not_decoded_content() {
        let token = encode(&json!({"n": 1}), KEY, Algorithm::HS256).unwrap();

        // Re-encode the payload segment with extra JSON whitespace; the
        // decoded content is equivalent but the wire bytes differ, so the
        // signature no longer matches.
        let (header_b64, _, signature_b64) = split_token(&token).unwrap();
        let altered_payload = base64url::encode("{\"n\": 1}");
        let altered = format!("{header_b64}.{altered_payload}.{signature_b64}");

        let result = decode(&altered, KEY, true);
        assert!(matches!(result, Err(Error::SignatureVerification(_))));
    }
}
