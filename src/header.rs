//! JWT header construction and inspection

use crate::algorithm::Algorithm;
use crate::error::{Error, Result};
use crate::json::JsonObject;

use serde_json::Value;

/// Value of the `typ` header field
pub(crate) const TOKEN_TYPE: &str = "JWT";

/// Build the header map for encoding
///
/// Caller-supplied extras come first, in their own order; `typ` and `alg`
/// always take the last two slots and override any caller-supplied values.
/// The serialized key order feeds the signing input, so it is an invariant,
/// not a presentation detail.
pub(crate) fn build(extra_headers: Option<&JsonObject>, algorithm: Algorithm) -> JsonObject {
    let mut header = JsonObject::new();

    if let Some(extra) = extra_headers {
        for (key, value) in extra {
            if key != "typ" && key != "alg" {
                header.insert(key.clone(), value.clone());
            }
        }
    }

    header.insert("typ".to_string(), Value::String(TOKEN_TYPE.to_string()));
    header.insert(
        "alg".to_string(),
        Value::String(algorithm.as_str().to_string()),
    );

    header
}

/// Resolve the signing algorithm from a decoded header value
///
/// The header must be a JSON object whose `alg` field is a string naming an
/// allowed algorithm. Anything else is a malformed token, never a fallback
/// to "no signature required".
pub(crate) fn algorithm_of(header: &Value) -> Result<Algorithm> {
    let name = header
        .get("alg")
        .and_then(Value::as_str)
        .ok_or(Error::HeaderMissingAlgorithm)?;

    Algorithm::from_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_minimal_header() {
        let header = build(None, Algorithm::HS256);
        let keys: Vec<&str> = header.keys().map(String::as_str).collect();

        assert_eq!(keys, ["typ", "alg"]);
        assert_eq!(header["typ"], Value::from("JWT"));
        assert_eq!(header["alg"], Value::from("HS256"));
    }

    #[test]
    fn test_build_extras_come_first() {
        let mut extra = JsonObject::new();
        extra.insert("foo".to_string(), Value::from("bar"));
        extra.insert("kid".to_string(), Value::from("key-1"));

        let header = build(Some(&extra), Algorithm::HS512);
        let keys: Vec<&str> = header.keys().map(String::as_str).collect();

        assert_eq!(keys, ["foo", "kid", "typ", "alg"]);
        assert_eq!(header["alg"], Value::from("HS512"));
    }

    #[test]
    fn test_build_library_keys_win_on_conflict() {
        let mut extra = JsonObject::new();
        extra.insert("alg".to_string(), Value::from("none"));
        extra.insert("typ".to_string(), Value::from("evil"));
        extra.insert("foo".to_string(), Value::from("bar"));

        let header = build(Some(&extra), Algorithm::HS256);
        let keys: Vec<&str> = header.keys().map(String::as_str).collect();

        assert_eq!(keys, ["foo", "typ", "alg"]);
        assert_eq!(header["typ"], Value::from("JWT"));
        assert_eq!(header["alg"], Value::from("HS256"));
    }

    #[test]
    fn test_algorithm_of() {
        let header: Value = serde_json::json!({"typ": "JWT", "alg": "HS384"});
        assert_eq!(algorithm_of(&header).unwrap(), Algorithm::HS384);
    }

    #[test]
    fn test_algorithm_of_missing() {
        let header: Value = serde_json::json!({"typ": "JWT"});
        assert!(matches!(
            algorithm_of(&header),
            Err(Error::HeaderMissingAlgorithm)
        ));

        // A non-string alg is just as unusable
        let header: Value = serde_json::json!({"alg": 5});
        assert!(matches!(
            algorithm_of(&header),
            Err(Error::HeaderMissingAlgorithm)
        ));

        // So is a header that is not an object at all
        let header: Value = serde_json::json!([1, 2, 3]);
        assert!(matches!(
            algorithm_of(&header),
            Err(Error::HeaderMissingAlgorithm)
        ));
    }

    #[test]
    fn test_algorithm_of_rejects_none() {
        let header: Value = serde_json::json!({"alg": "none"});
        assert!(matches!(
            algorithm_of(&header),
            Err(Error::AlgorithmNoneRejected)
        ));
    }
}
