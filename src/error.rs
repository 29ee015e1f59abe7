//! Errors for jwsign

use thiserror::Error;

/// JWT processing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors (malformed tokens)
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid JWT format: expected three non-empty parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Token header is missing a usable 'alg' field")]
    HeaderMissingAlgorithm,

    #[error("Signature segment too large: {size} bytes (maximum: {max} bytes)")]
    SignatureB64TooLarge { size: usize, max: usize },

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{0}' is not supported")]
    AlgorithmUnsupported(String),

    #[error("The 'none' algorithm is rejected for security reasons (RFC 8725)")]
    AlgorithmNoneRejected,

    #[error("Invalid HMAC key: {0}")]
    KeyInvalid(String),

    // ============================================================================
    // Verification Errors (signature and claims gates)
    // ============================================================================
    #[error("{0}")]
    SignatureVerification(String),

    // ============================================================================
    // Serialization Errors
    // ============================================================================
    #[error("JSON serialization failed: {0}")]
    Serialization(String),

    #[error("Payload does not match the requested type: {0}")]
    TypeConversion(String),
}

impl Error {
    /// True for structural failures: bad segmentation, invalid Base64URL,
    /// invalid JSON, or an unresolvable algorithm name. These mean the input
    /// is not a well-formed JWT, as opposed to a well-formed token that
    /// failed to authenticate.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::TokenTooLarge { .. }
                | Error::FormatInvalid
                | Error::FormatInvalidBase64(_)
                | Error::FormatInvalidJson(_)
                | Error::HeaderMissingAlgorithm
                | Error::SignatureB64TooLarge { .. }
                | Error::AlgorithmUnsupported(_)
                | Error::AlgorithmNoneRejected
        )
    }

    pub(crate) fn invalid_signature() -> Self {
        Error::SignatureVerification("Invalid signature".to_string())
    }

    pub(crate) fn token_expired() -> Self {
        Error::SignatureVerification("Token has expired".to_string())
    }

    pub(crate) fn exp_not_numeric() -> Self {
        Error::SignatureVerification(
            "Claim 'exp' must be a number of seconds since Unix epoch".to_string(),
        )
    }
}

/// Result type alias for jwsign operations
pub type Result<T> = std::result::Result<T, Error>;
