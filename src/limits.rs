//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
/// Payloads can contain custom claims, but must be bounded to prevent DoS
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (256 bytes)
/// HMAC signatures are at most 64 bytes (SHA-512), with margin
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = 256;

/// Maximum size for the Base64URL-encoded signature segment (512 bytes)
/// Base64URL encoding adds ~33% overhead over the decoded size
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 512;

/// Maximum length for the algorithm (alg) field in the JWT header (16 bytes)
/// Algorithm names are short (e.g., "HS256", "HS384", "HS512")
pub(crate) const MAX_ALG_LENGTH: usize = 16;
