//! # jwsign - Minimal HMAC-signed JWT encoding and verification
//!
//! > Minimal, type-safe JSON Web Token (JWT) encoding and verification for Rust.
//!
//! **jwsign** produces and consumes the compact JWT serialization: three
//! Base64URL segments (header, payload, signature) joined by `.`, signed
//! with an HMAC over the encoded `header.payload` string. The pipeline is
//! deliberately small and strict. Serialization is canonical, algorithm
//! dispatch goes through a closed allow-list, signatures compare in
//! constant time, and anything malformed, forged, or expired is rejected
//! with a distinguishable error.
//!
//! ## Quick Start
//!
//! ```
//! use jwsign::Algorithm;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Session {
//!     sub: String,
//!     exp: i64,
//! }
//!
//! # fn main() -> jwsign::Result<()> {
//! let session = Session {
//!     sub: "user123".to_string(),
//!     exp: 2_000_000_000,
//! };
//!
//! let token = jwsign::encode(&session, b"secret", Algorithm::HS256)?;
//! let decoded: Session = jwsign::decode_to(&token, b"secret", true)?;
//! assert_eq!(decoded.sub, "user123");
//! # Ok(())
//! # }
//! ```
//!
//! ## Encoding
//!
//! [`encode`] signs any `serde::Serialize` payload. [`encode_with_headers`]
//! additionally merges caller-supplied header fields, which serialize before
//! the library-owned `typ` and `alg` fields. Header key order is part of the
//! signed bytes, so encoding is deterministic: identical inputs produce
//! byte-identical tokens.
//!
//! ## Decoding and Verification
//!
//! [`decode`] returns the payload JSON text, [`decode_to_value`] the dynamic
//! payload value, and [`decode_to`] a concrete type. All three take a
//! `verify` flag:
//!
//! - `verify = true` recomputes the HMAC over the encoded segments, compares
//!   it to the token's signature in constant time, and validates the `exp`
//!   claim when present. Both checks fail with
//!   [`Error::SignatureVerification`].
//! - `verify = false` skips signature and claims checks entirely. This is an
//!   explicit escape hatch for inspecting untrusted payloads; it is never
//!   the default and the result must not be used for authorization.
//!
//! Structural problems — wrong segment count, invalid Base64URL, invalid
//! JSON, an unresolvable `alg` — are a separate error family (see
//! [`Error::is_malformed`]), so callers can tell "not a JWT" apart from "a
//! JWT that failed to authenticate".
//!
//! ## Pluggable JSON
//!
//! Serialization goes through the [`JsonCodec`] capability. A
//! `serde_json`-backed default is active process-wide and can be replaced
//! once at startup with [`set_json_codec`]; for explicit wiring, construct a
//! [`TokenCodec`] with [`TokenCodec::with_json_codec`]. The process-wide
//! slot follows a single-writer-before-many-readers discipline: swapping it
//! while encode/decode calls are in flight is caller responsibility.
//!
//! ## Security
//!
//! - The `"none"` algorithm is always rejected per
//!   [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725), and the
//!   header's `alg` value resolves through a closed enum — an unrecognized
//!   name never degrades to "no signature required".
//! - HMAC comparison uses the
//!   [`constant_time_eq`](https://crates.io/crates/constant_time_eq) crate;
//!   comparison time does not depend on where the buffers first differ.
//! - Key material is taken per call as `&[u8]` and never cached or logged.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) — JSON Web Signature (JWS)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) — JSON Web Token (JWT)
//! - [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725) — JSON Web Signature Best Practices

// Core modules
pub mod error;
pub mod utils;

// Algorithm system
pub mod algorithm;

// JSON adapter
pub mod json;

// Claims and header handling
pub(crate) mod claims;
pub(crate) mod header;

// Token codec (main public API)
pub mod token;

pub(crate) mod limits;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use algorithm::Algorithm;
pub use error::{Error, Result};
pub use json::{set_json_codec, JsonCodec, JsonObject, SerdeJsonCodec, Value};
pub use token::{
    decode, decode_header, decode_to, decode_to_value, encode, encode_with_headers, TokenCodec,
};
