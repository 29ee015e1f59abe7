//! HMAC algorithm support for token signing and verification
//!
//! Algorithm dispatch always goes through the closed [`Algorithm`] enum,
//! resolved from the header string via an allow-list lookup. The `"none"`
//! algorithm is always rejected per
//! [RFC 8725](https://datatracker.ietf.org/doc/html/rfc8725).

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Signing algorithm identifier from the JWT header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// HMAC with SHA-256
    HS256,

    /// HMAC with SHA-384
    HS384,

    /// HMAC with SHA-512
    HS512,
}

impl Algorithm {
    /// Resolve an algorithm name from a JWT header, case-insensitively
    ///
    /// Names outside the allow-list fail with [`Error::AlgorithmUnsupported`];
    /// any casing of `"none"` fails with [`Error::AlgorithmNoneRejected`].
    pub fn from_name(s: &str) -> Result<Self> {
        // Bound the string before matching to prevent DoS via a huge header field
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmUnsupported(format!(
                "Algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        if s.eq_ignore_ascii_case("none") {
            return Err(Error::AlgorithmNoneRejected);
        }

        match s.to_ascii_uppercase().as_str() {
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            _ => Err(Error::AlgorithmUnsupported(s.to_string())),
        }
    }

    /// Canonical name for the `alg` header field
    pub const fn as_str(&self) -> &'static str {
        match self {
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
        }
    }

    /// MAC output width in bytes
    pub const fn digest_size(&self) -> usize {
        match self {
            Algorithm::HS256 => 32,
            Algorithm::HS384 => 48,
            Algorithm::HS512 => 64,
        }
    }

    /// Compute the MAC over `message` with `key`
    pub fn sign(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
        match self {
            Algorithm::HS256 => sign_hs256(key, message),
            Algorithm::HS384 => sign_hs384(key, message),
            Algorithm::HS512 => sign_hs512(key, message),
        }
    }

    /// Verify `signature` against the MAC of `message`, in constant time
    ///
    /// The comparison time does not depend on where the buffers first
    /// differ. Mismatch fails with the coarse signature-verification error.
    pub fn verify(&self, key: &[u8], message: &[u8], signature: &[u8]) -> Result<()> {
        let expected = self.sign(key, message)?;

        if signature.len() != expected.len() {
            return Err(Error::invalid_signature());
        }

        if constant_time_eq(signature, &expected) {
            Ok(())
        } else {
            Err(Error::invalid_signature())
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Algorithm {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn sign_hs256(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| Error::KeyInvalid(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sign_hs384(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha384::new_from_slice(key).map_err(|e| Error::KeyInvalid(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn sign_hs512(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha512::new_from_slice(key).map_err(|e| Error::KeyInvalid(e.to_string()))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
