//! Pluggable JSON serialization
//!
//! The token codec consumes JSON through the [`JsonCodec`] capability:
//! serialize a dynamic [`Value`] to text, parse text back into a [`Value`].
//! A default `serde_json`-backed implementation is active process-wide and
//! can be replaced once at startup via [`set_json_codec`]; a codec can also
//! be injected per [`TokenCodec`](crate::TokenCodec) instance.
//!
//! Typed payloads are an explicit conversion step on top of the dynamic
//! representation: `T -> Value` before serialization, `Value -> T` after
//! parsing. Shape mismatches surface as [`Error::TypeConversion`].

use crate::error::{Error, Result};

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, RwLock};

pub use serde_json::Value;

/// Map type for headers and dynamic payloads
///
/// Backed by an insertion-ordered map (the `preserve_order` feature of
/// `serde_json`), so serialized key order follows insertion order. Header
/// key order is part of the signed bytes.
pub type JsonObject = serde_json::Map<String, Value>;

/// JSON serialization capability consumed by the token codec
///
/// Implementations must be pure: same input, same output, no side effects.
pub trait JsonCodec: Send + Sync {
    /// Serialize a dynamic value to JSON text
    fn serialize(&self, value: &Value) -> Result<String>;

    /// Parse JSON text into a dynamic value
    fn deserialize(&self, text: &str) -> Result<Value>;
}

/// Default adapter backed by `serde_json`
///
/// Preserves map key insertion order, writes integers without a trailing
/// fractional point, and keeps nulls only where explicitly present.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn serialize(&self, value: &Value) -> Result<String> {
        serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn deserialize(&self, text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| Error::FormatInvalidJson(e.to_string()))
    }
}

static DEFAULT_CODEC: Lazy<RwLock<Arc<dyn JsonCodec>>> =
    Lazy::new(|| RwLock::new(Arc::new(SerdeJsonCodec)));

/// Replace the process-wide JSON adapter
///
/// Configure once at startup, before any encode/decode call. Concurrent
/// reads during steady-state operation are safe; reassigning while calls
/// are in flight is caller responsibility (single writer before many
/// readers).
pub fn set_json_codec(codec: Arc<dyn JsonCodec>) {
    let mut slot = match DEFAULT_CODEC.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *slot = codec;
}

/// Current process-wide JSON adapter
pub(crate) fn default_json_codec() -> Arc<dyn JsonCodec> {
    let slot = match DEFAULT_CODEC.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    Arc::clone(&slot)
}

/// Convert a serializable value into the dynamic representation
pub(crate) fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::Serialization(e.to_string()))
}

/// Convert a decoded payload into a concrete type
pub(crate) fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::TypeConversion(e.to_string()))
}
