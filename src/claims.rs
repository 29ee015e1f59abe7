//! Registered claim validation
//!
//! The claims gate runs only after the signature gate has passed. The sole
//! registered claim with reserved semantics here is `exp` (expiration,
//! integer Unix seconds, UTC). Its absence is not an error; its presence
//! makes the check mandatory.

use crate::error::{Error, Result};

use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// Validate registered claims of a verified payload
///
/// Claim failures share the signature-verification error kind so callers
/// cannot tell the two gates apart by error type alone.
pub(crate) fn validate(payload: &Value) -> Result<()> {
    let Some(exp) = payload.get("exp") else {
        return Ok(());
    };

    let exp = exp.as_i64().ok_or_else(Error::exp_not_numeric)?;

    if exp < current_timestamp() {
        return Err(Error::token_expired());
    }

    Ok(())
}

/// Get current Unix timestamp
fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_else(|_| std::time::Duration::from_secs(0))
        .as_secs() as i64
}
