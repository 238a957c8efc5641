//! Standardized error envelope.
//!
//! Every recovered failure leaves the API as `{error, message}`: a stable
//! machine-readable code plus a human-readable explanation. Unexpected
//! failures are logged in full server-side and reach the caller with a
//! generic message only.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error code, e.g. `"not_found"`.
    pub error: String,

    /// Human-readable explanation of this occurrence.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
