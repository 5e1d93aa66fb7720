// ABOUTME: Error types for request decoding and response encoding.
// ABOUTME: InvalidBody is distinct from field-level validation errors raised by the core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Envelope could not be decoded (bad syntax, wrong wrapper, missing name).
    #[error("Invalid request body")]
    InvalidBody,

    #[error("failed to encode response: {0}")]
    Encode(String),
}
