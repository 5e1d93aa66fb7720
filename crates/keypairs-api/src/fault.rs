// ABOUTME: Maps classified keypair errors to fault kinds, status codes, and fault bodies.
// ABOUTME: Internal failures get a generic message; their detail goes to the log only.

use crate::error::ApiError;
use http::StatusCode;
use keypairs_core::KeypairError;
use serde_json::json;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    BadRequest,
    OverLimit,
    ConflictingRequest,
    ItemNotFound,
    ComputeFault,
}

impl FaultKind {
    /// Wrapper key of the fault body.
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::BadRequest => "badRequest",
            FaultKind::OverLimit => "overLimit",
            FaultKind::ConflictingRequest => "conflictingRequest",
            FaultKind::ItemNotFound => "itemNotFound",
            FaultKind::ComputeFault => "computeFault",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            FaultKind::BadRequest => StatusCode::BAD_REQUEST,
            FaultKind::OverLimit => StatusCode::PAYLOAD_TOO_LARGE,
            FaultKind::ConflictingRequest => StatusCode::CONFLICT,
            FaultKind::ItemNotFound => StatusCode::NOT_FOUND,
            FaultKind::ComputeFault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failed request as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    pub message: String,
}

impl Fault {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn invalid_body() -> Self {
        Self::new(FaultKind::BadRequest, ApiError::InvalidBody.to_string())
    }

    /// `{"badRequest": {"message": "...", "code": 400}}`
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            self.kind.as_str(): {
                "message": self.message,
                "code": self.status().as_u16(),
            }
        })
    }
}

impl From<ApiError> for Fault {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidBody => Fault::invalid_body(),
            ApiError::Encode(reason) => {
                error!(reason = %reason, "Failed to encode response");
                Fault::new(FaultKind::ComputeFault, "Failed to encode response")
            }
        }
    }
}

impl From<&KeypairError> for Fault {
    fn from(err: &KeypairError) -> Self {
        match err {
            KeypairError::Validation(e) => Fault::new(FaultKind::BadRequest, e.to_string()),
            KeypairError::QuotaExceeded { .. } => {
                Fault::new(FaultKind::OverLimit, "Quota exceeded, too many key pairs.")
            }
            KeypairError::KeypairAlreadyExists { .. } => {
                Fault::new(FaultKind::ConflictingRequest, err.to_string())
            }
            KeypairError::NotFound { name, .. } => Fault::new(
                FaultKind::ItemNotFound,
                format!("Keypair {name} not found."),
            ),
            KeypairError::KeyGenerationFailed { .. } | KeypairError::Storage(_) => {
                error!(error = %err, "Keypair request failed");
                Fault::new(
                    FaultKind::ComputeFault,
                    "The server has either erred or is incapable of performing the requested operation.",
                )
            }
        }
    }
}
