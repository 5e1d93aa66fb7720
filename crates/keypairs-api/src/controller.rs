// ABOUTME: KeypairsController turns boundary requests into service calls and rendered responses.
// ABOUTME: Every outcome, success or fault, leaves as a status code plus a body in the chosen format.

use crate::envelope::{parse_create_request, KeypairEnvelope, KeypairView, KeypairsEnvelope};
use crate::error::ApiError;
use crate::fault::Fault;
use crate::{xml, Format};
use http::StatusCode;
use keypairs_core::{KeypairService, KeypairStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Rendered response. `body` is empty for delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub format: Format,
    pub body: String,
}

impl ApiResponse {
    pub fn content_type(&self) -> &'static str {
        self.format.content_type()
    }

    fn fault(fault: Fault, format: Format) -> Self {
        let body = match format {
            Format::Json => fault.to_json().to_string(),
            // Falls back to JSON if the XML fault itself cannot be encoded.
            Format::Xml => xml::fault_to_xml(&fault).unwrap_or_else(|_| fault.to_json().to_string()),
        };
        Self {
            status: fault.status(),
            format,
            body,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Encode(e.to_string()))
}

fn render_one(view: &KeypairView, format: Format) -> Result<String, ApiError> {
    match format {
        Format::Json => to_json(&KeypairEnvelope::from(view.clone())),
        Format::Xml => xml::keypair_to_xml(view),
    }
}

/// Keypair operations for one service, shared across requests.
pub struct KeypairsController<S> {
    service: Arc<KeypairService<S>>,
}

impl<S> Clone for KeypairsController<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<S: KeypairStore> KeypairsController<S> {
    pub fn new(service: KeypairService<S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// POST: create or import. 200 with the keypair (plus private key when generated).
    pub async fn create(&self, user_id: &str, body: &str, format: Format) -> ApiResponse {
        let request = match parse_create_request(body, format) {
            Ok(request) => request,
            Err(e) => {
                debug!(user_id = %user_id, "Rejected create body");
                return ApiResponse::fault(Fault::from(e), format);
            }
        };

        let created = match self
            .service
            .create(user_id, &request.name, request.public_key.as_deref())
            .await
        {
            Ok(created) => created,
            Err(e) => return ApiResponse::fault(Fault::from(&e), format),
        };

        match render_one(&KeypairView::from(&created), format) {
            Ok(body) => ApiResponse {
                status: StatusCode::OK,
                format,
                body,
            },
            Err(e) => ApiResponse::fault(Fault::from(e), format),
        }
    }

    /// DELETE: 202 with an empty body.
    pub async fn delete(&self, user_id: &str, name: &str) -> ApiResponse {
        match self.service.delete(user_id, name).await {
            Ok(()) => ApiResponse {
                status: StatusCode::ACCEPTED,
                format: Format::default(),
                body: String::new(),
            },
            Err(e) => ApiResponse::fault(Fault::from(&e), Format::default()),
        }
    }

    /// GET one. Never includes a private key.
    pub async fn show(&self, user_id: &str, name: &str, format: Format) -> ApiResponse {
        let keypair = match self.service.get(user_id, name).await {
            Ok(keypair) => keypair,
            Err(e) => return ApiResponse::fault(Fault::from(&e), format),
        };

        match render_one(&KeypairView::from(&keypair), format) {
            Ok(body) => ApiResponse {
                status: StatusCode::OK,
                format,
                body,
            },
            Err(e) => ApiResponse::fault(Fault::from(e), format),
        }
    }

    /// GET all of a user's keypairs.
    pub async fn index(&self, user_id: &str, format: Format) -> ApiResponse {
        let keypairs = match self.service.list(user_id).await {
            Ok(keypairs) => keypairs,
            Err(e) => return ApiResponse::fault(Fault::from(&e), format),
        };

        let rendered = match format {
            Format::Json => to_json(&KeypairsEnvelope::from_keypairs(&keypairs)),
            Format::Xml => {
                let views: Vec<KeypairView> = keypairs.iter().map(KeypairView::from).collect();
                xml::keypairs_to_xml(&views)
            }
        };

        match rendered {
            Ok(body) => ApiResponse {
                status: StatusCode::OK,
                format,
                body,
            },
            Err(e) => ApiResponse::fault(Fault::from(e), format),
        }
    }
}
