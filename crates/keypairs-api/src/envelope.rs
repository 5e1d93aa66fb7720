// ABOUTME: Request and response envelopes for the keypairs boundary.
// ABOUTME: Singular bodies wrap under "keypair"; lists under "keypairs" of wrapped entries.

use crate::error::ApiError;
use crate::{xml, Format};
use keypairs_core::{CreatedKeypair, Keypair};
use serde::{Deserialize, Serialize};

/// Outward view of a keypair. `private_key` only appears in create responses
/// for server-generated keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypairView {
    pub name: String,
    pub public_key: String,
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl From<&Keypair> for KeypairView {
    fn from(keypair: &Keypair) -> Self {
        Self {
            name: keypair.name.clone(),
            public_key: keypair.public_key.clone(),
            fingerprint: keypair.fingerprint.clone(),
            private_key: None,
        }
    }
}

impl From<&CreatedKeypair> for KeypairView {
    fn from(created: &CreatedKeypair) -> Self {
        Self {
            private_key: created.private_key.clone(),
            ..Self::from(&created.keypair)
        }
    }
}

/// `{"keypair": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypairEnvelope {
    pub keypair: KeypairView,
}

impl From<KeypairView> for KeypairEnvelope {
    fn from(keypair: KeypairView) -> Self {
        Self { keypair }
    }
}

/// `{"keypairs": [{"keypair": {...}}, ...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypairsEnvelope {
    pub keypairs: Vec<KeypairEnvelope>,
}

impl KeypairsEnvelope {
    pub fn from_keypairs(keypairs: &[Keypair]) -> Self {
        Self {
            keypairs: keypairs
                .iter()
                .map(|k| KeypairEnvelope::from(KeypairView::from(k)))
                .collect(),
        }
    }
}

/// Fields of a create request, after unwrapping the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKeypairBody {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// Decode a create request body.
///
/// Anything other than a `keypair` wrapper holding at least a string `name`
/// is `ApiError::InvalidBody`; field contents are validated later by the core.
pub fn parse_create_request(body: &str, format: Format) -> Result<CreateKeypairBody, ApiError> {
    match format {
        Format::Json => {
            let value: serde_json::Value =
                serde_json::from_str(body).map_err(|_| ApiError::InvalidBody)?;
            let inner = value.get("keypair").cloned().ok_or(ApiError::InvalidBody)?;
            serde_json::from_value(inner).map_err(|_| ApiError::InvalidBody)
        }
        Format::Xml => xml::parse_create_request(body),
    }
}
