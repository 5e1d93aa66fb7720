// ABOUTME: Error taxonomy for keypair operations using thiserror.
// ABOUTME: Validation, storage, and workflow errors, each classified where it is detected.

use crate::quota::ResourceKind;
use keypairs_ssh::SshError;
use std::path::PathBuf;
use thiserror::Error;

/// Client input defects. Never retried, surfaced verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("keypair name must not be blank")]
    EmptyName,

    #[error("keypair name must be between 1 and {max} characters long (got {len})")]
    NameTooLong { len: usize, max: usize },

    #[error("keypair name contains unsafe characters: {found:?}")]
    InvalidNameChars { found: String },

    #[error("keypair data is invalid: {reason}")]
    InvalidPublicKey { reason: String },
}

/// Errors raised by a [`KeypairStore`](crate::store::KeypairStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("keypair {name:?} already exists for user {user_id}")]
    DuplicateName { user_id: String, name: String },

    #[error("keypair {name:?} not found for user {user_id}")]
    NotFound { user_id: String, name: String },

    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Classified outcome of a keypair operation.
#[derive(Error, Debug)]
pub enum KeypairError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("quota exceeded for {resource} (user {user_id}, limit {limit})")]
    QuotaExceeded {
        user_id: String,
        resource: ResourceKind,
        limit: u32,
    },

    #[error("key pair '{name}' already exists")]
    KeypairAlreadyExists { name: String },

    #[error("keypair {name:?} not found for user {user_id}")]
    NotFound { user_id: String, name: String },

    #[error("failed to generate key pair: {reason}")]
    KeyGenerationFailed { reason: String },

    #[error("storage error: {0}")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for KeypairError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName { name, .. } => KeypairError::KeypairAlreadyExists { name },
            StoreError::NotFound { user_id, name } => KeypairError::NotFound { user_id, name },
            other => KeypairError::Storage(other),
        }
    }
}

impl From<SshError> for ValidationError {
    fn from(err: SshError) -> Self {
        match err {
            SshError::InvalidPublicKey { reason } => ValidationError::InvalidPublicKey { reason },
            other => ValidationError::InvalidPublicKey {
                reason: other.to_string(),
            },
        }
    }
}

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid [keys] default_type: {0}")]
    KeyType(#[source] SshError),
}

/// Result type alias using KeypairError.
pub type Result<T> = std::result::Result<T, KeypairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_already_exists() {
        let err: KeypairError = StoreError::DuplicateName {
            user_id: "u1".to_string(),
            name: "a".to_string(),
        }
        .into();
        assert!(matches!(err, KeypairError::KeypairAlreadyExists { ref name } if name == "a"));
        assert_eq!(err.to_string(), "key pair 'a' already exists");
    }

    #[test]
    fn test_not_found_passes_through() {
        let err: KeypairError = StoreError::NotFound {
            user_id: "u1".to_string(),
            name: "gone".to_string(),
        }
        .into();
        assert!(matches!(err, KeypairError::NotFound { .. }));
    }

    #[test]
    fn test_backend_error_is_storage() {
        let err: KeypairError = StoreError::Backend(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, KeypairError::Storage(_)));
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: KeypairError = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "keypair name must not be blank");
    }

    #[test]
    fn test_ssh_error_becomes_invalid_public_key() {
        let err: ValidationError = SshError::UnsupportedKeyType("x".to_string()).into();
        assert!(matches!(err, ValidationError::InvalidPublicKey { .. }));
    }

    #[test]
    fn test_quota_exceeded_display() {
        let err = KeypairError::QuotaExceeded {
            user_id: "u1".to_string(),
            resource: ResourceKind::Keypairs,
            limit: 100,
        };
        let display = err.to_string();
        assert!(display.contains("key_pairs"));
        assert!(display.contains("100"));
    }
}
