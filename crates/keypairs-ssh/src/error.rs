// ABOUTME: Error types for SSH key operations using thiserror.
// ABOUTME: Provides typed errors for key parsing, generation, and serialization.

use thiserror::Error;

/// Errors that can occur during SSH key operations.
#[derive(Error, Debug)]
pub enum SshError {
    /// The supplied text is not a usable OpenSSH public key.
    #[error("invalid public key: {reason}")]
    InvalidPublicKey { reason: String },

    /// Failed to generate an SSH key.
    #[error("failed to generate SSH key: {0}")]
    GenerateKey(#[source] ssh_key::Error),

    /// Failed to serialize a key.
    #[error("failed to serialize key: {0}")]
    SerializeKey(#[source] ssh_key::Error),

    /// Unknown key type name.
    #[error("unsupported key type: {0} (expected ssh-ed25519, ssh-rsa or ecdsa-sha2-nistp256)")]
    UnsupportedKeyType(String),
}

impl SshError {
    pub(crate) fn invalid_public_key(reason: impl std::fmt::Display) -> Self {
        SshError::InvalidPublicKey {
            reason: reason.to_string(),
        }
    }
}

/// Result type alias using SshError.
pub type Result<T> = std::result::Result<T, SshError>;
