// ABOUTME: Keypair records as stored and as returned from creation.
// ABOUTME: Stored records carry no private key; only CreatedKeypair can hold one.

use chrono::{DateTime, Utc};

/// A persisted keypair owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypair {
    pub user_id: String,
    pub name: String,
    /// OpenSSH one-line public key.
    pub public_key: String,
    pub fingerprint: String,
    pub created_at: DateTime<Utc>,
}

/// Result of a successful create.
#[derive(Clone)]
pub struct CreatedKeypair {
    pub keypair: Keypair,
    /// Present only when the server generated the key.
    pub private_key: Option<String>,
}

impl CreatedKeypair {
    pub fn was_generated(&self) -> bool {
        self.private_key.is_some()
    }
}

impl std::fmt::Debug for CreatedKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedKeypair")
            .field("keypair", &self.keypair)
            .field("private_key", &self.private_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
