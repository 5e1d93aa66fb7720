// ABOUTME: Persistence abstraction for keypair records, scoped by user.
// ABOUTME: create is an atomic insert-with-uniqueness-check in every backend.

mod memory;
mod sqlite;

pub use memory::MemoryKeypairStore;
pub use sqlite::SqliteKeypairStore;

use crate::error::StoreError;
use crate::model::Keypair;
use async_trait::async_trait;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Narrow storage interface the service is written against.
///
/// Implementations must make `create` atomic: of two concurrent calls for the
/// same `(user_id, name)`, exactly one succeeds and the other returns
/// `StoreError::DuplicateName`. A record is either fully written or absent.
#[async_trait]
pub trait KeypairStore: Send + Sync {
    /// Fetch one record; `StoreError::NotFound` if absent.
    async fn get(&self, user_id: &str, name: &str) -> Result<Keypair>;

    /// All of a user's records, ordered by name.
    async fn list(&self, user_id: &str) -> Result<Vec<Keypair>>;

    /// Insert a new record; `StoreError::DuplicateName` if the name is taken.
    async fn create(&self, keypair: &Keypair) -> Result<()>;

    /// Remove a record irreversibly; `StoreError::NotFound` if absent.
    async fn delete(&self, user_id: &str, name: &str) -> Result<()>;

    /// Live number of records owned by a user.
    async fn count(&self, user_id: &str) -> Result<usize> {
        Ok(self.list(user_id).await?.len())
    }
}

#[async_trait]
impl<S: KeypairStore + ?Sized> KeypairStore for Arc<S> {
    async fn get(&self, user_id: &str, name: &str) -> Result<Keypair> {
        (**self).get(user_id, name).await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Keypair>> {
        (**self).list(user_id).await
    }

    async fn create(&self, keypair: &Keypair) -> Result<()> {
        (**self).create(keypair).await
    }

    async fn delete(&self, user_id: &str, name: &str) -> Result<()> {
        (**self).delete(user_id, name).await
    }

    async fn count(&self, user_id: &str) -> Result<usize> {
        (**self).count(user_id).await
    }
}

pub(crate) fn not_found(user_id: &str, name: &str) -> StoreError {
    StoreError::NotFound {
        user_id: user_id.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn duplicate(keypair: &Keypair) -> StoreError {
    StoreError::DuplicateName {
        user_id: keypair.user_id.clone(),
        name: keypair.name.clone(),
    }
}
