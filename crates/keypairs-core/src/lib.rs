// ABOUTME: Core of the keypairs service: records, validation, storage, quota, orchestration.
// ABOUTME: KeypairService composes the pieces into the create/delete/get/list workflow.

pub mod config;
pub mod error;
pub mod model;
pub mod quota;
pub mod service;
pub mod store;
pub mod validate;

pub use config::{Config, DatabaseConfig, KeysConfig, QuotaConfig};
pub use error::{ConfigError, KeypairError, Result, StoreError, ValidationError};
pub use keypairs_ssh::KeyType;
pub use model::{CreatedKeypair, Keypair};
pub use quota::{QuotaGuard, ResourceKind};
pub use service::{KeySource, KeypairService, NewKeypair};
pub use store::{KeypairStore, MemoryKeypairStore, SqliteKeypairStore};
