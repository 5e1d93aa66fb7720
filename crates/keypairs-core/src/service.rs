// ABOUTME: KeypairService orchestrates keypair creation, deletion, and lookup.
// ABOUTME: Creation runs quota, name, key, then store checks in that fixed order.

use crate::config::Config;
use crate::error::{ConfigError, KeypairError, Result, ValidationError};
use crate::model::{CreatedKeypair, Keypair};
use crate::quota::{QuotaGuard, ResourceKind};
use crate::store::KeypairStore;
use crate::validate::{validate_name, validate_public_key};
use chrono::Utc;
use keypairs_ssh::{generate_keypair, GeneratedKeypair, KeyType};
use tracing::{debug, info};

/// Where the key material of a new keypair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Server generates both halves; the private key is returned once.
    Generate(KeyType),
    /// Caller supplies an OpenSSH public key; no private key exists server-side.
    Import(String),
}

/// A create request after transport decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewKeypair {
    pub name: String,
    pub source: KeySource,
}

/// Request-scoped keypair operations over a store.
///
/// Holds no per-request state; every call carries its own user id, so a single
/// instance can be shared across tasks.
pub struct KeypairService<S> {
    store: S,
    quota: QuotaGuard,
    default_key_type: KeyType,
}

impl<S: KeypairStore> KeypairService<S> {
    pub fn new(store: S, quota: QuotaGuard) -> Self {
        Self {
            store,
            quota,
            default_key_type: KeyType::default(),
        }
    }

    /// Build from loaded configuration (quota limits and default key type).
    pub fn from_config(store: S, config: &Config) -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(store, QuotaGuard::new(config.quota.clone()))
            .with_default_key_type(config.keys.key_type()?))
    }

    pub fn with_default_key_type(mut self, key_type: KeyType) -> Self {
        self.default_key_type = key_type;
        self
    }

    pub fn default_key_type(&self) -> KeyType {
        self.default_key_type
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a keypair, generating one when `public_key` is `None`.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        public_key: Option<&str>,
    ) -> Result<CreatedKeypair> {
        let source = match public_key {
            Some(key) => KeySource::Import(key.to_string()),
            None => KeySource::Generate(self.default_key_type),
        };
        self.create_with(
            user_id,
            NewKeypair {
                name: name.to_string(),
                source,
            },
        )
        .await
    }

    /// Create a keypair from an explicit request.
    ///
    /// Failure precedence: quota, then name, then key material, then a name
    /// collision reported by the store.
    pub async fn create_with(&self, user_id: &str, request: NewKeypair) -> Result<CreatedKeypair> {
        let NewKeypair { name, source } = request;

        self.quota
            .check_and_reserve(&self.store, user_id, ResourceKind::Keypairs)
            .await?;

        validate_name(&name)?;

        let (public_key, fingerprint, private_key) = match source {
            KeySource::Generate(key_type) => {
                let generated = generate(key_type).await?;
                (
                    generated.public_key,
                    generated.fingerprint,
                    Some(generated.private_key),
                )
            }
            KeySource::Import(raw) => {
                let parsed = validate_public_key(&raw)?;
                let fingerprint = parsed
                    .fingerprint()
                    .map_err(ValidationError::from)?;
                (raw.trim().to_string(), fingerprint, None)
            }
        };

        let keypair = Keypair {
            user_id: user_id.to_string(),
            name,
            public_key,
            fingerprint,
            created_at: Utc::now(),
        };
        self.store.create(&keypair).await?;

        info!(
            user_id = %user_id,
            name = %keypair.name,
            fingerprint = %keypair.fingerprint,
            generated = private_key.is_some(),
            "Keypair created"
        );

        Ok(CreatedKeypair {
            keypair,
            private_key,
        })
    }

    /// Delete a keypair; `NotFound` if the user has no keypair by that name.
    pub async fn delete(&self, user_id: &str, name: &str) -> Result<()> {
        self.store.delete(user_id, name).await?;
        info!(user_id = %user_id, name = %name, "Keypair deleted");
        Ok(())
    }

    /// Look up one keypair. Never carries a private key.
    pub async fn get(&self, user_id: &str, name: &str) -> Result<Keypair> {
        debug!(user_id = %user_id, name = %name, "Keypair lookup");
        Ok(self.store.get(user_id, name).await?)
    }

    /// All of a user's keypairs. Never carries private keys.
    pub async fn list(&self, user_id: &str) -> Result<Vec<Keypair>> {
        let keypairs = self.store.list(user_id).await?;
        debug!(user_id = %user_id, count = keypairs.len(), "Keypairs listed");
        Ok(keypairs)
    }
}

/// Key generation is CPU-bound (RSA especially), so it runs off the async
/// workers and before any store access.
async fn generate(key_type: KeyType) -> Result<GeneratedKeypair> {
    tokio::task::spawn_blocking(move || generate_keypair(key_type))
        .await
        .map_err(generation_failed)?
        .map_err(generation_failed)
}

/// Failures while producing key material are server faults, never client input errors.
fn generation_failed(err: impl std::fmt::Display) -> KeypairError {
    KeypairError::KeyGenerationFailed {
        reason: err.to_string(),
    }
}
