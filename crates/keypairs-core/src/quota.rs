// ABOUTME: Per-user quota gate for keypair creation.
// ABOUTME: Usage is counted on demand from the store; limits come from an explicit QuotaConfig.

use crate::config::QuotaConfig;
use crate::error::{KeypairError, Result};
use crate::store::KeypairStore;
use std::fmt;
use tracing::warn;

/// Countable resources guarded by quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Keypairs,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Keypairs => f.write_str("key_pairs"),
        }
    }
}

/// Checks a user's live usage against their limit before a create.
///
/// The check is advisory: two concurrent creates can both pass it and leave the
/// user one over the limit. The store's uniqueness constraint is what prevents
/// duplicate records; an overshoot is corrected the next time usage is counted.
#[derive(Debug, Clone, Default)]
pub struct QuotaGuard {
    config: QuotaConfig,
}

impl QuotaGuard {
    pub fn new(config: QuotaConfig) -> Self {
        Self { config }
    }

    /// Effective limit for a user: per-user override, else the default.
    pub fn limit_for(&self, user_id: &str) -> u32 {
        self.config
            .per_user
            .get(user_id)
            .copied()
            .unwrap_or(self.config.default_limit)
    }

    /// Fail with `QuotaExceeded` when the user's usage is at or above the limit.
    ///
    /// Nothing is held after a successful check: the record written by the
    /// subsequent create is itself the reservation, so there is no separate
    /// counter to drift from the store.
    pub async fn check_and_reserve<S>(
        &self,
        store: &S,
        user_id: &str,
        resource: ResourceKind,
    ) -> Result<()>
    where
        S: KeypairStore + ?Sized,
    {
        let limit = self.limit_for(user_id);
        let usage = match resource {
            ResourceKind::Keypairs => store.count(user_id).await?,
        };

        if usage >= limit as usize {
            warn!(user_id = %user_id, %resource, usage, limit, "Quota exceeded");
            return Err(KeypairError::QuotaExceeded {
                user_id: user_id.to_string(),
                resource,
                limit,
            });
        }
        Ok(())
    }
}
