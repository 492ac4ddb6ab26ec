//! Persistence of wheels by id with a sliding expiry.
//!
//! There is no ownership token: the 8-character id is the credential, and
//! anyone holding it can read or overwrite the wheel. Records are never
//! deleted explicitly; they disappear once the store's TTL lapses. Writes are
//! last-writer-wins.

use std::sync::Arc;

use crate::error::{Result, WheelError};
use crate::id_generator::is_valid_wheel_id;
use crate::kv::KvStore;
use crate::wheel::{now_millis, WheelConfig};

/// 60 days.
pub const WHEEL_TTL_SECS: u64 = 60 * 60 * 24 * 60;

#[derive(Clone)]
pub struct WheelStore {
    kv: Arc<dyn KvStore>,
    ttl_secs: u64,
}

impl WheelStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self::with_ttl(kv, WHEEL_TTL_SECS)
    }

    pub fn with_ttl(kv: Arc<dyn KvStore>, ttl_secs: u64) -> Self {
        Self { kv, ttl_secs }
    }

    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Store `config` under its id, replacing any previous record.
    pub async fn create(&self, config: WheelConfig) -> Result<WheelConfig> {
        if !is_valid_wheel_id(&config.id) {
            return Err(WheelError::InvalidId);
        }

        self.write(&config).await?;
        tracing::debug!(wheel_id = %config.id, participants = config.participants.len(), "Wheel stored");
        Ok(config)
    }

    /// Load a wheel and refresh both `last_accessed_at` and its expiry. A
    /// record that fails to parse is returned as `Corrupted` and left to
    /// expire untouched.
    pub async fn fetch(&self, id: &str) -> Result<WheelConfig> {
        self.fetch_at(id, now_millis()).await
    }

    pub async fn fetch_at(&self, id: &str, now_ms: i64) -> Result<WheelConfig> {
        if !is_valid_wheel_id(id) {
            return Err(WheelError::InvalidId);
        }

        let raw = self.kv.get(id).await?.ok_or(WheelError::NotFound)?;

        let mut config: WheelConfig = serde_json::from_str(&raw)
            .map_err(|e| WheelError::Corrupted(format!("wheel {}: {}", id, e)))?;

        config.touch(now_ms);
        self.write(&config).await?;

        Ok(config)
    }

    /// Decide `created_at` for a payload that claimed an existing id: the
    /// stored record's value wins, and an id with no readable record counts
    /// as a brand-new wheel. Does not refresh the record's expiry.
    pub async fn resolve_created_at(&self, config: &mut WheelConfig) -> Result<()> {
        let stored = match self.kv.get(&config.id).await? {
            Some(raw) => serde_json::from_str::<WheelConfig>(&raw).ok(),
            None => None,
        };

        config.created_at = match stored {
            Some(existing) => existing.created_at.min(config.last_accessed_at),
            None => config.last_accessed_at,
        };
        Ok(())
    }

    async fn write(&self, config: &WheelConfig) -> Result<()> {
        let raw = serde_json::to_string(config)
            .map_err(|e| WheelError::Corrupted(format!("wheel {}: {}", config.id, e)))?;
        self.kv.put(&config.id, &raw, Some(self.ttl_secs)).await
    }
}
