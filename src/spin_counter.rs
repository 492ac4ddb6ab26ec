use std::sync::Arc;

use crate::error::{Result, WheelError};
use crate::kv::KvStore;

/// Key of the global counter. Cannot collide with wheel ids, which are
/// exactly eight alphanumeric characters.
pub const SPIN_COUNT_KEY: &str = "global_spin_count";

/// Total spins across all wheels. Stored as a decimal string with no expiry.
#[derive(Clone)]
pub struct SpinCounter {
    kv: Arc<dyn KvStore>,
}

impl SpinCounter {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// Record one spin. Uses the store's atomic increment, so concurrent
    /// spins are never lost.
    pub async fn increment(&self) -> Result<u64> {
        let count = self.kv.incr(SPIN_COUNT_KEY).await?;
        tracing::debug!(count, "Spin recorded");
        Ok(count)
    }

    pub async fn read(&self) -> Result<u64> {
        match self.kv.get(SPIN_COUNT_KEY).await? {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| WheelError::Corrupted(format!("spin counter holds '{}'", raw))),
            None => Ok(0),
        }
    }
}
