use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{Client, RedisError, RedisResult};

use crate::error::{Result, WheelError};
use crate::kv::KvStore;

/// Redis-backed [`KvStore`]. The connection manager reconnects on its own
/// and is cheap to clone per command.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            WheelError::Configuration(format!("Failed to create Redis client: {}", e))
        })?;

        let connection = ConnectionManager::new(client).await.map_err(|e| {
            WheelError::StoreUnavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let result: RedisResult<Option<String>> =
            redis::cmd("GET").arg(key).query_async(&mut conn).await;
        result.map_err(|e| WheelError::StoreUnavailable(format!("GET failed: {}", e)))
    }

    async fn put(&self, key: &str, value: &str, ttl_secs: Option<u64>) -> Result<()> {
        let mut conn = self.connection.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl_secs {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| WheelError::StoreUnavailable(format!("SET failed: {}", e)))
    }

    async fn incr(&self, key: &str) -> Result<u64> {
        let mut conn = self.connection.clone();
        let value: i64 = redis::cmd("INCR")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| incr_error(key, e))?;

        u64::try_from(value)
            .map_err(|_| WheelError::Corrupted(format!("counter '{key}' went negative")))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
        result
            .map(|_| ())
            .map_err(|e| WheelError::StoreUnavailable(format!("Ping failed: {}", e)))
    }
}

/// A value Redis refuses to increment is bad data, not an outage.
fn incr_error(key: &str, err: RedisError) -> WheelError {
    let not_an_integer = err.code() == Some("WRONGTYPE")
        || err
            .detail()
            .is_some_and(|detail| detail.contains("not an integer"));

    if not_an_integer {
        WheelError::Corrupted(format!("value at '{key}' is not an integer"))
    } else {
        WheelError::StoreUnavailable(format!("INCR failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    #[test]
    fn test_incr_on_text_is_corrupted() {
        let err = RedisError::from((
            ErrorKind::ResponseError,
            "An error was signalled by the server",
            "value is not an integer or out of range".to_string(),
        ));
        assert!(matches!(incr_error("n", err), WheelError::Corrupted(_)));
    }

    #[test]
    fn test_incr_connection_failure_is_unavailable() {
        let err = RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "connection reset",
        ));
        assert!(matches!(
            incr_error("n", err),
            WheelError::StoreUnavailable(_)
        ));
    }
}
