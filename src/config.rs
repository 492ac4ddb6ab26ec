use clap::Parser;
use std::net::SocketAddr;
use validator::Validate;

use crate::wheel_store::WHEEL_TTL_SECS;

#[derive(Debug, Clone, Parser, Validate)]
#[command(name = "wheelshare", version, about = "Shareable spin-the-wheel service")]
pub struct Config {
    /// Server bind address
    #[arg(long, env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind_addr: SocketAddr,

    /// Redis connection URL. Without it (and without --memory-store) the
    /// service runs with no store: reads fall back, writes fail.
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Keep wheels in process memory instead of Redis
    #[arg(long, env = "MEMORY_STORE")]
    pub memory_store: bool,

    /// Inactivity window after which a wheel expires
    #[arg(long, env = "WHEEL_TTL_SECS", default_value_t = WHEEL_TTL_SECS)]
    #[validate(range(min = 60))]
    pub wheel_ttl_secs: u64,

    /// Largest accepted request body
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 64 * 1024)]
    #[validate(range(min = 1024, max = 10485760))]
    pub max_body_bytes: usize,

    /// Log level for the service's own targets
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    #[validate(length(min = 1))]
    pub log_level: String,
}

impl Config {
    /// Load configuration from the command line and environment
    pub fn from_env() -> Self {
        Config::parse()
    }

    /// Configuration backed by an in-memory store, for tests and local runs
    pub fn in_memory() -> Self {
        Self {
            memory_store: true,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            redis_url: None,
            memory_store: false,
            wheel_ttl_secs: WHEEL_TTL_SECS,
            max_body_bytes: 64 * 1024,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let config = Config::try_parse_from([
            "wheelshare",
            "--bind-addr",
            "0.0.0.0:8080",
            "--redis-url",
            "redis://localhost:6379",
            "--wheel-ttl-secs",
            "3600",
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert_eq!(config.wheel_ttl_secs, 3600);
        assert!(!config.memory_store);
    }

    #[test]
    fn test_default_ttl_is_sixty_days() {
        assert_eq!(Config::default().wheel_ttl_secs, 5_184_000);
    }

    #[test]
    fn test_field_bounds() {
        let config = Config {
            wheel_ttl_secs: 5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
