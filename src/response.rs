use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::wheel::{Participant, WheelConfig};

#[derive(Debug, Serialize)]
pub struct CreateWheelResponse {
    pub id: String,
    pub config: WheelConfig,
}

impl CreateWheelResponse {
    pub fn new(config: WheelConfig) -> Self {
        Self {
            id: config.id.clone(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WheelResponse {
    pub config: WheelConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResponse {
    pub participant: Participant,
    pub angle: f64,
    pub phrase: String,
    pub slice_color: String,
}

#[derive(Debug, Serialize)]
pub struct SpinCountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub store_connected: bool,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self::with_status("healthy", true)
    }

    pub fn degraded() -> Self {
        Self::with_status("degraded", false)
    }

    fn with_status(status: &str, store_connected: bool) -> Self {
        Self {
            status: status.to_string(),
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store_connected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_store_flag() {
        let ready = HealthResponse::healthy();
        assert_eq!(ready.status, "healthy");
        assert!(ready.store_connected);

        let degraded = HealthResponse::degraded();
        assert_eq!(degraded.status, "degraded");
        assert!(!degraded.store_connected);
    }
}
