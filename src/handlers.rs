use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use rand::rngs::OsRng;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{Result, WheelError};
use crate::health::{HealthChecker, HealthStatus};
use crate::id_generator::is_valid_wheel_id;
use crate::kv::KvStore;
use crate::response::{
    CreateWheelResponse, HealthResponse, SpinCountResponse, SpinResponse, WheelResponse,
};
use crate::sanitizer::{claims_existing_wheel, sanitize};
use crate::selection::select_winner;
use crate::spin_counter::SpinCounter;
use crate::theme::{format_timer, random_phrase, slice_color};
use crate::wheel::{WheelConfig, DEFAULT_TIMER_SECS};
use crate::wheel_store::WheelStore;

/// Shared application state. Holds no per-wheel data; everything lives in
/// the key-value store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    store: Option<Arc<dyn KvStore>>,
}

impl AppState {
    pub fn new(config: Config, store: Option<Arc<dyn KvStore>>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn store(&self) -> Option<Arc<dyn KvStore>> {
        self.store.clone()
    }

    fn kv(&self) -> Result<Arc<dyn KvStore>> {
        self.store.clone().ok_or_else(|| {
            WheelError::StoreUnavailable("Key-value store not configured".to_string())
        })
    }

    pub fn wheels(&self) -> Result<WheelStore> {
        Ok(WheelStore::with_ttl(self.kv()?, self.config.wheel_ttl_secs))
    }

    pub fn spins(&self) -> Result<SpinCounter> {
        Ok(SpinCounter::new(self.kv()?))
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub id: Option<String>,
}

/// Create or overwrite a wheel from an untrusted payload
pub async fn create_wheel(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CreateWheelResponse>> {
    let wheels = state.wheels()?;

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| WheelError::InvalidRequest("Invalid JSON".to_string()))?;
    let Some(data) = payload.as_object() else {
        return Err(WheelError::InvalidRequest("Invalid request body".to_string()));
    };

    let mut config = sanitize(&payload);
    if claims_existing_wheel(data) {
        wheels.resolve_created_at(&mut config).await?;
    }

    let config = wheels.create(config).await?;
    tracing::info!(
        wheel_id = %config.id,
        participants = config.participants.len(),
        "Wheel saved"
    );

    Ok(Json(CreateWheelResponse::new(config)))
}

/// Fetch a wheel, refreshing its expiry
pub async fn get_wheel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WheelResponse>> {
    if !is_valid_wheel_id(&id) {
        return Err(WheelError::InvalidId);
    }

    let config = state.wheels()?.fetch(&id).await?;
    Ok(Json(WheelResponse { config }))
}

/// Draw a winner from a stored wheel. The wheel itself is not modified;
/// clients deactivate the winner and save the wheel themselves.
pub async fn spin_wheel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SpinResponse>> {
    if !is_valid_wheel_id(&id) {
        return Err(WheelError::InvalidId);
    }

    let config = state.wheels()?.fetch(&id).await?;
    let result = select_winner(&config.participants)?;

    let color = result.participant.color.clone().unwrap_or_else(|| {
        slice_color(result.slot, config.dark_mode, config.color_scheme).to_string()
    });

    tracing::debug!(wheel_id = %id, slot = result.slot, "Winner drawn");

    Ok(Json(SpinResponse {
        participant: result.participant,
        angle: result.angle,
        phrase: random_phrase(config.dark_mode, &mut OsRng).to_string(),
        slice_color: color,
    }))
}

/// Global spin count. Any store problem reads as zero.
pub async fn get_spins(State(state): State<AppState>) -> Json<SpinCountResponse> {
    let count = match state.spins() {
        Ok(counter) => counter.read().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Spin count unavailable, reporting 0");
            0
        }),
        Err(_) => 0,
    };

    Json(SpinCountResponse { count })
}

pub async fn record_spin(State(state): State<AppState>) -> Result<Json<SpinCountResponse>> {
    let count = state.spins()?.increment().await?;
    Ok(Json(SpinCountResponse { count }))
}

/// Page load. A missing, malformed, expired or unreadable id sends the
/// browser back to a fresh wheel.
pub async fn wheel_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let id = match query.id.as_deref() {
        None | Some("") => return render_page(None),
        Some(id) => id,
    };

    if !is_valid_wheel_id(id) {
        return redirect_home();
    }

    let Ok(wheels) = state.wheels() else {
        return render_page(None);
    };

    match wheels.fetch(id).await {
        Ok(config) => render_page(Some(&config)),
        Err(e) => {
            tracing::warn!(wheel_id = %id, error = %e, "Redirecting to a fresh wheel");
            redirect_home()
        }
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthChecker::new(state.store()).check_health().await)
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let checker = HealthChecker::new(state.store());

    if checker.is_store_available().await {
        (StatusCode::OK, Json(HealthResponse::healthy()))
    } else {
        (StatusCode::OK, Json(HealthResponse::degraded()))
    }
}

fn redirect_home() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/")]).into_response()
}

fn render_page(config: Option<&WheelConfig>) -> Response {
    Html(page_html(config)).into_response()
}

fn page_html(config: Option<&WheelConfig>) -> String {
    // Escaped so the JSON cannot close the surrounding script element.
    let data = serde_json::to_string(&config)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");

    let timer = format_timer(config.map_or(DEFAULT_TIMER_SECS, |c| c.timer_duration));

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Spin the Wheel</title>
</head>
<body>
<main id="wheel" data-timer="{timer}"></main>
<script id="wheel-config" type="application/json">{data}</script>
</body>
</html>
"#
    )
}
