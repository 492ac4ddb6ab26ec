use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wheelshare::{create_app, AppState, Config, KvStore, MemoryStore};

fn app_with_store() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(Config::in_memory(), Some(store.clone() as Arc<dyn KvStore>));
    (create_app(state), store)
}

fn app_without_store() -> Router {
    create_app(AppState::new(Config::default(), None))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create_wheel(app: &Router, payload: Value) -> Value {
    let (status, body) = send(app, post_json("/api/wheel", payload.to_string())).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}

#[tokio::test]
async fn test_create_and_fetch_wheel() {
    let (app, _) = app_with_store();

    let created = create_wheel(
        &app,
        json!({
            "participants": [
                { "name": "  Ada " },
                { "name": "" },
                { "name": "Grace", "active": false, "color": "#123456" },
            ],
            "timerDuration": 5,
            "colorScheme": "neon",
            "darkMode": true,
        }),
    )
    .await;

    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["config"]["id"], id.as_str());
    assert_eq!(created["config"]["timerDuration"], 10);
    assert_eq!(created["config"]["colorScheme"], "default");
    assert_eq!(created["config"]["participants"].as_array().unwrap().len(), 2);
    assert_eq!(created["config"]["participants"][0]["name"], "Ada");

    let (status, body) = send(&app, get(&format!("/api/wheel/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["participants"], created["config"]["participants"]);
    assert_eq!(body["config"]["createdAt"], created["config"]["createdAt"]);
    assert!(
        body["config"]["lastAccessedAt"].as_i64().unwrap()
            >= created["config"]["lastAccessedAt"].as_i64().unwrap()
    );
}

#[tokio::test]
async fn test_update_keeps_id_and_created_at() {
    let (app, _) = app_with_store();
    let created = create_wheel(&app, json!({ "participants": [{ "name": "Ada" }] })).await;
    let id = created["id"].clone();

    let mut edit = created["config"].clone();
    edit["timerDuration"] = json!(600);
    edit["createdAt"] = json!(1);
    let updated = create_wheel(&app, edit).await;

    assert_eq!(updated["id"], id);
    assert_eq!(updated["config"]["timerDuration"], 600);
    // The stored creation time wins over whatever the client sent.
    assert_eq!(updated["config"]["createdAt"], created["config"]["createdAt"]);
}

#[tokio::test]
async fn test_unknown_client_id_is_a_new_wheel() {
    let (app, _) = app_with_store();
    let created = create_wheel(&app, json!({ "id": "Unknown1", "createdAt": 1 })).await;

    assert_eq!(created["id"], "Unknown1");
    assert_eq!(created["config"]["createdAt"], created["config"]["lastAccessedAt"]);
}

#[tokio::test]
async fn test_create_rejects_bad_bodies() {
    let (app, store) = app_with_store();

    let (status, body) = send(&app, post_json("/api/wheel", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid JSON");

    for payload in ["[]", "42", "\"wheel\"", "null"] {
        let (status, body) = send(&app, post_json("/api/wheel", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert_eq!(body["message"], "Invalid request body");
    }

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_body_limit() {
    let (app, _) = app_with_store();
    let huge = json!({ "participants": [{ "name": "x".repeat(200 * 1024) }] });
    let response = app
        .clone()
        .oneshot(post_json("/api/wheel", huge.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_fetch_errors() {
    let (app, store) = app_with_store();

    let (status, body) = send(&app, get("/api/wheel/short")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_id");

    let (status, body) = send(&app, get("/api/wheel/Abcd1234")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Wheel not found");

    store.put("Bad12345", "not a wheel", Some(60)).await.unwrap();
    let (status, body) = send(&app, get("/api/wheel/Bad12345")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "corrupted");
}

#[tokio::test]
async fn test_spin_endpoint() {
    let (app, _) = app_with_store();
    let created = create_wheel(
        &app,
        json!({ "participants": [
            { "id": "a", "name": "Ada" },
            { "id": "b", "name": "Bob", "active": false },
            { "id": "c", "name": "Cy", "color": "#00ff00" },
        ]}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    for _ in 0..50 {
        let (status, body) = send(&app, post_json(&format!("/api/wheel/{id}/spin"), "")).await;
        assert_eq!(status, StatusCode::OK);

        let winner = body["participant"]["id"].as_str().unwrap();
        assert_ne!(winner, "b");

        let slot = match winner {
            "a" => 0.0,
            "c" => 2.0,
            other => panic!("unexpected winner {other}"),
        };
        let resting = body["angle"].as_f64().unwrap() % 360.0;
        assert!(resting > slot * 120.0 && resting < (slot + 1.0) * 120.0);

        assert!(!body["phrase"].as_str().unwrap().is_empty());
        if winner == "c" {
            assert_eq!(body["sliceColor"], "#00ff00");
        } else {
            assert_eq!(body["sliceColor"], "#FF6B6B");
        }
    }
}

#[tokio::test]
async fn test_spin_with_nobody_left() {
    let (app, _) = app_with_store();
    let created = create_wheel(
        &app,
        json!({ "participants": [{ "name": "Ada", "active": false }] }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, post_json(&format!("/api/wheel/{id}/spin"), "")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_active_participants");
}

#[tokio::test]
async fn test_spin_counter() {
    let (app, _) = app_with_store();

    let (status, body) = send(&app, get("/api/spins")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    for expected in 1..=3 {
        let (status, body) = send(&app, post_json("/api/spins", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], expected);
    }

    let (_, body) = send(&app, get("/api/spins")).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn test_without_store() {
    let app = app_without_store();

    let (status, body) = send(&app, get("/api/spins")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);

    let (status, body) = send(&app, post_json("/api/spins", "")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "KV not available");

    let (status, _) = send(&app, post_json("/api/wheel", "{}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, get("/api/wheel/Abcd1234")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, get("/api/wheel/nope")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_routes() {
    let (app, _) = app_with_store();

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for uri in ["/?id=bad", "/?id=Abcd1234"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/");
    }

    let created = create_wheel(&app, json!({ "participants": [{ "name": "Ada" }] })).await;
    let id = created["id"].as_str().unwrap();
    let response = app.clone().oneshot(get(&format!("/?id={id}"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains(id));
    assert!(html.contains("Ada"));
}

#[tokio::test]
async fn test_page_without_store_renders_fresh_wheel() {
    let app = app_without_store();
    let response = app.clone().oneshot(get("/?id=Abcd1234")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_endpoints() {
    let (app, _) = app_with_store();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store_connected"], true);

    let (_, body) = send(&app_without_store(), get("/health")).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_request_id_header() {
    let (app, _) = app_with_store();
    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
