use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use wheelshare::{create_app, AppState, Config, KvStore, MemoryStore};

async fn spawn_server() -> SocketAddr {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    let app = create_app(AppState::new(Config::in_memory(), Some(store)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    addr
}

#[tokio::test]
async fn test_share_and_spin_over_http() {
    let addr = spawn_server().await;
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();
    let base = format!("http://{addr}");

    let created: Value = client
        .post(format!("{base}/api/wheel"))
        .json(&json!({
            "participants": [{ "name": "Ada" }, { "name": "Grace" }],
            "soundEnabled": false,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();
    assert_eq!(created["config"]["soundEnabled"], false);

    let response = client
        .get(format!("{base}/api/wheel/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response.headers().contains_key("x-request-id"));

    let spin: Value = client
        .post(format!("{base}/api/wheel/{id}/spin"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let winner = spin["participant"]["name"].as_str().unwrap();
    assert!(winner == "Ada" || winner == "Grace");

    let counted: Value = client
        .post(format!("{base}/api/spins"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(counted["count"], 1);

    let response = client
        .get(format!("{base}/?id=Zzzz0000"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 302);
}
