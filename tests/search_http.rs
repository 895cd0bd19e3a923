//! Search box against a live HTTP endpoint

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use risk_view::logic::search::{ResultList, SessionState};
use risk_view::{http_engine, HttpTransport, SearchError, SearchTransport, ViewConfig};

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let customers = [
        ("C-102", "Smith", "France", 81.0, "high"),
        ("C-215", "Jones", "Spain", 12.0, "low"),
        ("C-318", "Smirnov", "Germany", 55.0, "medium"),
    ];
    let results: Vec<Value> = customers
        .iter()
        .filter(|(id, name, ..)| name.to_lowercase().contains(&q) || id.to_lowercase().contains(&q))
        .map(|(id, name, geo, score, level)| {
            json!({
                "customer_id": id,
                "surname": name,
                "geography": geo,
                "gender": "Female",
                "risk_score": score,
                "risk_level": level,
                "driver": "Low tenure",
                "risk_url": "/dashboard/risk/",
            })
        })
        .collect();
    Json(json!({ "query": q, "count": results.len(), "results": results }))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(10)).await;
    Json(json!({ "results": [] }))
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/search", get(search))
        .route("/broken", get(broken))
        .route("/garbage", get(garbage))
        .route("/slow", get(slow));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr, path: &str) -> ViewConfig {
    ViewConfig {
        search_debounce_ms: 20,
        request_timeout_secs: Some(30),
        ..ViewConfig::with_search_url(format!("http://{}{}", addr, path))
    }
}

#[tokio::test]
async fn test_transport_decodes_payload() {
    let addr = spawn_server().await;
    let transport = HttpTransport::new(&config(addr, "/search")).unwrap();

    let payload = transport.search("smi", CancellationToken::new()).await.unwrap();
    assert_eq!(payload.count, Some(2));
    assert_eq!(payload.results[0].customer_id, "C-102");
    assert_eq!(payload.results[1].risk_level, "medium");
}

#[tokio::test]
async fn test_transport_maps_failures() {
    let addr = spawn_server().await;

    let broken = HttpTransport::new(&config(addr, "/broken")).unwrap();
    let err = broken.search("smi", CancellationToken::new()).await.unwrap_err();
    assert_eq!(err, SearchError::Status(500));

    let garbage = HttpTransport::new(&config(addr, "/garbage")).unwrap();
    let err = garbage.search("smi", CancellationToken::new()).await.unwrap_err();
    assert!(matches!(err, SearchError::Malformed(_)));
}

#[tokio::test]
async fn test_transport_aborts_on_cancel() {
    let addr = spawn_server().await;
    let transport = HttpTransport::new(&config(addr, "/slow")).unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = transport.search("smi", cancel).await.unwrap_err();
    assert!(err.is_superseded());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_engine_renders_remote_results() {
    let addr = spawn_server().await;
    let engine = http_engine(&config(addr, "/search")).unwrap();
    let mut rx = engine.subscribe();

    engine.on_query_change("sm");
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|list| list.is_visible()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(engine.state(), SessionState::Rendered);
    let list = engine.result_list();
    let entries = list.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].href, "/dashboard/risk/?q=C-102");
    assert!(entries[1].html.contains("Smirnov"));
}

#[tokio::test]
async fn test_engine_shows_unavailable_on_server_error() {
    let addr = spawn_server().await;
    let engine = http_engine(&config(addr, "/broken")).unwrap();
    let mut rx = engine.subscribe();

    engine.on_query_change("smith");
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|list| list.is_visible()))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(engine.result_list(), ResultList::Unavailable);
    assert_eq!(engine.state(), SessionState::Failed);
}
