#![allow(clippy::unwrap_used)]

use crate::app::create_app;
use api_query_rest::limiter::RateLimiter;
use api_query_rest::state::AppState;
use core_chainbase::{ChainbaseResult, WarehouseColumn, WarehouseData, WarehouseService};
use http::StatusCode;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

enum Behaviour {
    Answer,
    Stall,
    Panic,
}

struct StubWarehouse(Behaviour);

#[async_trait::async_trait]
impl WarehouseService for StubWarehouse {
    async fn query(&self, _statement: &str) -> ChainbaseResult<WarehouseData> {
        match self.0 {
            Behaviour::Answer => {}
            Behaviour::Stall => tokio::time::sleep(Duration::from_secs(30)).await,
            Behaviour::Panic => panic!("warehouse client bug"),
        }
        let Value::Object(row) = json!({"value": 1}) else {
            unreachable!()
        };
        Ok(WarehouseData {
            rows: 1,
            meta: vec![WarehouseColumn {
                name: "value".to_string(),
                r#type: "UInt8".to_string(),
            }],
            result: vec![row],
            ..WarehouseData::default()
        })
    }

    async fn paginate(&self, task_id: &str, _page: u64) -> ChainbaseResult<WarehouseData> {
        self.query(task_id).await
    }
}

async fn serve(behaviour: Behaviour, request_timeout: Duration) -> SocketAddr {
    let limiter = Arc::new(RateLimiter::with_burst(NonZeroU32::new(100).unwrap()));
    let state = AppState::new(Arc::new(StubWarehouse(behaviour)), limiter);
    let app =
        create_app(state, request_timeout).into_make_service_with_connect_info::<SocketAddr>();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn post_query(addr: SocketAddr) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .body("select 1")
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_layered_app_answers_queries() {
    let addr = serve(Behaviour::Answer, Duration::from_secs(10)).await;

    let response = post_query(addr).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "application/octet-stream"
    );
    let body = response.bytes().await.unwrap();
    assert_eq!(&body[..], b"\x01\x01\x05value\x05UInt8\x01");
}

#[tokio::test]
async fn test_layered_app_serves_health() {
    let addr = serve(Behaviour::Answer, Duration::from_secs(10)).await;

    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.json::<String>().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_slow_query_times_out() {
    let addr = serve(Behaviour::Stall, Duration::from_millis(100)).await;

    let response = post_query(addr).await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_panicking_handler_is_internal_error() {
    let addr = serve(Behaviour::Panic, Duration::from_secs(10)).await;

    let response = post_query(addr).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // the server keeps serving after a panic
    let response = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
