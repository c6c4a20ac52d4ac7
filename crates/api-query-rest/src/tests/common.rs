#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::limiter::RateLimiter;
use crate::router::create_router;
use crate::state::AppState;
use core_chainbase::{
    ChainbaseError, ChainbaseResult, WarehouseColumn, WarehouseData, WarehouseService,
};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex};

pub enum Reply {
    Data(WarehouseData),
    ApiError { code: i64, message: String },
}

/// Warehouse double that answers every statement with the same reply.
pub struct FakeWarehouse {
    reply: Reply,
    pub statements: Mutex<Vec<String>>,
}

impl FakeWarehouse {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            statements: Mutex::new(Vec::new()),
        })
    }

    fn answer(&self) -> ChainbaseResult<WarehouseData> {
        match &self.reply {
            Reply::Data(data) => Ok(data.clone()),
            Reply::ApiError { code, message } => Err(ChainbaseError::Api {
                code: *code,
                message: message.clone(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl WarehouseService for FakeWarehouse {
    async fn query(&self, statement: &str) -> ChainbaseResult<WarehouseData> {
        self.statements.lock().unwrap().push(statement.to_string());
        self.answer()
    }

    async fn paginate(&self, task_id: &str, page: u64) -> ChainbaseResult<WarehouseData> {
        self.statements
            .lock()
            .unwrap()
            .push(format!("{task_id}#{page}"));
        self.answer()
    }
}

pub fn warehouse_data(meta: &[(&str, &str)], result: Value) -> WarehouseData {
    let Value::Array(rows) = result else {
        panic!("result must be an array");
    };
    let result: Vec<Map<String, Value>> = rows
        .into_iter()
        .map(|row| match row {
            Value::Object(map) => map,
            other => panic!("row must be an object, got {other}"),
        })
        .collect();
    WarehouseData {
        task_id: "6d47920516f0451bbce84280d609de85".to_string(),
        rows: u64::try_from(result.len()).unwrap(),
        meta: meta
            .iter()
            .map(|(name, r#type)| WarehouseColumn {
                name: (*name).to_string(),
                r#type: (*r#type).to_string(),
            })
            .collect(),
        result,
        ..WarehouseData::default()
    }
}

pub fn unlimited() -> Arc<RateLimiter> {
    let limit = NonZeroU32::new(1000).unwrap();
    Arc::new(RateLimiter::new(limit, limit))
}

pub async fn run_test_server(
    warehouse: Arc<dyn WarehouseService>,
    limiter: Arc<RateLimiter>,
) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router()
        .with_state(AppState::new(warehouse, limiter))
        .into_make_service_with_connect_info::<SocketAddr>();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}
