use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope shared by every Chainbase API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseData {
    pub task_id: String,
    pub rows: u64,
    pub rows_read: u64,
    pub bytes_read: u64,
    pub elapsed: f64,
    pub meta: Vec<WarehouseColumn>,
    pub result: Vec<Map<String, Value>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub err_msg: String,
    pub next_page: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseColumn {
    pub name: String,
    pub r#type: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PaginateRequest<'a> {
    pub task_id: &'a str,
    pub page: u64,
}
