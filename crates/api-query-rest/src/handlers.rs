use crate::error::{self as query_error, QueryApiResult};
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use core_native::{ColumnDescriptor, ResultSet};
use http::{HeaderMap, header};
use snafu::ResultExt;
use std::net::SocketAddr;

const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// Runs the statement in the request body against the warehouse and answers with
/// the result in the native columnar format.
#[tracing::instrument(level = "debug", skip(state, headers, body))]
pub async fn query(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> QueryApiResult<Response> {
    let statement = std::str::from_utf8(&body).context(query_error::InvalidStatementSnafu)?;

    tracing::info!(
        client_ip = %client_ip(&headers, peer),
        user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default(),
        statement,
        "new query request"
    );

    state.limiter.acquire().await;

    let data = state
        .warehouse
        .query(statement)
        .await
        .context(query_error::WarehouseSnafu)?;

    if !data.err_msg.is_empty() {
        tracing::warn!(task_id = %data.task_id, err_msg = %data.err_msg, "warehouse reported an error message");
    }
    if usize::try_from(data.rows).ok() != Some(data.result.len()) {
        tracing::warn!(
            task_id = %data.task_id,
            declared = data.rows,
            returned = data.result.len(),
            "warehouse row count does not match its result"
        );
    }

    let columns = data
        .meta
        .into_iter()
        .map(|column| ColumnDescriptor::new(column.name, column.r#type))
        .collect();
    let result =
        ResultSet::from_json_rows(columns, data.result).context(query_error::ModelSnafu)?;
    let blob = core_native::encode(&result).context(query_error::EncodeSnafu)?;

    Ok(([(header::CONTENT_TYPE, MIME_OCTET_STREAM)], blob).into_response())
}

pub async fn health() -> Json<&'static str> {
    Json("OK")
}

/// Address of the original client, honouring the usual proxy headers.
fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> String {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToString::to_string)
    };
    header_value("x-forwarded-for")
        .or_else(|| header_value("x-real-ip"))
        .unwrap_or_else(|| peer.ip().to_string())
}
