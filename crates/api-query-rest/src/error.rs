use axum::{Json, response::IntoResponse};
use core_chainbase::ChainbaseError;
use core_native::{EncodingError, ModelError};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum QueryApiError {
    #[snafu(display("Query statement is not valid UTF-8: {source}"))]
    InvalidStatement { source: std::str::Utf8Error },

    #[snafu(display("Query chainbase api: {source}"))]
    Warehouse { source: ChainbaseError },

    #[snafu(display("Invalid result from chainbase api: {source}"))]
    Model { source: ModelError },

    #[snafu(display("Translate result for native format: {source}"))]
    Encode { source: EncodingError },
}

pub type QueryApiResult<T> = Result<T, QueryApiError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status_code: u16,
}

impl IntoResponse for QueryApiError {
    fn into_response(self) -> axum::response::Response {
        let code = match &self {
            Self::InvalidStatement { .. } => http::StatusCode::BAD_REQUEST,
            Self::Warehouse { .. } | Self::Model { .. } => http::StatusCode::BAD_GATEWAY,
            Self::Encode { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.to_string();
        tracing::error!(status = code.as_u16(), error = %message, "query request failed");

        let error = ErrorResponse {
            message,
            status_code: code.as_u16(),
        };
        (code, Json(error)).into_response()
    }
}
