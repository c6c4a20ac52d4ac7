use reqwest::StatusCode;
use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ChainbaseError {
    #[snafu(display("Invalid base url {url}: {source}"))]
    InvalidBaseUrl { url: String, source: url::ParseError },

    #[snafu(display("Cannot build http client: {source}"))]
    HttpClient { source: reqwest::Error },

    #[snafu(display("Request to {endpoint} failed: {source}"))]
    Request {
        endpoint: String,
        source: reqwest::Error,
    },

    #[snafu(display("Cannot read response body: {source}"))]
    ReadBody { source: reqwest::Error },

    #[snafu(display("Http response has an error: {status} {body}"))]
    UnexpectedStatus { status: StatusCode, body: String },

    #[snafu(display("Cannot decode response: {source}"))]
    DecodeResponse { source: serde_json::Error },

    #[snafu(display("Response has an error: {code} {message}"))]
    Api { code: i64, message: String },

    #[snafu(display("Response has no data"))]
    MissingData,
}

pub type ChainbaseResult<T> = std::result::Result<T, ChainbaseError>;
