use crate::error::{
    ApiSnafu, ChainbaseResult, DecodeResponseSnafu, HttpClientSnafu, InvalidBaseUrlSnafu,
    MissingDataSnafu, ReadBodySnafu, RequestSnafu, UnexpectedStatusSnafu,
};
use crate::models::{PaginateRequest, QueryRequest, Response, WarehouseData};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use snafu::prelude::*;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.chainbase.online/";
pub const DEFAULT_API_KEY: &str = "demo";
pub const DEFAULT_USER_AGENT: &str = "chainbase-connector";

const QUERY_ENDPOINT: &str = "v1/dw/query";
const API_KEY_HEADER: &str = "X-API-Key";
const MIME_JSON_UTF8: &str = "application/json; charset=UTF-8";
const CODE_OK: i64 = 0;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Access to the Chainbase data warehouse.
#[async_trait::async_trait]
pub trait WarehouseService: Send + Sync {
    /// Runs a SQL statement and returns the first page of its result.
    async fn query(&self, statement: &str) -> ChainbaseResult<WarehouseData>;

    /// Fetches a further page of a previous query.
    async fn paginate(&self, task_id: &str, page: u64) -> ChainbaseResult<WarehouseData>;
}

pub struct ChainbaseClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
    user_agent: String,
}

impl ChainbaseClient {
    pub fn new(config: ClientConfig) -> ChainbaseResult<Self> {
        let endpoint = Url::parse(&config.base_url)
            .and_then(|base_url| base_url.join(QUERY_ENDPOINT))
            .context(InvalidBaseUrlSnafu {
                url: &config.base_url,
            })?;
        let http = reqwest::Client::builder()
            .build()
            .context(HttpClientSnafu)?;
        Ok(Self {
            http,
            endpoint,
            api_key: config.api_key,
            user_agent: config.user_agent,
        })
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post<B: Serialize + Sync>(&self, body: &B) -> ChainbaseResult<WarehouseData> {
        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, MIME_JSON_UTF8)
            .header(CONTENT_TYPE, MIME_JSON_UTF8)
            .json(body);
        if !self.user_agent.is_empty() {
            request = request.header(USER_AGENT, &self.user_agent);
        }
        if !self.api_key.is_empty() {
            request = request.header(API_KEY_HEADER, &self.api_key);
        }

        let response = request.send().await.context(RequestSnafu {
            endpoint: self.endpoint.as_str(),
        })?;
        let status = response.status();
        let body = response.bytes().await.context(ReadBodySnafu)?;
        ensure!(
            status == StatusCode::OK,
            UnexpectedStatusSnafu {
                status,
                body: String::from_utf8_lossy(&body),
            }
        );

        let envelope: Response<WarehouseData> =
            serde_json::from_slice(&body).context(DecodeResponseSnafu)?;
        ensure!(
            envelope.code == CODE_OK,
            ApiSnafu {
                code: envelope.code,
                message: envelope.message,
            }
        );
        let data = envelope.data.context(MissingDataSnafu)?;
        tracing::debug!(
            task_id = %data.task_id,
            rows = data.rows,
            rows_read = data.rows_read,
            bytes_read = data.bytes_read,
            elapsed = data.elapsed,
            next_page = data.next_page,
            "warehouse responded"
        );
        Ok(data)
    }
}

#[async_trait::async_trait]
impl WarehouseService for ChainbaseClient {
    #[tracing::instrument(name = "ChainbaseClient::query", level = "debug", skip(self), err)]
    async fn query(&self, statement: &str) -> ChainbaseResult<WarehouseData> {
        self.post(&QueryRequest { query: statement }).await
    }

    #[tracing::instrument(name = "ChainbaseClient::paginate", level = "debug", skip(self), err)]
    async fn paginate(&self, task_id: &str, page: u64) -> ChainbaseResult<WarehouseData> {
        self.post(&PaginateRequest { task_id, page }).await
    }
}
