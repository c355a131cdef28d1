use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::traits::{PublishRequest, Transport};
use crate::errors::{AppError, AppResult};

const USER_AGENT: &str = concat!("ntfy-publish/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> AppResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Use a preconfigured client, e.g. one with a timeout or a proxy
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn header_map(headers: &[(String, String)]) -> AppResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| AppError::invalid_header(name, e))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| AppError::invalid_header(name, e))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: PublishRequest) -> AppResult<Value> {
        let headers = Self::header_map(&request.headers)?;

        debug!(
            method = %request.method,
            url = %request.url,
            headers = ?request.headers.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            body_len = request.body.len(),
            "Sending ntfy request"
        );

        let response = self
            .client
            .request(request.method, request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await?;

        Ok(response.json::<Value>().await?)
    }
}
