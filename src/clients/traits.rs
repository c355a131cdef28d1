use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::errors::AppResult;

/// One outbound publish request, fully assembled
#[derive(Debug, Clone, PartialEq)]
pub struct PublishRequest {
    pub method: Method,
    pub url: Url,
    /// Header names are sent verbatim, in this order
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl PublishRequest {
    /// First header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes a publish request and decodes the response body as JSON
///
/// The client performs exactly one `execute` per send. Implementations own
/// timeouts and cancellation; the client neither retries nor inspects the
/// response status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: PublishRequest) -> AppResult<Value>;
}
