//! [`Transport`] over HTTP using [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::transport::{error_message, unwrap_envelope, ApiRequest, HttpMethod, Transport};

/// HTTP transport for a single biobank server.
pub struct ReqwestTransport {
    client: reqwest::Client,
    api_url: String,
    api_token: Option<String>,
}

impl ReqwestTransport {
    /// Build a transport with its own connection pool and the configured
    /// request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Create a transport reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self {
            client,
            api_url,
            api_token: None,
        }
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Turn a reply into its payload, or an [`ClientError::Api`] holding the
    /// server's error text.
    async fn parse_response(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| error_message(&v))
                .unwrap_or(body);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let body: Value = serde_json::from_str(&text)?;
        Ok(unwrap_envelope(body))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value, ClientError> {
        tracing::debug!(method = %request.method, path = %request.path, "Sending API request");

        let url = format!("{}{}", self.api_url, request.path);
        let mut builder = self
            .client
            .request(Self::method(request.method), url)
            .query(&request.query);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        Self::parse_response(response).await
    }
}
