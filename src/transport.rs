//! The HTTP seam: one request in, raw status and body out.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{DirectoryError, Result};

/// Header carrying the demonstration token when one is configured.
pub const DEMO_TOKEN_HEADER: &str = "X-Demo-Token";

/// A request relative to the collection endpoint.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// `None` targets the collection itself, `Some(id)` a single record.
    pub id: Option<u64>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn collection(method: Method) -> Self {
        Self {
            method,
            id: None,
            body: None,
        }
    }

    pub fn record(method: Method, id: u64) -> Self {
        Self {
            method,
            id: Some(id),
            body: None,
        }
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Status code and undecoded body of a completed exchange.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends requests to the user collection.
///
/// `Err` means the exchange never completed; any HTTP status, including
/// 4xx and 5xx, comes back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// `reqwest`-backed transport against a base collection URL.
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    demo_token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, demo_token: Option<String>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| DirectoryError::InvalidUrl {
            url: base_url.to_string(),
            source: e,
        })?;

        Ok(Self {
            http: Client::new(),
            base_url,
            demo_token,
        })
    }

    fn url_for(&self, id: Option<u64>) -> Url {
        let mut url = self.base_url.clone();
        if let Some(id) = id {
            let path = format!("{}/{id}", url.path().trim_end_matches('/'));
            url.set_path(&path);
        }
        url
    }

    /// Assemble the outgoing request, adding the demo token when configured.
    fn build(&self, request: ApiRequest) -> reqwest::Result<reqwest::Request> {
        let mut builder = self.http.request(request.method, self.url_for(request.id));
        if let Some(token) = &self.demo_token {
            builder = builder.header(DEMO_TOKEN_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder.build()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.build(request)?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%method, %url, error = %e, "request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "request completed");
        if !status.is_success() {
            warn!(%method, %url, status = status.as_u16(), "error response");
        }

        let body = response.text().await?;
        Ok(ApiResponse::new(status.as_u16(), body))
    }
}
