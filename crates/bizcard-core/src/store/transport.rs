//! HTTP transport for the record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tracing::{debug, trace};

use crate::error::TransportError;
use crate::models::config::StoreConfig;

/// Header carrying the store API version.
const API_VERSION_HEADER: &str = "notion-version";

/// HTTP method of a store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request relative to the store API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRequest {
    pub method: Method,
    /// Path below the API base, without a leading slash.
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl StoreRequest {
    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    /// A POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Status and body of a store response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: String,
}

impl StoreResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends store requests.
///
/// Any response, whatever its status, is `Ok`. `Err` means no response was
/// received.
#[async_trait]
pub trait StoreTransport: Send + Sync {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse, TransportError>;
}

/// `reqwest`-backed transport with bearer auth and API version headers.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport from store settings.
    pub fn new(config: &StoreConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("bizcard/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers(config)?)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.api_base_url),
        })
    }

    /// Absolute URL for a request path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Headers sent with every request: bearer auth and the API version.
pub(crate) fn default_headers(config: &StoreConfig) -> Result<HeaderMap, TransportError> {
    let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
        .map_err(|e| TransportError::Client(format!("invalid API token: {}", e)))?;
    auth.set_sensitive(true);

    let version = HeaderValue::from_str(&config.api_version)
        .map_err(|e| TransportError::Client(format!("invalid API version: {}", e)))?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);
    headers.insert(HeaderName::from_static(API_VERSION_HEADER), version);
    Ok(headers)
}

fn normalize_base_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}

#[async_trait]
impl StoreTransport for HttpTransport {
    async fn send(&self, request: StoreRequest) -> Result<StoreResponse, TransportError> {
        let url = self.url(&request.path);
        debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = &request.body {
            trace!("Request body: {}", body);
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        debug!("{:?} {} -> {}", request.method, url, status);

        Ok(StoreResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joining() {
        let config = StoreConfig {
            api_base_url: "https://api.example.com/v1".to_string(),
            api_token: "secret".to_string(),
            ..StoreConfig::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(
            transport.url("databases/abc"),
            "https://api.example.com/v1/databases/abc"
        );
        assert_eq!(transport.url("/pages"), "https://api.example.com/v1/pages");
    }

    #[test]
    fn test_default_headers() {
        let config = StoreConfig {
            api_token: "secret_abc".to_string(),
            api_version: "2022-06-28".to_string(),
            ..StoreConfig::default()
        };
        let headers = default_headers(&config).unwrap();

        let auth = &headers[AUTHORIZATION];
        assert_eq!(auth, "Bearer secret_abc");
        assert!(auth.is_sensitive());
        assert_eq!(&headers["notion-version"], "2022-06-28");
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_invalid_api_version_is_rejected() {
        let config = StoreConfig {
            api_token: "secret".to_string(),
            api_version: "2022\n06".to_string(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            default_headers(&config),
            Err(TransportError::Client(_))
        ));
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let config = StoreConfig {
            api_token: "bad\ntoken".to_string(),
            ..StoreConfig::default()
        };
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::Client(_))
        ));
    }

    #[test]
    fn test_request_builders() {
        let get = StoreRequest::get("databases/abc");
        assert_eq!(get.method, Method::Get);
        assert!(get.body.is_none());

        let post = StoreRequest::post("pages", json!({"a": 1}));
        assert_eq!(post.method, Method::Post);
        assert_eq!(post.body, Some(json!({"a": 1})));
    }

    #[test]
    fn test_success_range() {
        assert!(StoreResponse::new(200, "").is_success());
        assert!(StoreResponse::new(204, "").is_success());
        assert!(!StoreResponse::new(302, "").is_success());
        assert!(!StoreResponse::new(400, "").is_success());
    }
}
