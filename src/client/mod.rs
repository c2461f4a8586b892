//! REST Client
//!
//! The [`Transport`] seam between forms/loaders and the server. Requests are
//! described by resource path relative to the page's origin, mirroring a
//! browser `fetch`.
//!
//! - [`HttpTransport`]: `reqwest`-backed transport against a configured origin
//! - [`StubTransport`]: records requests and replays canned responses

mod http;
mod stub;

pub use http::HttpTransport;
pub use stub::StubTransport;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Sends requests and returns the raw response
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Which requests carry the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Credentials {
    Omit,
    /// Only requests to the configured origin
    #[default]
    SameOrigin,
    Include,
}

/// An outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Resource path such as `/customers`, or an absolute URL
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub credentials: Credentials,
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// `GET` with same-origin credentials
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            headers: Vec::new(),
            credentials: Credentials::SameOrigin,
            body: None,
        }
    }

    /// `POST` of a JSON body with same-origin credentials
    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, TransportError> {
        let body = serde_json::to_vec(body).map_err(|e| TransportError::Encode(e.to_string()))?;

        Ok(Self {
            method: Method::Post,
            path: path.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            credentials: Credentials::SameOrigin,
            body: Some(body),
        })
    }

    /// Header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as JSON
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        let body = self.body.as_deref().unwrap_or_default();
        serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// A received response
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Response with a JSON body
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        Self {
            status,
            body: serde_json::to_vec(body).unwrap_or_default(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Errors raised between issuing a request and decoding its response
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Server unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Failed to decode response body: {0}")]
    Decode(String),
}

/// GET a JSON resource, treating any non-2xx status as an error
pub async fn get_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    path: &str,
) -> Result<T, TransportError> {
    let response = transport.send(Request::get(path)).await?;

    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            body: response.text(),
        });
    }

    response.parse_json()
}
