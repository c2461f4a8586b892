//! HTTP transport backed by `reqwest`

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use std::time::Duration;

use super::{Credentials, Method, Request, Response, Transport, TransportError};
use crate::config::ClientConfig;

/// Resolves resource paths against one origin and sends them over HTTP
pub struct HttpTransport {
    client: Client,
    origin: Url,
    session_cookie: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let origin = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            origin,
            session_cookie: config.session_cookie.clone(),
        })
    }

    /// Resolve a resource path (or absolute URL) against the origin
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.origin
            .join(path)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", path, e)))
    }

    fn is_same_origin(&self, url: &Url) -> bool {
        url.scheme() == self.origin.scheme()
            && url.host_str() == self.origin.host_str()
            && url.port_or_known_default() == self.origin.port_or_known_default()
    }

    fn sends_cookie(&self, credentials: Credentials, url: &Url) -> bool {
        match credentials {
            Credentials::Omit => false,
            Credentials::SameOrigin => self.is_same_origin(url),
            Credentials::Include => true,
        }
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Unavailable(e.to_string())
    } else {
        TransportError::Request(e)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.resolve(&request.path)?;
        let with_cookie = self.sends_cookie(request.credentials, &url);

        let mut builder = match request.method {
            Method::Get => self.client.get(url.clone()),
            Method::Post => self.client.post(url.clone()),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if with_cookie {
            if let Some(cookie) = &self.session_cookie {
                builder = builder.header(header::COOKIE, cookie.as_str());
            }
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        tracing::debug!(url = %url, status, "Request completed");

        Ok(Response::new(status, body))
    }
}
