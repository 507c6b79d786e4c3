//! HTTP transport layer.
//!
//! All remote access goes through the [`Transport`] trait so that the
//! resource model, tree walker and transfer code never touch a concrete
//! HTTP client. Production code uses [`HttpTransport`] (reqwest with
//! optional basic auth); tests substitute a scripted implementation.

use crate::error::Result;
use log::debug;
use reqwest::blocking::{Body, Client};
use reqwest::{Method, StatusCode};
use std::io::{Read, Write};
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Username and password for HTTP basic auth.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of an outgoing request.
pub enum RequestBody {
    /// No body at all (GET, DELETE).
    None,
    /// An explicit zero-length body. Distinct from a stream that happens
    /// to be exhausted, which some providers reject for empty files.
    Empty,
    /// A streamed body read on demand, never buffered in full.
    Stream(Box<dyn Read + Send + 'static>),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::None => f.write_str("None"),
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// A single outgoing request, independent of any HTTP client.
#[derive(Debug)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
}

impl TransportRequest {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            params: Vec::new(),
            body: RequestBody::None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    /// Add a query parameter.
    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Attach a body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

/// Status and body of a response. The body is a reader so downloads can
/// stream to a sink without buffering.
pub struct TransportResponse {
    status: StatusCode,
    body: Box<dyn Read + Send>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: Box<dyn Read + Send>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Read the whole body and decode it as JSON.
    pub fn json<D: serde::de::DeserializeOwned>(mut self) -> Result<D> {
        let mut buf = Vec::new();
        self.body.read_to_end(&mut buf)?;
        Ok(serde_json::from_slice(&buf)?)
    }

    /// Stream the body into `sink`, returning the number of bytes copied.
    pub fn copy_to<W: Write + ?Sized>(mut self, sink: &mut W) -> Result<u64> {
        Ok(std::io::copy(&mut self.body, sink)?)
    }
}

/// Capability to execute a [`TransportRequest`].
pub trait Transport {
    fn request(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Production transport backed by a blocking reqwest client. Attaches
/// basic auth to every request when credentials are present.
pub struct HttpTransport {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub fn new(credentials: Option<Credentials>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            credentials,
        })
    }
}

impl Transport for HttpTransport {
    fn request(&self, request: TransportRequest) -> Result<TransportResponse> {
        debug!("{} {}", request.method, request.url);
        let mut builder = self.client.request(request.method, &request.url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(credentials) = &self.credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }
        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Empty => builder.body(Vec::new()),
            RequestBody::Stream(reader) => builder.body(Body::new(reader)),
        };
        let response = builder.send()?;
        let status = response.status();
        debug!("-> {}", status);
        Ok(TransportResponse::new(status, Box::new(response)))
    }
}
