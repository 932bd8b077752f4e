//! The seam between a [`RequestConfig`] and the network.
//!
//! [`HttpClient`](crate::HttpClient) opens one [`Connection`] per exchange,
//! sends a single [`OutgoingRequest`] over it, reads the whole body and then
//! closes it.

use std::time::Duration;

use url::Url;

use crate::{
    builder::CONTENT_LENGTH, config::RequestConfig, Method, ProxyEndpoint, Result,
};

mod blocking;

pub use blocking::{ReqwestConnection, ReqwestTransport};

pub const CONNECTION: &str = "Connection";

/// Per-connection settings handed to [`Transport::connect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectOptions {
    pub proxy: Option<ProxyEndpoint>,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
    pub use_cache: bool,
}

impl From<&RequestConfig> for ConnectOptions {
    fn from(config: &RequestConfig) -> Self {
        Self {
            proxy: config.proxy.clone(),
            connect_timeout: config.connect_timeout,
            read_timeout: config.read_timeout,
            use_cache: config.use_cache,
        }
    }
}

/// The request exactly as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutgoingRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl From<RequestConfig> for OutgoingRequest {
    /// Adds `Connection: close` and, when there is a body, a computed
    /// `Content-Length`.
    fn from(config: RequestConfig) -> Self {
        let mut headers: Vec<(String, String)> = config
            .headers
            .into_iter()
            .filter(|(name, _)| !name.eq_ignore_ascii_case(CONNECTION))
            .collect();
        headers.push((CONNECTION.to_string(), "close".to_string()));
        let body = config.body.map(String::into_bytes);
        if let Some(body) = &body {
            headers.push((CONTENT_LENGTH.to_string(), body.len().to_string()));
        }
        Self {
            method: config.method,
            url: config.url,
            headers,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

pub trait Transport {
    type Connection: Connection;

    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<Self::Connection>;
}

impl<T> Transport for &T
where
    T: Transport,
{
    type Connection = T::Connection;

    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<T::Connection> {
        (*self).connect(url, options)
    }
}

/// One open exchange. Redirects are never followed by implementations.
pub trait Connection {
    fn send(&mut self, request: OutgoingRequest) -> Result<ResponseHead>;

    fn read_body(&mut self) -> Result<Vec<u8>>;

    /// Releases the connection and any open stream.
    fn close(&mut self);
}
