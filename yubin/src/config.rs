use std::{collections::BTreeMap, time::Duration};

use url::Url;

use crate::{client::HttpClient, Method, ProxyEndpoint, Response, Result};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(30_000);

/// A fully validated request, produced by
/// [`RequestBuilder::build`](crate::RequestBuilder::build).
///
/// The query string is already part of [`url`](Self::url). A config is
/// consumed by [`HttpClient::execute`], so it runs at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) proxy: Option<ProxyEndpoint>,
    pub(crate) connect_timeout: Duration,
    pub(crate) read_timeout: Duration,
    pub(crate) use_cache: bool,
    pub(crate) body: Option<String>,
}

impl RequestConfig {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn proxy(&self) -> Option<&ProxyEndpoint> {
        self.proxy.as_ref()
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Byte length of the UTF-8 encoded body; this is what goes out as
    /// `Content-Length`.
    pub fn content_length(&self) -> Option<usize> {
        self.body.as_ref().map(String::len)
    }

    /// Runs the request once over a fresh blocking connection.
    pub fn execute(self) -> Result<Response> {
        HttpClient::default().execute(self)
    }
}
