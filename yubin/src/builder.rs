use std::{collections::BTreeMap, time::Duration};

use reqwest::header::{HeaderName, HeaderValue};
use url::Url;

use crate::{
    client::HttpClient,
    config::{RequestConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT},
    transport::Transport,
    ConfigError, ConfigResult, HttpError, Method, ProxyEndpoint, Response, Result,
};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
pub const AUTHORIZATION: &str = "Authorization";
pub const COOKIE: &str = "Cookie";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// Starts a GET request to `url`.
pub fn get(url: impl Into<String>) -> RequestBuilder {
    request(Method::Get, url)
}

/// Starts a POST request to `url` carrying `body` as UTF-8 text.
pub fn post(url: impl Into<String>, body: impl Into<String>) -> RequestBuilder {
    request(Method::Post, url).body(body)
}

pub fn request(method: Method, url: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new().method(method).url(url)
}

/// Accumulates a request through chained setters.
///
/// Nothing is validated until [`build`](Self::build), except for
/// [`header`](Self::header) which refuses `Content-Length` on the spot.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Option<String>,
    query: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
    proxy: Option<ProxyEndpoint>,
    connect_timeout: Duration,
    read_timeout: Duration,
    use_cache: bool,
    body: Option<String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::default(),
            url: None,
            query: Vec::new(),
            headers: BTreeMap::new(),
            proxy: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            use_cache: false,
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn content_type(self, value: impl Into<String>) -> Self {
        self.set_header(CONTENT_TYPE, value)
    }

    pub fn accept(self, value: impl Into<String>) -> Self {
        self.set_header(ACCEPT, value)
    }

    pub fn authorization(self, value: impl Into<String>) -> Self {
        self.set_header(AUTHORIZATION, value)
    }

    pub fn cookie(self, value: impl Into<String>) -> Self {
        self.set_header(COOKIE, value)
    }

    /// Sets an arbitrary header. `Content-Length` is derived from the body
    /// and cannot be set here, in any letter case.
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into();
        if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
            return Err(ConfigError::ReservedHeader(name));
        }
        Ok(self.set_header(name, value))
    }

    fn set_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Appends `key=value` to the query string verbatim.
    pub fn query_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends `key=value` with both sides percent-encoded as UTF-8.
    #[cfg(feature = "url-encoding")]
    pub fn query_string_encoded(self, key: &str, value: &str) -> Self {
        let key = crate::encoding::encode_utf8(key);
        let value = crate::encoding::encode_utf8(value);
        self.query_string(key, value)
    }

    /// Like [`query_string_encoded`](Self::query_string_encoded) but converts
    /// to `charset` (a WHATWG label such as `shift_jis`) before escaping.
    #[cfg(feature = "url-encoding")]
    pub fn query_string_encoded_with(
        self,
        key: &str,
        value: &str,
        charset: &str,
    ) -> ConfigResult<Self> {
        let key = crate::encoding::encode_component(key, Some(charset))?;
        let value = crate::encoding::encode_component(value, Some(charset))?;
        Ok(self.query_string(key, value))
    }

    pub fn proxy(mut self, endpoint: ProxyEndpoint) -> Self {
        self.proxy = Some(endpoint);
        self
    }

    pub fn connect_timeout(mut self, millis: u64) -> Self {
        self.connect_timeout = Duration::from_millis(millis);
        self
    }

    pub fn read_timeout(mut self, millis: u64) -> Self {
        self.read_timeout = Duration::from_millis(millis);
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    /// The query string as it will be appended: `?k1=v1&k2=v2`, or empty.
    pub fn query_suffix(&self) -> String {
        let mut suffix = String::new();
        for (key, value) in &self.query {
            suffix.push(if suffix.is_empty() { '?' } else { '&' });
            suffix.push_str(key);
            suffix.push('=');
            suffix.push_str(value);
        }
        suffix
    }

    pub fn build(self) -> Result<RequestConfig> {
        let base = self.url.as_deref().ok_or(ConfigError::MissingUrl)?;
        if self.method.requires_body() && self.body.is_none() {
            return Err(ConfigError::MissingBody(self.method).into());
        }
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(format!("invalid name {:?}", name)))?;
            HeaderValue::from_str(value)
                .map_err(|_| ConfigError::InvalidHeader(format!("invalid value for {}", name)))?;
        }
        let url = parse_target(&compose_target(base, &self.query_suffix()))?;
        Ok(RequestConfig {
            method: self.method,
            url,
            headers: self.headers,
            proxy: self.proxy,
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
            use_cache: self.use_cache,
            body: self.body,
        })
    }

    /// Builds and runs the request over a fresh blocking connection.
    pub fn execute(self) -> Result<Response> {
        self.build()?.execute()
    }

    pub fn execute_with<T: Transport>(self, client: &HttpClient<T>) -> Result<Response> {
        client.execute(self.build()?)
    }
}

/// Splices the query suffix into `base`, ahead of any fragment and after any
/// query the base already carries.
fn compose_target(base: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        return base.to_string();
    }
    let (head, fragment) = match base.find('#') {
        Some(index) => base.split_at(index),
        None => (base, ""),
    };
    if head.contains('?') {
        format!("{}&{}{}", head, &suffix[1..], fragment)
    } else {
        format!("{}{}{}", head, suffix, fragment)
    }
}

fn parse_target(target: &str) -> Result<Url> {
    let url = Url::parse(target)
        .map_err(|e| HttpError::MalformedAddress(format!("{} for {}", e, target)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HttpError::MalformedAddress(format!(
            "unsupported scheme {} in {}",
            url.scheme(),
            target
        )));
    }
    if url.host_str().is_none() {
        return Err(HttpError::MalformedAddress(format!("no host in {}", target)));
    }
    Ok(url)
}
