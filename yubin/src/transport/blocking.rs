use std::io;

use reqwest::{
    blocking::{Client, Response},
    header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, PRAGMA},
    redirect, Proxy,
};
use tracing::debug;
use url::Url;

use super::{ConnectOptions, Connection, OutgoingRequest, ResponseHead, Transport};
use crate::{ConfigError, HttpError, Result};

/// Opens a dedicated blocking `reqwest` client per exchange: no idle pool,
/// no redirects, HTTP/1.1 only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestTransport;

impl Transport for ReqwestTransport {
    type Connection = ReqwestConnection;

    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<ReqwestConnection> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .http1_only()
            .connect_timeout(options.connect_timeout)
            .timeout(options.read_timeout);
        builder = match &options.proxy {
            Some(proxy) => {
                debug!(proxy = %proxy, target = %url, "routing through proxy");
                let proxy = Proxy::all(proxy.to_url())
                    .map_err(|e| ConfigError::InvalidProxy(format!("{} for {}", e, proxy)))?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };
        let client = builder.build().map_err(classify)?;
        Ok(ReqwestConnection {
            client: Some(client),
            response: None,
            use_cache: options.use_cache,
        })
    }
}

#[derive(Debug)]
pub struct ReqwestConnection {
    client: Option<Client>,
    response: Option<Response>,
    use_cache: bool,
}

impl ReqwestConnection {
    fn header_map(&self, headers: Vec<(String, String)>) -> Result<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            let value = HeaderValue::from_str(&value)
                .map_err(|_| ConfigError::InvalidHeader(format!("invalid value for {}", name)))?;
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| ConfigError::InvalidHeader(format!("invalid name {:?}", name)))?;
            map.insert(name, value);
        }
        if !self.use_cache && !map.contains_key(CACHE_CONTROL) {
            map.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            map.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        }
        Ok(map)
    }
}

impl Connection for ReqwestConnection {
    fn send(&mut self, request: OutgoingRequest) -> Result<ResponseHead> {
        let headers = self.header_map(request.headers)?;
        let client = self.client.as_ref().ok_or_else(closed)?;
        let mut builder = client
            .request(request.method.into_reqwest(), request.url)
            .headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().map_err(classify)?;
        let head = ResponseHead {
            status: response.status().as_u16(),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        };
        self.response = Some(response);
        Ok(head)
    }

    fn read_body(&mut self) -> Result<Vec<u8>> {
        let response = self.response.take().ok_or_else(closed)?;
        let bytes = response.bytes().map_err(classify)?;
        Ok(bytes.to_vec())
    }

    fn close(&mut self) {
        self.response.take();
        self.client.take();
    }
}

fn closed() -> HttpError {
    HttpError::Connection(io::Error::new(
        io::ErrorKind::NotConnected,
        "connection is not open",
    ))
}

fn classify(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout(error.to_string())
    } else {
        HttpError::Connection(io::Error::other(error))
    }
}
