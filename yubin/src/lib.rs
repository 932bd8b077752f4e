//! A fluent builder over a single blocking HTTP exchange.
//!
//! ```no_run
//! # fn main() -> yubin::Result<()> {
//! let response = yubin::post("https://httpbin.org/post", r#"{"hoge":"joge"}"#)
//!     .content_type("application/json; charset=UTF-8")
//!     .accept("application/json")
//!     .execute()?;
//! println!("{} {}", response.status(), response.body());
//! # Ok(())
//! # }
//! ```

mod error;
#[cfg(feature = "url-encoding")]
pub mod encoding;

pub mod builder;
pub mod client;
pub mod config;
pub mod method;
pub mod observer;
pub mod proxy;
pub mod response;
pub mod transport;

pub use builder::{get, post, request, RequestBuilder};
pub use client::HttpClient;
pub use config::RequestConfig;
pub use error::*;
pub use method::Method;
pub use observer::{ExchangeObserver, TracingObserver};
pub use proxy::ProxyEndpoint;
pub use response::Response;

#[cfg(test)]
pub(crate) mod test_utils;
