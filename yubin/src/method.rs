use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult, StdResult};
use std::{fmt, str::FromStr};

/// The request methods a [`RequestBuilder`](crate::RequestBuilder) accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Method {
    #[default]
    Get,
    Post,
    Head,
    Options,
    Put,
    Delete,
    Trace,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Head,
        Method::Options,
        Method::Put,
        Method::Delete,
        Method::Trace,
    ];

    pub fn from_bytes(s: &[u8]) -> ConfigResult<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().as_bytes() == s)
            .ok_or_else(|| {
                ConfigError::InvalidMethod(String::from_utf8_lossy(s).into_owned())
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Trace => "TRACE",
        }
    }

    pub(crate) fn requires_body(&self) -> bool {
        matches!(self, Method::Post)
    }

    /// Whether a non-200 answer to this method is reported as an error.
    pub(crate) fn requires_ok_status(&self) -> bool {
        matches!(self, Method::Post)
    }

    pub(crate) fn into_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Trace => reqwest::Method::TRACE,
        }
    }
}

impl FromStr for Method {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        Self::from_bytes(s.as_bytes())
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Method {
    fn serialize<S>(&self, serializer: S) -> StdResult<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D>(deserializer: D) -> StdResult<Method, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}
