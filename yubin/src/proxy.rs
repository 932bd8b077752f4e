use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::u16 as port_number,
    Finish, IResult,
};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};
use std::{fmt, str::FromStr};

/// An HTTP proxy the connection is routed through instead of the target host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
}

impl ProxyEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The proxy as an `http://host:port` URL.
    pub fn to_url(&self) -> String {
        format!("http://{}", self)
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ProxyEndpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        let (rest, (host, port)) = parse_endpoint(s.trim())
            .finish()
            .map_err(|e| ConfigError::InvalidProxy(format!("{} in {:?}", e, s)))?;
        if !rest.is_empty() && rest != "/" {
            return Err(ConfigError::InvalidProxy(format!(
                "unexpected trailing input {:?} in {:?}",
                rest, s
            )));
        }
        Ok(ProxyEndpoint::new(host, port))
    }
}

fn match_host_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')(input)
}

fn parse_bracketed_host(input: &str) -> IResult<&str, &str> {
    let (input, _) = tag("[")(input)?;
    let (input, host) =
        take_while1(|c: char| c.is_ascii_hexdigit() || c == ':' || c == '.')(input)?;
    let (input, _) = tag("]")(input)?;
    Ok((input, host))
}

fn parse_host(input: &str) -> IResult<&str, &str> {
    if let Ok(result) = parse_bracketed_host(input) {
        return Ok(result);
    }
    match_host_name(input)
}

fn skip_scheme(input: &str) -> &str {
    match tag::<_, _, nom::error::Error<&str>>("http://")(input) {
        Ok((input, _)) => input,
        Err(_) => input,
    }
}

fn parse_endpoint(input: &str) -> IResult<&str, (&str, u16)> {
    let input = skip_scheme(input);
    let (input, host) = parse_host(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, port) = port_number(input)?;
    Ok((input, (host, port)))
}
