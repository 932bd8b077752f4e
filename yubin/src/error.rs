#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Unexpected status: {status}")]
    UnexpectedStatus { status: u16, body: String },

    #[cfg(feature = "json")]
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl HttpError {
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Timeout(_))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("url is required")]
    MissingUrl,

    #[error("{0} request requires a body")]
    MissingBody(crate::Method),

    #[error("header {0} is computed automatically and cannot be set")]
    ReservedHeader(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    #[error("Invalid proxy: {0}")]
    InvalidProxy(String),

    #[error("Unknown charset: {0}")]
    UnknownCharset(String),
}

pub type StdResult<T, E> = std::result::Result<T, E>;

pub type Result<T> = std::result::Result<T, HttpError>;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
