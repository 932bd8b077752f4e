use std::borrow::Cow;

use encoding_rs::Encoding;
use percent_encoding::NON_ALPHANUMERIC;

use crate::{ConfigError, ConfigResult};

fn lookup(charset: &str) -> ConfigResult<&'static Encoding> {
    Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| ConfigError::UnknownCharset(charset.to_string()))
}

pub fn encode_utf8(text: &str) -> String {
    percent_encoding::utf8_percent_encode(text, NON_ALPHANUMERIC).to_string()
}

/// Percent-encodes `text` after converting it to `charset` (UTF-8 when `None`).
pub fn encode_component(text: &str, charset: Option<&str>) -> ConfigResult<String> {
    let encoding = lookup(charset.unwrap_or("utf-8"))?;
    let (encoded, _, _) = encoding.encode(text);
    Ok(percent_encoding::percent_encode(&encoded, NON_ALPHANUMERIC).to_string())
}

pub fn decode_component(text: &str, charset: Option<&str>) -> ConfigResult<String> {
    let encoding = lookup(charset.unwrap_or("utf-8"))?;
    let raw: Cow<'_, [u8]> = percent_encoding::percent_decode_str(text).into();
    let (decoded, _, _) = encoding.decode(&raw);
    Ok(decoded.into_owned())
}
