use crate::domain::request::HttpMethod;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};

pub fn convert_http_method(input: HttpMethod) -> Method {
    match input {
        HttpMethod::GET => Method::GET,
        HttpMethod::POST => Method::POST,
        HttpMethod::PUT => Method::PUT,
        HttpMethod::PATCH => Method::PATCH,
        HttpMethod::DELETE => Method::DELETE,
    }
}

/// Appends rather than inserts so repeated names are all sent.
pub fn build_header_map(headers: &[(String, String)]) -> anyhow::Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.as_bytes())?;
        let header_value = HeaderValue::from_str(value)?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Header block in `name: value\r\n` lines, the way it is stored in history.
pub fn format_header_map(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\r\n", name, String::from_utf8_lossy(value.as_bytes())))
        .collect()
}
