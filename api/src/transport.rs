use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};

use crate::domain::request::WireRequest;
use crate::domain::response::Outcome;
use crate::utilities::request::{build_header_map, convert_http_method, format_header_map};

/// Sends a wire request and reports how it ended. Implementations never fail:
/// every problem becomes an [`Outcome`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &WireRequest) -> Outcome;
}

pub struct ReqwestTransport {
    pub client: reqwest::Client,
}

impl ReqwestTransport {
    /// `timeout` is the only deadline a send has; without one a request may
    /// wait indefinitely.
    pub fn new(timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &WireRequest) -> Outcome {
        let headers = match build_header_map(&request.headers) {
            Ok(headers) => headers,
            Err(e) => {
                warn!("rejected request headers: {}", e);
                return Outcome::TransportError {
                    message: e.to_string(),
                };
            }
        };
        let mut req = self
            .client
            .request(convert_http_method(request.method), &request.url)
            .headers(headers);
        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let res = match req.send().await {
            Ok(res) => res,
            Err(e) => return failure(e),
        };
        let status = res.status();
        let response_headers = format_header_map(res.headers());
        debug!("{} {} -> {}", request.method, request.url, status);
        match res.text().await {
            Ok(response_body) => Outcome::Success {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                response_headers,
                response_body,
            },
            Err(e) => failure(e),
        }
    }
}

fn failure(e: reqwest::Error) -> Outcome {
    if e.is_timeout() {
        Outcome::Timeout
    } else {
        Outcome::TransportError {
            message: e.to_string(),
        }
    }
}
