use tracing::{debug, error, warn};

use crate::{HttpError, RequestConfig, Response};

/// Hooks called around every exchange run by an [`HttpClient`](crate::HttpClient).
pub trait ExchangeObserver {
    fn on_request(&self, _config: &RequestConfig) {}

    fn on_response(&self, _response: &Response) {}

    fn on_error(&self, _error: &HttpError) {}
}

/// Default observer, reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExchangeObserver for TracingObserver {
    fn on_request(&self, config: &RequestConfig) {
        debug!(
            method = %config.method(),
            url = %config.url(),
            proxy = ?config.proxy(),
            "sending request"
        );
    }

    fn on_response(&self, response: &Response) {
        debug!(
            status = response.status(),
            content_type = ?response.content_type(),
            length = response.body().len(),
            "received response"
        );
    }

    fn on_error(&self, err: &HttpError) {
        match err {
            HttpError::UnexpectedStatus { status, .. } => {
                warn!(status, "request failed with unexpected status")
            }
            _ => error!("request failed: {}", err),
        }
    }
}
