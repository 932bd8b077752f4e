use std::{
    fmt,
    ops::{Deref, DerefMut},
};

use tracing::instrument;

use crate::{
    observer::{ExchangeObserver, TracingObserver},
    response::decode_body,
    transport::{ConnectOptions, Connection, OutgoingRequest, ReqwestTransport, Transport},
    HttpError, RequestConfig, Response, Result,
};

/// Runs [`RequestConfig`]s, one exchange per call. The client holds no
/// per-request state and can be shared.
pub struct HttpClient<T = ReqwestTransport> {
    transport: T,
    observer: Box<dyn ExchangeObserver + Send + Sync>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(ReqwestTransport)
    }
}

impl<T: fmt::Debug> fmt::Debug for HttpClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            observer: Box::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl ExchangeObserver + Send + Sync + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[instrument(skip_all, fields(method = %config.method(), url = %config.url()))]
    pub fn execute(&self, config: RequestConfig) -> Result<Response> {
        self.observer.on_request(&config);
        match self.exchange(config) {
            Ok(response) => {
                self.observer.on_response(&response);
                Ok(response)
            }
            Err(e) => {
                self.observer.on_error(&e);
                Err(e)
            }
        }
    }

    fn exchange(&self, config: RequestConfig) -> Result<Response> {
        let method = config.method;
        let options = ConnectOptions::from(&config);
        let request = OutgoingRequest::from(config);

        let mut connection = ConnectionGuard(self.transport.connect(&request.url, &options)?);
        let head = connection.send(request)?;
        let raw = connection.read_body()?;
        drop(connection);

        let body = decode_body(&raw);
        if method.requires_ok_status() && head.status != 200 {
            return Err(HttpError::UnexpectedStatus {
                status: head.status,
                body,
            });
        }
        Ok(Response::new(head.status, head.headers, body))
    }
}

/// Closes the wrapped connection when dropped, whichever way the exchange ends.
struct ConnectionGuard<C: Connection>(C);

impl<C: Connection> Deref for ConnectionGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.0
    }
}

impl<C: Connection> DerefMut for ConnectionGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.0
    }
}

impl<C: Connection> Drop for ConnectionGuard<C> {
    fn drop(&mut self) {
        self.0.close();
    }
}
