use std::{
    io,
    sync::{Arc, Mutex},
};

use url::Url;

use crate::{
    transport::{ConnectOptions, Connection, OutgoingRequest, ResponseHead, Transport},
    HttpError, Result,
};

/// Where a [`MockTransport`] exchange breaks off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    Connect,
    Send,
    Timeout,
    MidRead,
}

#[derive(Debug, Default)]
struct Log {
    connects: Vec<(Url, ConnectOptions)>,
    requests: Vec<OutgoingRequest>,
    closes: usize,
}

/// Answers every request with a canned response and records what it saw.
#[derive(Debug)]
pub(crate) struct MockTransport {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    failure: Option<Failure>,
    log: Arc<Mutex<Log>>,
}

impl MockTransport {
    pub(crate) fn respond(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
            failure: None,
            log: Arc::default(),
        }
    }

    pub(crate) fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub(crate) fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub(crate) fn closes(&self) -> usize {
        self.log.lock().unwrap().closes
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.log.lock().unwrap().requests.clone()
    }

    pub(crate) fn last_request(&self) -> Option<OutgoingRequest> {
        self.log.lock().unwrap().requests.last().cloned()
    }

    pub(crate) fn last_connect(&self) -> Option<(Url, ConnectOptions)> {
        self.log.lock().unwrap().connects.last().cloned()
    }
}

impl Transport for MockTransport {
    type Connection = MockConnection;

    fn connect(&self, url: &Url, options: &ConnectOptions) -> Result<MockConnection> {
        self.log
            .lock()
            .unwrap()
            .connects
            .push((url.clone(), options.clone()));
        if self.failure == Some(Failure::Connect) {
            return Err(HttpError::Connection(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        Ok(MockConnection {
            head: ResponseHead {
                status: self.status,
                headers: self.headers.clone(),
            },
            body: self.body.clone(),
            failure: self.failure,
            log: self.log.clone(),
        })
    }
}

pub(crate) struct MockConnection {
    head: ResponseHead,
    body: Vec<u8>,
    failure: Option<Failure>,
    log: Arc<Mutex<Log>>,
}

impl Connection for MockConnection {
    fn send(&mut self, request: OutgoingRequest) -> Result<ResponseHead> {
        self.log.lock().unwrap().requests.push(request);
        match self.failure {
            Some(Failure::Send) => Err(HttpError::Connection(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "broken pipe",
            ))),
            Some(Failure::Timeout) => Err(HttpError::Timeout("read timed out".to_string())),
            _ => Ok(self.head.clone()),
        }
    }

    fn read_body(&mut self) -> Result<Vec<u8>> {
        if self.failure == Some(Failure::MidRead) {
            return Err(HttpError::Connection(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended mid-body",
            )));
        }
        Ok(self.body.clone())
    }

    fn close(&mut self) {
        self.log.lock().unwrap().closes += 1;
    }
}
