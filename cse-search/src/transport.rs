//! Transport seam between sessions and the network
//!
//! Sessions never issue HTTP themselves; they hand a built [`RequestParams`]
//! to a [`Transport`] and classify whatever comes back.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::types::RequestParams;

/// Status code and body of one backend response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking request executor
pub trait Transport {
    fn fetch(&self, request: &RequestParams) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fetch(&self, request: &RequestParams) -> Result<RawResponse, TransportError> {
        (**self).fetch(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fetch(&self, request: &RequestParams) -> Result<RawResponse, TransportError> {
        (**self).fetch(request)
    }
}

/// HTTP transport backed by a blocking reqwest client
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, request: &RequestParams) -> Result<RawResponse, TransportError> {
        let url = request.to_url()?;
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(RawResponse { status, body })
    }
}

/// Transport that replays queued responses instead of touching the network
///
/// Every request is recorded so tests can assert on what was sent and how
/// many fetches happened.
#[derive(Debug, Default)]
pub struct CannedTransport {
    responses: RefCell<VecDeque<RawResponse>>,
    requests: RefCell<Vec<RequestParams>>,
    fetches: Cell<usize>,
}

impl CannedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered fetch
    pub fn push(&self, status: u16, body: impl Into<String>) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(RawResponse::new(status, body));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RequestParams> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<RequestParams> {
        self.requests.borrow().last().cloned()
    }

    pub fn pending(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for CannedTransport {
    fn fetch(&self, request: &RequestParams) -> Result<RawResponse, TransportError> {
        self.fetches.set(self.fetches.get() + 1);
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TransportError::NoResponse(request.endpoint().to_string()))
    }
}
