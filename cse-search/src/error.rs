//! Error types for search sessions
//!
//! Every failure a session can report is a distinct [`SearchError`] variant so
//! callers can pick a user-facing message without string matching.

use std::fmt;

use thiserror::Error;

use crate::types::EngineKind;

/// Errors that can occur while starting or navigating a search session
#[derive(Error, Debug)]
pub enum SearchError {
    /// Options are missing something required before a search can start
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The query text was empty or whitespace
    #[error("search query cannot be empty")]
    EmptyQuery,

    /// The backend rejected the request
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The request never produced a backend response
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A step was requested past the first or last available element
    #[error("no {0} results available")]
    NavigationExhausted(Direction),

    /// Current-element access on a page with no items
    #[error("page contains no results")]
    EmptySequence,

    /// The backend payload is missing fields the adapter requires
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Navigation direction, carried by [`SearchError::NavigationExhausted`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "next"),
            Direction::Backward => write!(f, "previous"),
        }
    }
}

/// Failures below the backend protocol: connection, timeout, missing canned data
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP request failed before a response arrived
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The request URL could not be built
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A canned transport ran out of queued responses
    #[error("no response queued for {0}")]
    NoResponse(String),
}

/// A backend-reported failure, qualified by the engine that produced it
///
/// Renders as `(<engine>) <code>: <message>: <reason>`, leaving out the
/// message and reason segments when the backend did not supply them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub engine: EngineKind,
    pub code: i64,
    pub message: Option<String>,
    pub reason: Option<String>,
}

impl EngineError {
    pub fn new(engine: EngineKind, code: i64) -> Self {
        Self {
            engine,
            code,
            message: None,
            reason: None,
        }
    }

    /// Attach the backend message; blank text counts as absent.
    pub fn with_message(mut self, message: Option<impl Into<String>>) -> Self {
        self.message = message.map(Into::into).filter(|m| !m.trim().is_empty());
        self
    }

    /// Attach the backend reason code; blank text counts as absent.
    pub fn with_reason(mut self, reason: Option<impl Into<String>>) -> Self {
        self.reason = reason.map(Into::into).filter(|r| !r.trim().is_empty());
        self
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.engine, self.code)?;
        for segment in [&self.message, &self.reason].into_iter().flatten() {
            write!(f, ": {}", segment)?;
        }
        Ok(())
    }
}

impl std::error::Error for EngineError {}
