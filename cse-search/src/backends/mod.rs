//! Search backend implementations
//!
//! This module provides a trait-based abstraction over the two supported
//! result schemas. The concrete adapter is picked once per session through
//! the closed [`Backend`] enum.

use serde_json::Value;

use crate::config::SearchOptions;
use crate::error::{EngineError, SearchError, SearchResult};
use crate::types::{EngineKind, Page, PagingState, RequestParams, SearchIntent};

pub mod cse;
pub mod legacy;

pub use cse::CseAdapter;
pub use legacy::LegacyAdapter;

/// Result of classifying one backend response
#[derive(Debug)]
pub enum Outcome {
    Success(Page),
    Failure(EngineError),
}

/// Trait for backend adapters
///
/// Adapters are pure translators: they never perform I/O.
pub trait BackendAdapter {
    /// Which engine variant this adapter speaks
    fn kind(&self) -> EngineKind;

    /// Build the outbound request for a page
    fn build_request(&self, intent: &SearchIntent, paging: PagingState) -> RequestParams;

    /// Parse a successful response body into a page
    fn parse_response(&self, raw: &str) -> SearchResult<Page>;

    /// Decide whether a response is a page or an engine-reported failure
    ///
    /// Unparseable success bodies surface as `MalformedResponse`.
    fn classify_outcome(&self, status: u16, raw: &str) -> SearchResult<Outcome>;
}

/// The closed set of backend adapters
#[derive(Debug, Clone)]
pub enum Backend {
    Cse(CseAdapter),
    Legacy(LegacyAdapter),
}

impl Backend {
    /// Select and configure the adapter for an intent's engine
    ///
    /// The modern variant needs both an API key and an engine id.
    pub fn new(intent: &SearchIntent, options: &SearchOptions) -> SearchResult<Self> {
        match intent.engine {
            EngineKind::Cse => {
                let api_key = required(options.api_key.as_deref(), "an API key is required")?;
                let engine_id = required(
                    options.engine_id.as_deref(),
                    "a search engine id is required",
                )?;
                Ok(Backend::Cse(CseAdapter::new(api_key, engine_id)))
            }
            EngineKind::Legacy => Ok(Backend::Legacy(LegacyAdapter::new(
                intent.count,
                intent.query.clone(),
            ))),
        }
    }

    fn adapter(&self) -> &dyn BackendAdapter {
        match self {
            Backend::Cse(adapter) => adapter,
            Backend::Legacy(adapter) => adapter,
        }
    }
}

impl BackendAdapter for Backend {
    fn kind(&self) -> EngineKind {
        self.adapter().kind()
    }

    fn build_request(&self, intent: &SearchIntent, paging: PagingState) -> RequestParams {
        self.adapter().build_request(intent, paging)
    }

    fn parse_response(&self, raw: &str) -> SearchResult<Page> {
        self.adapter().parse_response(raw)
    }

    fn classify_outcome(&self, status: u16, raw: &str) -> SearchResult<Outcome> {
        self.adapter().classify_outcome(status, raw)
    }
}

fn required<'a>(value: Option<&'a str>, message: &str) -> SearchResult<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SearchError::Configuration(message.to_string()))
}

// Shared JSON helpers for adapters

/// Read a count that backends send either as a number or a numeric string
pub(crate) fn loose_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn loose_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(engine: EngineKind) -> SearchOptions {
        SearchOptions {
            engine,
            ..SearchOptions::default()
        }
    }

    fn backend(options: &SearchOptions) -> SearchResult<Backend> {
        Backend::new(&SearchIntent::new("rust", options), options)
    }

    #[test]
    fn test_cse_requires_api_key_and_engine_id() {
        let mut opts = options(EngineKind::Cse);
        let err = backend(&opts).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(ref m) if m.contains("API key")));

        opts.api_key = Some("key".into());
        let err = backend(&opts).unwrap_err();
        assert!(matches!(err, SearchError::Configuration(ref m) if m.contains("engine id")));

        opts.engine_id = Some("   ".into());
        assert!(backend(&opts).is_err());

        opts.engine_id = Some("engine".into());
        let selected = backend(&opts).unwrap();
        assert_eq!(selected.kind(), EngineKind::Cse);
    }

    #[test]
    fn test_legacy_needs_no_credentials() {
        let selected = backend(&options(EngineKind::Legacy)).unwrap();
        assert_eq!(selected.kind(), EngineKind::Legacy);
    }

    #[test]
    fn test_loose_numbers() {
        let v = json!({"a": "42", "b": 7, "c": "x", "d": null});
        assert_eq!(loose_u64(v.get("a")), Some(42));
        assert_eq!(loose_u64(v.get("b")), Some(7));
        assert_eq!(loose_u64(v.get("c")), None);
        assert_eq!(loose_u64(v.get("d")), None);
        assert_eq!(loose_u64(v.get("missing")), None);
        assert_eq!(loose_i64(v.get("a")), Some(42));
    }
}
