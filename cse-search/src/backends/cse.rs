//! Custom Search JSON API (v1) backend
//!
//! See: https://developers.google.com/custom-search/v1/reference/rest/v1/cse/list
//!
//! Page metadata lives in `queries.request[0]`, results in `items[]`. A
//! search with no results simply omits `items`. Failures are signalled by the
//! HTTP status and described by an `error` object in the body.

use serde_json::Value;

use super::{loose_i64, loose_u64, str_field, BackendAdapter, Outcome};
use crate::decode::{normalize_link, normalize_text};
use crate::error::{EngineError, SearchError, SearchResult};
use crate::types::{EngineKind, Item, Page, PagingState, RequestParams, SearchIntent};

pub const CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Adapter for the Custom Search JSON API
#[derive(Debug, Clone)]
pub struct CseAdapter {
    api_key: String,
    engine_id: String,
}

impl CseAdapter {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
        }
    }

    fn parse_item(raw: &Value) -> SearchResult<Item> {
        let title = str_field(raw, "title")
            .ok_or_else(|| SearchError::MalformedResponse("item without title".into()))?;
        let link = str_field(raw, "link")
            .ok_or_else(|| SearchError::MalformedResponse("item without link".into()))?;
        let snippet = str_field(raw, "snippet").unwrap_or_default();

        Ok(Item::new(
            normalize_text(title),
            normalize_link(link),
            normalize_text(snippet),
        ))
    }

    fn engine_error(status: u16, raw: &str) -> EngineError {
        let Ok(body) = serde_json::from_str::<Value>(raw) else {
            return EngineError::new(EngineKind::Cse, i64::from(status));
        };
        let Some(error) = body.get("error") else {
            return EngineError::new(EngineKind::Cse, i64::from(status));
        };

        let code = loose_i64(error.get("code")).unwrap_or(i64::from(status));
        let reason = error
            .get("errors")
            .and_then(|errors| errors.get(0))
            .and_then(|first| str_field(first, "reason"));

        EngineError::new(EngineKind::Cse, code)
            .with_message(str_field(error, "message"))
            .with_reason(reason)
    }
}

impl BackendAdapter for CseAdapter {
    fn kind(&self) -> EngineKind {
        EngineKind::Cse
    }

    fn build_request(&self, intent: &SearchIntent, paging: PagingState) -> RequestParams {
        let mut params = vec![
            ("key", self.api_key.clone()),
            ("cx", self.engine_id.clone()),
            ("q", intent.query.clone()),
            ("num", intent.count.to_string()),
            ("safe", intent.safe.as_str().to_string()),
        ];

        if let Some(start) = paging.start {
            params.push(("start", start.to_string()));
        }

        RequestParams::new(CSE_ENDPOINT, params)
    }

    fn parse_response(&self, raw: &str) -> SearchResult<Page> {
        let body: Value = serde_json::from_str(raw)?;

        let request = body
            .pointer("/queries/request/0")
            .ok_or_else(|| SearchError::MalformedResponse("missing queries.request[0]".into()))?;
        let start_index = loose_u64(request.get("startIndex")).ok_or_else(|| {
            SearchError::MalformedResponse("missing queries.request[0].startIndex".into())
        })?;
        let title = str_field(request, "title").unwrap_or_default();
        let total = loose_u64(request.get("totalResults"));

        let items = match body.get("items") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(Self::parse_item)
                .collect::<SearchResult<Vec<_>>>()?,
            Some(_) => {
                return Err(SearchError::MalformedResponse("items is not a list".into()));
            }
        };

        Ok(Page::new(start_index, normalize_text(title), items).with_total_results(total))
    }

    fn classify_outcome(&self, status: u16, raw: &str) -> SearchResult<Outcome> {
        if status >= 400 {
            return Ok(Outcome::Failure(Self::engine_error(status, raw)));
        }
        self.parse_response(raw).map(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchOptions;
    use serde_json::json;

    fn adapter() -> CseAdapter {
        CseAdapter::new("testkey", "TestEngine")
    }

    fn intent() -> SearchIntent {
        SearchIntent::new("python docs", &SearchOptions::default())
    }

    #[test]
    fn test_build_request_first_page() {
        let req = adapter().build_request(&intent(), PagingState::default());
        assert_eq!(req.endpoint(), CSE_ENDPOINT);
        assert_eq!(req.param("key"), Some("testkey"));
        assert_eq!(req.param("cx"), Some("TestEngine"));
        assert_eq!(req.param("q"), Some("python docs"));
        assert_eq!(req.param("num"), Some("10"));
        assert_eq!(req.param("safe"), Some("medium"));
        assert_eq!(req.param("start"), None);
    }

    #[test]
    fn test_build_request_with_start() {
        let req = adapter().build_request(&intent(), PagingState { start: Some(11) });
        assert_eq!(req.param("start"), Some("11"));
    }

    #[test]
    fn test_parse_page() {
        let raw = json!({
            "queries": {"request": [{
                "title": "Google Custom Search - python docs",
                "totalResults": "2",
                "startIndex": 1,
                "count": 2
            }]},
            "items": [
                {"title": "Overview &mdash; Python", "link": "https://docs.python.org/", "snippet": "The\nofficial docs"},
                {"title": "Python.org", "link": "https://www.python.org/"}
            ]
        })
        .to_string();

        let page = adapter().parse_response(&raw).unwrap();
        assert_eq!(page.start_index(), 1);
        assert_eq!(page.count(), 2);
        assert_eq!(page.title(), "Google Custom Search - python docs");
        assert_eq!(page.total_results(), Some(2));
        assert_eq!(page.items()[0].title(), "Overview \u{2014} Python");
        assert_eq!(page.items()[0].snippet(), "The official docs");
        assert_eq!(page.items()[1].snippet(), "");
    }

    #[test]
    fn test_zero_results_is_empty_page() {
        let raw = json!({
            "queries": {"request": [{"title": "x", "totalResults": "0", "startIndex": 1}]}
        })
        .to_string();
        let outcome = adapter().classify_outcome(200, &raw).unwrap();
        match outcome {
            Outcome::Success(page) => {
                assert_eq!(page.count(), 0);
                assert_eq!(page.total_results(), Some(0));
            }
            Outcome::Failure(err) => panic!("unexpected failure: {}", err),
        }
    }

    #[test]
    fn test_missing_request_metadata_is_malformed() {
        let err = adapter().parse_response(r#"{"items": []}"#).unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));

        let err = adapter()
            .parse_response(r#"{"queries": {"request": [{"title": "x"}]}}"#)
            .unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));

        let err = adapter().parse_response("not json").unwrap_err();
        assert!(matches!(err, SearchError::MalformedResponse(_)));
    }

    #[test]
    fn test_item_without_link_is_malformed() {
        let raw = json!({
            "queries": {"request": [{"startIndex": 1}]},
            "items": [{"title": "no link"}]
        })
        .to_string();
        assert!(matches!(
            adapter().parse_response(&raw),
            Err(SearchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_error_body_classified() {
        let raw = json!({"error": {
            "code": 400,
            "message": "Bad Request",
            "errors": [{"domain": "usageLimits", "reason": "keyInvalid", "message": "Bad Request"}]
        }})
        .to_string();
        match adapter().classify_outcome(400, &raw).unwrap() {
            Outcome::Failure(err) => {
                assert_eq!(err.to_string(), "(cse) 400: Bad Request: keyInvalid")
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_error_without_body_uses_status() {
        match adapter().classify_outcome(503, "<html>unavailable</html>").unwrap() {
            Outcome::Failure(err) => assert_eq!(err.to_string(), "(cse) 503"),
            Outcome::Success(_) => panic!("expected failure"),
        }
    }
}
