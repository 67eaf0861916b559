//! AJAX web search backend
//!
//! The legacy API caps the page size at eight results, reports only a page
//! index instead of a start offset, and reports logical errors inside an
//! HTTP 200 body through `responseStatus`/`responseDetails`.

use serde_json::Value;

use super::{loose_i64, loose_u64, str_field, BackendAdapter, Outcome};
use crate::decode::{normalize_link, normalize_text};
use crate::error::{EngineError, SearchError, SearchResult};
use crate::types::{EngineKind, Item, Page, PagingState, RequestParams, SafeLevel, SearchIntent};

pub const LEGACY_ENDPOINT: &str = "https://ajax.googleapis.com/ajax/services/search/web";

/// Largest page size the legacy API accepts
pub const LEGACY_MAX_RESULTS: u32 = 8;

/// Adapter for the AJAX web search API
#[derive(Debug, Clone)]
pub struct LegacyAdapter {
    items_per_page: u32,
    query: String,
}

impl LegacyAdapter {
    /// `requested` is clamped to [`LEGACY_MAX_RESULTS`]
    pub fn new(requested: u32, query: impl Into<String>) -> Self {
        let items_per_page = requested.min(LEGACY_MAX_RESULTS);
        if items_per_page < requested {
            tracing::debug!(
                requested,
                items_per_page,
                "clamped legacy page size to backend maximum"
            );
        }
        Self {
            items_per_page,
            query: query.into(),
        }
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    fn safe_param(level: SafeLevel) -> &'static str {
        match level {
            SafeLevel::High => "active",
            SafeLevel::Medium => "moderate",
            SafeLevel::Off => "off",
        }
    }

    /// Start offset implied by a page index.
    ///
    /// Assumes every earlier page held exactly `items_per_page` results; the
    /// session warns when a page lands somewhere other than where it asked.
    fn derive_start_index(&self, page_index: i64) -> SearchResult<u64> {
        if page_index <= 0 {
            return Ok(0);
        }
        (page_index as u64)
            .checked_mul(u64::from(self.items_per_page))
            .ok_or_else(|| {
                SearchError::MalformedResponse(format!("page index {} is out of range", page_index))
            })
    }

    fn parse_item(raw: &Value) -> SearchResult<Item> {
        let title = str_field(raw, "titleNoFormatting")
            .or_else(|| str_field(raw, "title"))
            .ok_or_else(|| SearchError::MalformedResponse("result without title".into()))?;
        let link = str_field(raw, "url")
            .or_else(|| str_field(raw, "unescapedUrl"))
            .ok_or_else(|| SearchError::MalformedResponse("result without url".into()))?;
        let snippet = str_field(raw, "content").unwrap_or_default();

        Ok(Item::new(
            normalize_text(title),
            normalize_link(link),
            normalize_text(snippet),
        ))
    }

    fn engine_error(code: i64, body: Option<&Value>) -> EngineError {
        let reason = body.and_then(|b| str_field(b, "responseDetails"));
        EngineError::new(EngineKind::Legacy, code).with_reason(reason)
    }
}

impl BackendAdapter for LegacyAdapter {
    fn kind(&self) -> EngineKind {
        EngineKind::Legacy
    }

    fn build_request(&self, intent: &SearchIntent, paging: PagingState) -> RequestParams {
        let mut params = vec![
            ("v", "1.0".to_string()),
            ("q", intent.query.clone()),
            ("rsz", self.items_per_page.to_string()),
            ("safe", Self::safe_param(intent.safe).to_string()),
        ];

        if let Some(start) = paging.start {
            params.push(("start", start.to_string()));
        }

        RequestParams::new(LEGACY_ENDPOINT, params)
    }

    fn parse_response(&self, raw: &str) -> SearchResult<Page> {
        let body: Value = serde_json::from_str(raw)?;

        let data = body
            .get("responseData")
            .filter(|d| d.is_object())
            .ok_or_else(|| SearchError::MalformedResponse("missing responseData".into()))?;

        // No-results responses carry an empty result list and a cursor
        // without paging fields.
        let results = match data.get("results") {
            Some(Value::Array(results)) => results
                .iter()
                .map(Self::parse_item)
                .collect::<SearchResult<Vec<_>>>()?,
            Some(_) => {
                return Err(SearchError::MalformedResponse("results is not a list".into()));
            }
            None => return Err(SearchError::MalformedResponse("missing results".into())),
        };

        let cursor = data.get("cursor");
        let page_index = loose_i64(cursor.and_then(|c| c.get("currentPageIndex"))).unwrap_or(0);
        let total = loose_u64(cursor.and_then(|c| c.get("estimatedResultCount")));

        let start_index = self.derive_start_index(page_index)?;
        Ok(Page::new(start_index, self.query.clone(), results).with_total_results(total))
    }

    fn classify_outcome(&self, status: u16, raw: &str) -> SearchResult<Outcome> {
        let body = serde_json::from_str::<Value>(raw).ok();

        if status >= 400 {
            let code = loose_i64(body.as_ref().and_then(|b| b.get("responseStatus")))
                .unwrap_or(i64::from(status));
            return Ok(Outcome::Failure(Self::engine_error(code, body.as_ref())));
        }

        // HTTP 200 does not mean success here: the body carries its own status
        let Some(body) = body else {
            return Err(SearchError::MalformedResponse("response is not JSON".into()));
        };
        if let Some(code) = loose_i64(body.get("responseStatus")) {
            if code != 200 {
                return Ok(Outcome::Failure(Self::engine_error(code, Some(&body))));
            }
        }
        let data_missing = body.get("responseData").map_or(true, Value::is_null);
        if data_missing && str_field(&body, "responseDetails").is_some() {
            return Ok(Outcome::Failure(Self::engine_error(
                i64::from(status),
                Some(&body),
            )));
        }

        self.parse_response(raw).map(Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchOptions;
    use serde_json::json;

    fn intent(count: u32) -> SearchIntent {
        let options = SearchOptions {
            engine: EngineKind::Legacy,
            max_page_results: count,
            ..SearchOptions::default()
        };
        SearchIntent::new("python docs", &options)
    }

    #[test]
    fn test_page_size_clamped() {
        let adapter = LegacyAdapter::new(20, "python docs");
        assert_eq!(adapter.items_per_page(), 8);
        let req = adapter.build_request(&intent(20), PagingState::default());
        assert_eq!(req.param("rsz"), Some("8"));

        let adapter = LegacyAdapter::new(4, "python docs");
        let req = adapter.build_request(&intent(4), PagingState::default());
        assert_eq!(req.param("rsz"), Some("4"));
    }

    #[test]
    fn test_build_request_params() {
        let adapter = LegacyAdapter::new(4, "python docs");
        let req = adapter.build_request(&intent(4), PagingState { start: Some(4) });
        assert_eq!(req.endpoint(), LEGACY_ENDPOINT);
        assert_eq!(req.param("v"), Some("1.0"));
        assert_eq!(req.param("q"), Some("python docs"));
        assert_eq!(req.param("safe"), Some("moderate"));
        assert_eq!(req.param("start"), Some("4"));
        assert_eq!(req.param("key"), None);
    }

    #[test]
    fn test_start_index_derived_from_page_index() {
        let adapter = LegacyAdapter::new(4, "q");
        let page_at = |index: i64| {
            json!({
                "responseData": {
                    "results": [{"titleNoFormatting": "t", "url": "http://a", "content": "c"}],
                    "cursor": {"currentPageIndex": index, "estimatedResultCount": "1200"}
                },
                "responseDetails": null,
                "responseStatus": 200
            })
            .to_string()
        };

        assert_eq!(adapter.parse_response(&page_at(0)).unwrap().start_index(), 0);
        assert_eq!(adapter.parse_response(&page_at(1)).unwrap().start_index(), 4);
        assert_eq!(adapter.parse_response(&page_at(3)).unwrap().start_index(), 12);
        assert_eq!(adapter.parse_response(&page_at(-1)).unwrap().start_index(), 0);
        assert_eq!(
            adapter.parse_response(&page_at(1)).unwrap().total_results(),
            Some(1200)
        );
    }

    #[test]
    fn test_huge_page_index_is_malformed() {
        let adapter = LegacyAdapter::new(4, "q");
        let raw = json!({
            "responseData": {
                "results": [{"titleNoFormatting": "t", "url": "http://a"}],
                "cursor": {"currentPageIndex": i64::MAX}
            },
            "responseStatus": 200
        })
        .to_string();
        assert!(matches!(
            adapter.classify_outcome(200, &raw),
            Err(SearchError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_results_list_required() {
        let adapter = LegacyAdapter::new(4, "q");
        for data in [json!({"cursor": {}}), json!({"results": null, "cursor": {}})] {
            let raw = json!({"responseData": data, "responseStatus": 200}).to_string();
            assert!(matches!(
                adapter.parse_response(&raw),
                Err(SearchError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_items_normalized() {
        let adapter = LegacyAdapter::new(4, "python docs");
        let raw = json!({
            "responseData": {
                "results": [{
                    "title": "<b>Python</b> docs",
                    "titleNoFormatting": "Python docs &amp; more",
                    "url": "http://docs.python.org/%3Fv%3D3",
                    "content": "The <b>official</b>\ndocs"
                }],
                "cursor": {"currentPageIndex": 0}
            },
            "responseStatus": 200
        })
        .to_string();
        let page = adapter.parse_response(&raw).unwrap();
        assert_eq!(page.title(), "python docs");
        let item = &page.items()[0];
        assert_eq!(item.title(), "Python docs & more");
        assert_eq!(item.link(), "http://docs.python.org/?v=3");
        assert_eq!(item.snippet(), "The official docs");
    }

    #[test]
    fn test_no_results_shape() {
        let adapter = LegacyAdapter::new(4, "q");
        let raw = json!({
            "responseData": {
                "results": [],
                "cursor": {"moreResultsUrl": "http://www.google.com/search?q=zzz"}
            },
            "responseDetails": null,
            "responseStatus": 200
        })
        .to_string();
        match adapter.classify_outcome(200, &raw).unwrap() {
            Outcome::Success(page) => {
                assert_eq!(page.count(), 0);
                assert_eq!(page.start_index(), 0);
            }
            Outcome::Failure(err) => panic!("unexpected failure: {}", err),
        }
    }

    #[test]
    fn test_logical_error_under_http_200() {
        let adapter = LegacyAdapter::new(4, "q");
        let raw = json!({
            "responseData": null,
            "responseDetails": "invalid resultSize",
            "responseStatus": 400
        })
        .to_string();
        match adapter.classify_outcome(200, &raw).unwrap() {
            Outcome::Failure(err) => {
                assert_eq!(err.engine, EngineKind::Legacy);
                assert_eq!(err.code, 400);
                assert_eq!(err.to_string(), "(legacy) 400: invalid resultSize");
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_null_data_with_details_is_failure() {
        let adapter = LegacyAdapter::new(4, "q");
        let raw = r#"{"responseData": null, "responseDetails": "Suspected Terms of Service Abuse"}"#;
        match adapter.classify_outcome(200, raw).unwrap() {
            Outcome::Failure(err) => {
                assert_eq!(err.to_string(), "(legacy) 200: Suspected Terms of Service Abuse")
            }
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_http_error_status() {
        let adapter = LegacyAdapter::new(4, "q");
        match adapter.classify_outcome(503, "Service Unavailable").unwrap() {
            Outcome::Failure(err) => assert_eq!(err.to_string(), "(legacy) 503"),
            Outcome::Success(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn test_non_json_success_is_malformed() {
        let adapter = LegacyAdapter::new(4, "q");
        assert!(matches!(
            adapter.classify_outcome(200, "<html></html>"),
            Err(SearchError::MalformedResponse(_))
        ));
    }
}
