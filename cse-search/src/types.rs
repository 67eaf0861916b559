//! Common types for search sessions
//!
//! These types are shared by both backend variants so that callers only ever
//! see one normalized model of pages and items.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SearchOptions;
use crate::cursor::Cursor;
use crate::error::SearchResult;

/// Backend schema/protocol a session talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Custom Search JSON API (v1)
    #[default]
    Cse,
    /// AJAX web search API
    Legacy,
}

impl EngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Cse => "cse",
            EngineKind::Legacy => "legacy",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cse" => Ok(EngineKind::Cse),
            "legacy" => Ok(EngineKind::Legacy),
            other => Err(format!("unknown engine '{}' (expected cse or legacy)", other)),
        }
    }
}

/// Result filtering level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeLevel {
    High,
    #[default]
    Medium,
    Off,
}

impl SafeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeLevel::High => "high",
            SafeLevel::Medium => "medium",
            SafeLevel::Off => "off",
        }
    }
}

impl fmt::Display for SafeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Ok(SafeLevel::High),
            "medium" => Ok(SafeLevel::Medium),
            "off" => Ok(SafeLevel::Off),
            other => Err(format!(
                "unknown safe level '{}' (expected high, medium or off)",
                other
            )),
        }
    }
}

/// What the caller asked for; fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIntent {
    /// The search query text
    pub query: String,
    /// Items requested per page
    pub count: u32,
    pub safe: SafeLevel,
    pub engine: EngineKind,
    /// Maximum number of pages fetched over the session (0 = unlimited)
    pub max_pages: u32,
    /// Offset for the very first fetch, if not the backend default
    pub start_offset: Option<u64>,
}

impl SearchIntent {
    pub fn new(query: impl Into<String>, options: &SearchOptions) -> Self {
        Self {
            query: query.into(),
            count: options.max_page_results,
            safe: options.safe_level,
            engine: options.engine,
            max_pages: options.max_pages,
            start_offset: None,
        }
    }

    pub fn with_start_offset(mut self, start: u64) -> Self {
        self.start_offset = Some(start);
        self
    }

    /// Whether `fetched` pages already use up the page budget.
    pub fn budget_reached(&self, fetched: usize) -> bool {
        self.max_pages != 0 && fetched >= self.max_pages as usize
    }
}

/// One normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    title: String,
    link: String,
    snippet: String,
}

impl Item {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

/// One fetched batch of results with its own item cursor
///
/// `count()` is always the number of items physically present.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    start_index: u64,
    title: String,
    total_results: Option<u64>,
    items: Cursor<Item>,
}

impl Page {
    pub fn new(start_index: u64, title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            start_index,
            title: title.into(),
            total_results: None,
            items: Cursor::from(items),
        }
    }

    pub fn with_total_results(mut self, total: Option<u64>) -> Self {
        self.total_results = total;
        self
    }

    /// Offset of the first item in the overall result stream
    pub fn start_index(&self) -> u64 {
        self.start_index
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Backend estimate of the total result count, when reported
    pub fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Offset where the page after this one starts
    ///
    /// `None` when the offset does not fit in a `u64`.
    pub fn next_start(&self) -> Option<u64> {
        self.start_index.checked_add(self.count() as u64)
    }

    pub fn items(&self) -> &[Item] {
        self.items.as_slice()
    }

    pub fn next_item(&mut self) -> SearchResult<&Item> {
        Ok(self.items.advance()?)
    }

    pub fn previous_item(&mut self) -> SearchResult<&Item> {
        Ok(self.items.retreat()?)
    }

    pub fn current_item(&self) -> SearchResult<&Item> {
        self.items.current()
    }
}

/// Paging input to a request build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagingState {
    /// Backend start offset; `None` lets the backend pick its first page
    pub start: Option<u64>,
}

/// An outbound request, fully built by a backend adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    endpoint: &'static str,
    params: Vec<(&'static str, String)>,
}

impl RequestParams {
    pub fn new(endpoint: &'static str, params: Vec<(&'static str, String)>) -> Self {
        Self { endpoint, params }
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    /// Look up a parameter value by key
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full request URL with the parameters encoded as a query string
    pub fn to_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(self.endpoint, self.params.iter().map(|(k, v)| (*k, v.as_str())))
    }
}
