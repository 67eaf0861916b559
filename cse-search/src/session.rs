//! Search sessions and the fetch-on-demand policy
//!
//! A [`Session`] owns one intent, one backend adapter and the pages fetched so
//! far. Forward page navigation serves cached pages first and only asks the
//! transport for a new page when positioned on the last cached one and the
//! page budget allows it. Backward navigation never fetches.

use crate::backends::{Backend, BackendAdapter, Outcome};
use crate::config::SearchOptions;
use crate::cursor::Cursor;
use crate::error::{Direction, SearchError, SearchResult};
use crate::transport::Transport;
use crate::types::{EngineKind, Page, PagingState, SearchIntent};

/// Start a session for `query` with the given options
///
/// No request is made until the first [`Session::next_page`].
pub fn begin_search<T: Transport>(
    query: &str,
    options: &SearchOptions,
    transport: T,
) -> SearchResult<Session<T>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Session::new(SearchIntent::new(query, options), options, transport)
}

/// Per-search navigation state
pub struct Session<T> {
    intent: SearchIntent,
    backend: Backend,
    transport: T,
    pages: Cursor<Page>,
}

impl<T: Transport> Session<T> {
    pub fn new(intent: SearchIntent, options: &SearchOptions, transport: T) -> SearchResult<Self> {
        let backend = Backend::new(&intent, options)?;
        tracing::debug!(
            engine = %backend.kind(),
            query = %intent.query,
            max_pages = intent.max_pages,
            "search session started"
        );

        Ok(Self {
            intent,
            backend,
            transport,
            pages: Cursor::new(),
        })
    }

    pub fn intent(&self) -> &SearchIntent {
        &self.intent
    }

    pub fn engine(&self) -> EngineKind {
        self.backend.kind()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Pages fetched so far, in fetch order
    pub fn pages(&self) -> &[Page] {
        self.pages.as_slice()
    }

    /// Index of the current page, `None` before the first fetch
    pub fn position(&self) -> Option<usize> {
        self.pages.position()
    }

    pub fn current_page(&self) -> SearchResult<&Page> {
        self.pages.current()
    }

    pub fn current_page_mut(&mut self) -> SearchResult<&mut Page> {
        self.pages.current_mut()
    }

    /// Offset the page after the current one would be requested at
    pub fn next_offset(&self) -> Option<u64> {
        self.pages.current().ok().and_then(Page::next_start)
    }

    /// Move to the next page, fetching it if it is not cached yet
    pub fn next_page(&mut self) -> SearchResult<&mut Page> {
        if self.pages.is_empty() {
            self.fetch(self.intent.start_offset)?;
            return self.pages.advance();
        }

        if self.pages.has_next() {
            return self.pages.advance();
        }

        let current = self.pages.current()?;
        if current.is_empty() {
            tracing::debug!(
                start_index = current.start_index(),
                "current page is empty, no further results"
            );
            return Err(SearchError::NavigationExhausted(Direction::Forward));
        }
        if self.intent.budget_reached(self.pages.len()) {
            tracing::debug!(
                fetched = self.pages.len(),
                max_pages = self.intent.max_pages,
                "page budget reached"
            );
            return Err(SearchError::NavigationExhausted(Direction::Forward));
        }

        let start = current.next_start().ok_or_else(|| {
            SearchError::MalformedResponse(format!(
                "next start offset after {} is out of range",
                current.start_index()
            ))
        })?;
        self.fetch(Some(start))?;
        self.pages.advance()
    }

    /// Move to the previous cached page
    pub fn previous_page(&mut self) -> SearchResult<&mut Page> {
        if self.pages.is_empty() {
            return Err(SearchError::NavigationExhausted(Direction::Backward));
        }
        self.pages.retreat()
    }

    fn fetch(&mut self, start: Option<u64>) -> SearchResult<()> {
        let request = self
            .backend
            .build_request(&self.intent, PagingState { start });
        tracing::debug!(
            engine = %self.backend.kind(),
            endpoint = request.endpoint(),
            start = ?start,
            "fetching page"
        );

        let response = self.transport.fetch(&request)?;
        let page = match self
            .backend
            .classify_outcome(response.status, &response.body)?
        {
            Outcome::Success(page) => page,
            Outcome::Failure(err) => {
                tracing::debug!(error = %err, "backend rejected request");
                return Err(err.into());
            }
        };

        if let Some(requested) = start {
            if page.start_index() != requested {
                tracing::warn!(
                    engine = %self.backend.kind(),
                    requested,
                    reported = page.start_index(),
                    "page start index differs from requested offset"
                );
            }
        }
        if let Some(last) = self.pages.last() {
            if page.start_index() <= last.start_index() {
                return Err(SearchError::MalformedResponse(format!(
                    "page start index {} does not follow {}",
                    page.start_index(),
                    last.start_index()
                )));
            }
        }

        tracing::debug!(
            start_index = page.start_index(),
            count = page.count(),
            "page appended"
        );
        self.pages.push(page);
        Ok(())
    }
}
