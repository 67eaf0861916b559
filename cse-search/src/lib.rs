//! CSE Search Library
//!
//! Paginated web search over Google's Custom Search JSON API (`cse`) or the
//! older AJAX search API (`legacy`). A [`Session`] fetches pages lazily and
//! lets callers walk back and forth across pages, and across the items of a
//! page, without re-fetching anything already retrieved.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use cse_search::{begin_search, Config, HttpTransport};
//!
//! let config = Config::load()?;
//! let transport = HttpTransport::new(&config.transport)?;
//! let mut session = begin_search("python docs", &config.options_for(None), transport)?;
//!
//! let page = session.next_page()?;
//! while let Ok(item) = page.next_item() {
//!     println!("{}: <{}>", item.title(), item.link());
//! }
//! ```
//!
//! # Configuration
//! Set `GOOGLE_CSE_API_KEY` / `GOOGLE_CSE_ENGINE_ID` or configure in
//! `~/.cse-search/config.toml`

pub mod backends;
pub mod config;
pub mod cursor;
pub mod decode;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

// Re-export the session entry points
pub use session::{begin_search, Session};

// Re-export types for direct API usage
pub use backends::{Backend, BackendAdapter, Outcome};
pub use config::{Config, SearchOptions, TransportConfig};
pub use error::{Direction, EngineError, SearchError, SearchResult, TransportError};
pub use transport::{CannedTransport, HttpTransport, RawResponse, Transport};
pub use types::{EngineKind, Item, Page, PagingState, RequestParams, SafeLevel, SearchIntent};
