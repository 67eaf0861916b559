//! Search Common - Shared utilities for the search crates
//!
//! - **Initialization**: [`init_tracing`] for standardized logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! search_common::init_tracing("cse_search", cli.verbose)?;
//! ```

pub mod init;

// Re-export commonly used items at crate root
pub use init::{default_level, init_tracing};
