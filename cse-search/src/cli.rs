//! CLI argument definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use cse_search::{EngineKind, SafeLevel, SearchOptions};

#[derive(Parser)]
#[command(name = "cse-search")]
#[command(about = "Page through Google Custom Search results from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: CSE_SEARCH_CONFIG_PATH or ~/.cse-search/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace). Default is warn.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a search and print result pages
    Search {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
        #[command(flatten)]
        overrides: SearchOverrides,
        /// Number of pages to print
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Show the effective options for a scope (the API key is never printed)
    Options {
        #[command(flatten)]
        overrides: SearchOverrides,
    },
}

/// Flags layered over the configured options
#[derive(clap::Args, Debug, Default)]
pub struct SearchOverrides {
    /// Configuration scope (e.g. a channel name) to read options from
    #[arg(long)]
    pub scope: Option<String>,
    /// Backend variant: cse or legacy
    #[arg(long)]
    pub engine: Option<EngineKind>,
    /// Custom search engine id
    #[arg(long)]
    pub engine_id: Option<String>,
    /// Results requested per page
    #[arg(long, short = 'n')]
    pub number: Option<u32>,
    /// Maximum pages fetched per search (0 = unlimited)
    #[arg(long)]
    pub max_pages: Option<u32>,
    /// Maximum results shown per page
    #[arg(long)]
    pub display: Option<usize>,
    /// Show result snippets
    #[arg(long)]
    pub snippet: bool,
    /// Safe search level: high, medium or off
    #[arg(long)]
    pub safe: Option<SafeLevel>,
}

impl SearchOverrides {
    pub fn apply(&self, options: &mut SearchOptions) {
        if let Some(engine) = self.engine {
            options.engine = engine;
        }
        if let Some(id) = &self.engine_id {
            options.engine_id = Some(id.clone());
        }
        if let Some(n) = self.number {
            options.max_page_results = n;
        }
        if let Some(n) = self.max_pages {
            options.max_pages = n;
        }
        if let Some(n) = self.display {
            options.max_display_results = n;
        }
        if self.snippet {
            options.include_snippet = true;
        }
        if let Some(level) = self.safe {
            options.safe_level = level;
        }
    }
}
