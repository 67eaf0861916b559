//! CSE Search command-line front end
//!
//! # Configuration
//! Set `GOOGLE_CSE_API_KEY` / `GOOGLE_CSE_ENGINE_ID` or configure in
//! `~/.cse-search/config.toml`

use anyhow::Result;
use clap::Parser;

use cse_search::{begin_search, Config, HttpTransport, SearchError};

mod cli;
mod output;

use cli::{Cli, Commands, SearchOverrides};

fn main() -> Result<()> {
    let cli = Cli::parse();

    search_common::init_tracing("cse_search", cli.verbose)?;

    let config = match cli.config {
        Some(path) => Config::load_explicit(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Search {
            query,
            overrides,
            pages,
        } => run_search(&config, &query.join(" "), &overrides, pages),
        Commands::Options { overrides } => {
            let mut options = config.options_for(overrides.scope.as_deref());
            overrides.apply(&mut options);
            print!("{}", toml::to_string_pretty(&options)?);
            Ok(())
        }
    }
}

fn run_search(config: &Config, query: &str, overrides: &SearchOverrides, pages: u32) -> Result<()> {
    let mut options = config.options_for(overrides.scope.as_deref());
    overrides.apply(&mut options);

    let transport = HttpTransport::new(&config.transport)?;
    let mut session = begin_search(query, &options, transport)?;
    tracing::info!(engine = %session.engine(), query, "Starting search");

    for n in 0..pages {
        let page = match session.next_page() {
            Ok(page) => page,
            Err(SearchError::NavigationExhausted(_)) => {
                tracing::info!("No more pages after {}", n);
                break;
            }
            Err(err) => return Err(err.into()),
        };

        if pages > 1 {
            println!("[{}] from #{}", page.title(), page.start_index());
        }
        println!(
            "{}",
            output::format_page(page, options.max_display_results, options.include_snippet)
        );
    }

    Ok(())
}
