//! Plain-text rendering of result pages

use cse_search::{Item, Page};

/// Reply shown for a page without results
pub const NO_RESULTS: &str = "No results found.";

/// Render up to `limit` items of a page on one line
///
/// A single entry is shown bare; several are numbered and joined with ` | `.
pub fn format_page(page: &Page, limit: usize, include_snippet: bool) -> String {
    let entries: Vec<String> = page
        .items()
        .iter()
        .take(limit)
        .map(|item| format_item(item, include_snippet))
        .collect();

    match entries.len() {
        0 => NO_RESULTS.to_string(),
        1 => entries.into_iter().next().unwrap_or_default(),
        _ => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("#{} {}", i + 1, entry))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

fn format_item(item: &Item, include_snippet: bool) -> String {
    let mut value = format!("{}: <{}>", item.title(), item.link());
    if include_snippet && !item.snippet().is_empty() {
        value.push(' ');
        value.push_str(item.snippet());
    }
    value
}
