//! Normalization of backend-escaped text
//!
//! Both backends return HTML-escaped titles and snippets; the legacy backend
//! also wraps query terms in `<b>` tags and percent-encodes its links.

use scraper::Html;

/// Decode entities, drop inline markup and collapse whitespace.
pub fn normalize_text(raw: &str) -> String {
    if !raw.contains(|c: char| c == '&' || c == '<') {
        return compress_whitespace(raw);
    }
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    compress_whitespace(&text)
}

/// Percent-decode a link, then decode any HTML entities in it.
///
/// Links that do not decode to valid UTF-8 are kept as sent.
pub fn normalize_link(raw: &str) -> String {
    let trimmed = raw.trim();
    let unescaped = urlencoding::decode(trimmed)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| trimmed.to_string());
    normalize_text(&unescaped)
}

fn compress_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(normalize_text("Python 3 docs"), "Python 3 docs");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(
            normalize_text("Tom &amp; Jerry&#39;s &quot;house&quot;"),
            "Tom & Jerry's \"house\""
        );
        assert_eq!(normalize_text("a&nbsp;b"), "a b");
    }

    #[test]
    fn test_inline_markup_stripped() {
        assert_eq!(
            normalize_text("Overview &mdash; <b>Python</b> v3 <b>documentation</b>"),
            "Overview \u{2014} Python v3 documentation"
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(
            normalize_text("  Welcome to\nPython.org.   The official\n home "),
            "Welcome to Python.org. The official home"
        );
    }

    #[test]
    fn test_link_unescaped() {
        assert_eq!(
            normalize_text("https://example.com/?a=1&amp;b=2"),
            "https://example.com/?a=1&b=2"
        );
        assert_eq!(
            normalize_link("http://www.python.org/doc/%3Fversion%3D3"),
            "http://www.python.org/doc/?version=3"
        );
    }

    #[test]
    fn test_invalid_utf8_link_kept() {
        assert_eq!(normalize_link("http://example.com/%FF"), "http://example.com/%FF");
    }
}
