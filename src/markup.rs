//! # Markup Module
//!
//! Provider summaries and instructions arrive as HTML fragments. This module
//! turns them into plain text for console output. It is not a sanitizer: callers
//! rendering HTML must run a real sanitizer on the raw fields instead.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BREAK_REGEX: Regex =
        Regex::new(r"(?i)<\s*(?:br\s*/?|/p|/li|/ol|/ul)\s*>").expect("Break pattern should be valid");
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").expect("Tag pattern should be valid");
    static ref BLANK_LINES_REGEX: Regex = Regex::new(r"\n\s*\n+").expect("Blank line pattern should be valid");
}

/// Strip tags and decode the common entities from an HTML fragment
pub fn to_plain_text(html: &str) -> String {
    let with_breaks = BREAK_REGEX.replace_all(html, "\n");
    let without_tags = TAG_REGEX.replace_all(&with_breaks, "");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let collapsed = BLANK_LINES_REGEX.replace_all(&decoded, "\n");
    collapsed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(to_plain_text("Just text."), "Just text.");
    }

    #[test]
    fn test_tags_are_removed() {
        let html = "Pasta with <b>garlic</b> and <a href=\"https://x\">lemon</a>.";
        assert_eq!(to_plain_text(html), "Pasta with garlic and lemon.");
    }

    #[test]
    fn test_script_tags_do_not_survive() {
        let html = "<script>alert('x')</script>Nice";
        assert_eq!(to_plain_text(html), "alert('x')Nice");
    }

    #[test]
    fn test_list_items_become_lines() {
        let html = "<ol><li>Boil water</li><li>Add pasta</li></ol>";
        assert_eq!(to_plain_text(html), "Boil water\nAdd pasta");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(to_plain_text("Salt &amp; pepper&nbsp;to taste"), "Salt & pepper to taste");
        assert_eq!(to_plain_text("&lt;b&gt;"), "<b>");
    }
}
