use std::sync::OnceLock;

use regex::Regex;

/// A `[name](url)` pair lifted out of message content at render time.
/// Displayed under a "Sources" heading, separate from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationLink {
    pub name: String,
    pub url: String,
}

/// Square-bracket label followed immediately by a parenthesized destination.
fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern compiles"))
}

/// Collects every non-overlapping link match in order of appearance and
/// returns the body with the matched spans removed (surrounding text
/// concatenated, then trimmed). Re-running extraction on the returned body
/// yields no further matches.
pub fn extract_citations(content: &str) -> (String, Vec<CitationLink>) {
    let pattern = link_pattern();
    let links = pattern
        .captures_iter(content)
        .map(|caps| CitationLink {
            name: caps[1].to_string(),
            url: caps[2].to_string(),
        })
        .collect();
    let body = pattern.replace_all(content, "").trim().to_string();
    (body, links)
}
