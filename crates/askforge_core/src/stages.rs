use std::time::Duration;

/// Stage labels shown, one at a time, while a research-like query is pending.
/// Placeholder entries only; they are replaced once real content arrives.
pub const STAGE_LABELS: [&str; 4] = [
    "Searching for resources...",
    "Getting resources...",
    "Analyzing current data...",
    "Generating final response...",
];

/// Pause between consecutive stage markers.
pub const STAGE_DELAY: Duration = Duration::from_millis(300);

/// Phrases that mark a query as casual chatter rather than research.
const TRIVIAL_PHRASES: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "sup",
    "who are you",
    "generate image",
    "draw me",
    "create picture",
    "tell me a joke",
    "sing",
    "dance",
];

/// Whether the stage simulation should be skipped for this query.
///
/// Case-insensitive substring containment against a fixed short list; a
/// known heuristic that can false-positive on longer messages containing
/// one of the phrases.
pub(crate) fn is_trivial_query(text: &str) -> bool {
    let lowered = text.trim().to_lowercase();
    TRIVIAL_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
