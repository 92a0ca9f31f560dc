//! Emoji filtering applied to every relayed text delta.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Code points with the Unicode `Emoji`, `Emoji_Component` or
/// `Extended_Pictographic` property, minus ASCII. The subtraction matters:
/// `0`-`9`, `#` and `*` carry the `Emoji` property and must survive.
fn emoji_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"[[\p{Emoji}\p{Emoji_Component}\p{Extended_Pictographic}]--[\x00-\x7F]]")
            .expect("emoji pattern compiles")
    })
}

/// Removes emoji code points, leaving the surrounding text untouched.
/// Returns the input unchanged (and unallocated) when nothing matches.
pub fn strip_emoji(text: &str) -> Cow<'_, str> {
    emoji_pattern().replace_all(text, "")
}
