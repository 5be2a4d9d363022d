//! Title normalization shared by both similarity spaces.
//!
//! The content catalog stores bare display titles ("Toy Story") while the
//! ratings catalog embeds the release year ("Toy Story (1995)"). Both are
//! reduced to the same matching key before they are compared.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parenthesized four digit year at the very end, with any whitespace before it
static TRAILING_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([0-9]{4}\)$").expect("Failed to compile trailing year regex"));

/// Canonicalize a display title into a matching key.
///
/// Strips a trailing `(YYYY)` group, trims surrounding whitespace and
/// lowercases. Stripping repeats while a year group is still trailing, which
/// keeps `normalize_title` idempotent for titles like `"X (1999) (2000)"`.
/// Parenthesized groups that are not a four digit year are kept.
///
/// ```
/// use sources::normalize_title;
///
/// assert_eq!(normalize_title("Toy Story (1995)"), "toy story");
/// assert_eq!(normalize_title("  Heat "), "heat");
/// assert_eq!(normalize_title("Blade Runner (Final Cut) (1982)"), "blade runner (final cut)");
/// ```
pub fn normalize_title(title: &str) -> String {
    let mut key = title.trim();
    while let Some(m) = TRAILING_YEAR.find(key) {
        key = key[..m.start()].trim_end();
    }
    key.to_lowercase()
}
