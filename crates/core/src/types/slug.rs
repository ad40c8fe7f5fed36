//! URL slug generation.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid disallowed-chars regex"));
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_]+").expect("valid separator regex"));
static EDGE_HYPHENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+|-+$").expect("valid edge-hyphen regex"));

/// Turn arbitrary text into a URL slug.
///
/// Lowercases and trims the input, drops everything except ASCII word
/// characters, whitespace and hyphens, turns runs of whitespace/underscores
/// into a single hyphen and strips leading and trailing hyphens.
///
/// ```
/// use bharat_core::slugify;
///
/// assert_eq!(slugify("Men's T-Shirt!"), "mens-t-shirt");
/// assert_eq!(slugify("  Heritage   Collection "), "heritage-collection");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATOR_RE.replace_all(&stripped, "-");
    EDGE_HYPHENS_RE.replace_all(&hyphenated, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Men's T-Shirt!"), "mens-t-shirt");
    }

    #[test]
    fn test_slugify_collapses_whitespace_and_underscores() {
        assert_eq!(slugify("Indigo  Block__Print Kurti"), "indigo-block-print-kurti");
    }

    #[test]
    fn test_slugify_trims_edge_hyphens() {
        assert_eq!(slugify("--Essential White Basics--"), "essential-white-basics");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_keeps_interior_hyphen_runs() {
        assert_eq!(slugify("a - b"), "a---b");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Madhubani ₹999 Tee"), "madhubani-999-tee");
    }
}
