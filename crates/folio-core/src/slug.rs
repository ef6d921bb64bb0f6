//! Slug and path derivation.

use std::sync::LazyLock;

use regex::Regex;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid slug pattern"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid pattern"));

/// Derives a URL-safe slug from a title.
///
/// Lowercases, drops anything that is not a word character, whitespace or
/// hyphen, turns whitespace runs into `-` and collapses repeated hyphens.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_owned()
}

/// Builds a page path from its slug, nested under `parent_path` if given.
pub fn page_path(parent_path: Option<&str>, slug: &str) -> String {
    let parent = parent_path
        .map(|path| path.trim_end_matches('/'))
        .filter(|path| !path.is_empty());

    match parent {
        Some(parent) if parent.starts_with('/') => format!("{parent}/{slug}"),
        Some(parent) => format!("/{parent}/{slug}"),
        None => format!("/{slug}"),
    }
}
