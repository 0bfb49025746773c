//! Project-number extraction from the subject line.

use std::sync::OnceLock;

use regex::Regex;

/// First parenthesized group in a subject, e.g. `PROJ001` in
/// `"Monthly Report (PROJ001)"`.
fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\(([^)]*)\)").expect("project-number pattern must compile"))
}

/// Extract the project number from a subject line.
///
/// Returns the inner text of the first `(...)` span verbatim — no trimming,
/// no case normalization, no shape validation. Adjacent parentheses yield
/// `Some("")`, a present-but-empty identifier distinct from `None`.
pub fn project_id(subject: &str) -> Option<&str> {
    pattern()
        .captures(subject)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
