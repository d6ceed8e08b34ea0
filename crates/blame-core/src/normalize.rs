use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Tidy a rewritten headline for display.
///
/// Collapses whitespace runs, trims, upper-cases the first character and makes
/// sure the sentence ends in `.`, `!` or `?`.
pub fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");

    let mut chars = collapsed.chars();
    let mut out: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    if !out.ends_with(|c| matches!(c, '.' | '!' | '?')) {
        out.push('.');
    }
    out
}
