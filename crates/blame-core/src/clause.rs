/// Clause rewriters used by the pattern rules.
///
/// Both functions take the tail of a matched headline and recast it so that it
/// reads naturally after "your mother". Neither ever returns an empty string
/// for non-empty input.
use std::sync::LazyLock;

use regex::Regex;

static LEADING_CONNECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:after|due to|because of|when|as)\s+").expect("valid regex")
});
static PASSIVE_FOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:are|were|is|was)\s+found\b").expect("valid regex"));
static LEADING_ACTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:put|pour|spread|release|dump|throw|cause|create|make)")
        .expect("valid regex")
});
static LEADING_PARTICIPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]+ing\s").expect("valid regex"));

static LEADING_THAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^that\s+").expect("valid regex"));
static ACTION_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s(?:threatens|damaging|destroying|killing|harming)\s").expect("valid regex")
});
static PASSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(.+?)\s+(?:is|are|was|were|has been|have been)\s+(.+?)(ing|ed)\s+(.+)")
        .expect("valid regex")
});
static LINKED_TO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(.+?)\s+linked to\s+(.+)").expect("valid regex"));
static LEADING_ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:the|a|an)\s+").expect("valid regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Recast a cause clause ("after heavy rainfall") as something your mother did.
///
/// Steps, in order:
/// 1. strip a leading connective (`after`, `due to`, `because of`, `when`, `as`)
/// 2. turn a passive "is/are/was/were found" into `put`
/// 3. prefix `caused ` unless the clause already opens with an action verb or
///    a present participle
pub fn blame_mother(cause: &str) -> String {
    let cause = LEADING_CONNECTIVE_RE.replace(cause, "");
    let cause = PASSIVE_FOUND_RE.replace(&cause, "put").into_owned();

    if LEADING_ACTION_RE.is_match(&cause) || LEADING_PARTICIPLE_RE.is_match(&cause) {
        cause
    } else {
        format!("caused {cause}")
    }
}

/// Recast the content of a "X reports that ..." headline so it follows
/// "your mother".
pub fn rewrite_content(content: &str) -> String {
    let content = LEADING_THAT_RE.replace(content, "");

    if ACTION_VERB_RE.is_match(&content) {
        return format!("is {content}");
    }

    // "crops were damaged by frost" -> "damaged crops by frost"
    if let Some(caps) = PASSIVE_RE.captures(&content) {
        let action = format!("{}{}", &caps[2], &caps[3]);
        let flipped = format!("{action} {} {}", &caps[1], &caps[4]);
        return WHITESPACE_RE.replace_all(flipped.trim(), " ").into_owned();
    }

    if let Some(caps) = LINKED_TO_RE.captures(&content) {
        return format!("linked her {} to {}", &caps[1], &caps[2]);
    }

    if LEADING_ARTICLE_RE.is_match(&content) {
        return format!("caused {content}");
    }

    format!("is responsible for {content}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blame_mother_strips_leading_connective() {
        let result = blame_mother("after heavy rainfall");
        assert!(!result.starts_with("after"), "got: {result}");
        assert_eq!(result, "caused heavy rainfall");

        assert_eq!(blame_mother("due to overfishing"), "caused overfishing");
        assert_eq!(blame_mother("Because of drought"), "caused drought");
    }

    #[test]
    fn test_blame_mother_flips_passive_found() {
        let result = blame_mother("chemicals are found in water");
        assert!(result.contains("put"), "got: {result}");
        assert!(!result.contains("found"));
    }

    #[test]
    fn test_blame_mother_leaves_words_containing_is_alone() {
        let result = blame_mother("this found object");
        assert!(result.contains("this found"), "got: {result}");
    }

    #[test]
    fn test_blame_mother_adds_causation_verb() {
        let result = blame_mother("the pollution");
        assert_eq!(result, "caused the pollution");
    }

    #[test]
    fn test_blame_mother_keeps_leading_action_verb() {
        assert_eq!(blame_mother("dumping waste"), "dumping waste");
        assert_eq!(blame_mother("released toxins"), "released toxins");
        assert_eq!(blame_mother("pouring oil"), "pouring oil");
    }

    #[test]
    fn test_blame_mother_keeps_leading_participle() {
        assert_eq!(blame_mother("melting ice caps"), "melting ice caps");
    }

    #[test]
    fn test_rewrite_content_drops_leading_that() {
        let result = rewrite_content("that pollution in rivers");
        assert_eq!(result, "is responsible for pollution in rivers");
    }

    #[test]
    fn test_rewrite_content_with_action_verb() {
        let result = rewrite_content("oil spill threatens marine wildlife");
        assert_eq!(result, "is oil spill threatens marine wildlife");
    }

    #[test]
    fn test_rewrite_content_flips_passive() {
        let result = rewrite_content("crops were damaged by frost");
        assert_eq!(result, "damaged crops by frost");
    }

    #[test]
    fn test_rewrite_content_linked_to() {
        let result = rewrite_content("pesticides linked to bee decline");
        assert_eq!(result, "linked her pesticides to bee decline");
    }

    #[test]
    fn test_rewrite_content_leading_article() {
        let result = rewrite_content("the worst flooding in decades");
        assert_eq!(result, "caused the worst flooding in decades");
    }

    #[test]
    fn test_rewrite_content_default() {
        let result = rewrite_content("pollution in rivers");
        assert_eq!(result, "is responsible for pollution in rivers");
    }
}
