/// Vocabulary that marks a headline as blame-worthy.
///
/// Matching is plain substring containment on the lower-cased headline, so
/// "declines" and "declining" both hit `decline`.
pub const PROBLEM_WORDS: &[&str] = &[
    "decline",
    "crisis",
    "disaster",
    "damage",
    "destroy",
    "pollution",
    "contamination",
    "chemicals",
    "toxic",
    "harmful",
    "endangered",
    "threat",
    "risk",
    "problem",
    "issue",
    "concern",
    "loss",
    "death",
];

/// Returns `true` when the headline mentions at least one problem word.
pub fn is_suitable(headline: &str) -> bool {
    let lower = headline.to_lowercase();
    PROBLEM_WORDS.iter().any(|word| lower.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_headlines_are_suitable() {
        assert!(is_suitable("Population decline threatens species"));
        assert!(is_suitable("Chemical pollution in water"));
        assert!(is_suitable("Climate crisis worsens"));
    }

    #[test]
    fn test_neutral_headlines_are_not_suitable() {
        assert!(!is_suitable("New park opens downtown"));
        assert!(!is_suitable("Festival celebrates local culture"));
        assert!(!is_suitable(""));
    }

    #[test]
    fn test_matching_ignores_case_and_inflection() {
        assert!(is_suitable("TOXIC Spill Closes Beach"));
        assert!(is_suitable("Species declining fast"));
        assert!(is_suitable("Deaths rise after storm"));
    }

    #[test]
    fn test_is_deterministic() {
        let headline = "Endangered frogs face new threat";
        let first = is_suitable(headline);
        for _ in 0..10 {
            assert_eq!(is_suitable(headline), first);
        }
    }
}
