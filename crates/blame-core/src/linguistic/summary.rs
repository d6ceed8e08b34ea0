use super::tagger::{apply_edits, mentions, Edit, EntityKind, Mention, Tagger, Token};

const FAULT_CLAUSE: &str = "And frankly, it's all your mother's fault.";

/// Rewrite an article summary so that mother is behind it.
///
/// The first person, organization and place each get swapped for a mother
/// reference, "clumsily" goes in front of the first verb of the second
/// sentence (or the first, if there is only one), and a closing accusation is
/// appended unless the text already talks about fault.
pub(crate) fn rewrite_summary<T: Tagger>(tagger: &T, summary: &str) -> String {
    if summary.trim().is_empty() {
        return String::new();
    }

    let tokens = tagger.tag(summary);
    let found = mentions(&tokens);
    let mut edits = Vec::new();

    let person = found
        .iter()
        .find(|m| m.kind == EntityKind::Person)
        .filter(|m| !m.text(summary).to_lowercase().contains("mother"));
    if let Some(person) = person {
        edits.push(replace(&tokens, person, "your mother"));
    }
    if let Some(org) = found.iter().find(|m| m.kind == EntityKind::Organization) {
        edits.push(replace(&tokens, org, "your mother's bridge club"));
    }
    if let Some(place) = found.iter().find(|m| m.kind == EntityKind::Place) {
        edits.push(replace(&tokens, place, "your mother's basement"));
    }
    if let Some(insert) = clumsily(&tokens) {
        edits.push(insert);
    }

    let text = apply_edits(summary, edits);
    if text.contains("fault") {
        text
    } else {
        format!("{} {FAULT_CLAUSE}", text.trim_end())
    }
}

fn replace(tokens: &[Token], mention: &Mention, replacement: &str) -> Edit {
    let opens_sentence = mention.first == 0
        || tokens[mention.first - 1].sentence != tokens[mention.first].sentence;
    Edit {
        start: mention.start,
        end: mention.end,
        replacement: if opens_sentence {
            capitalize(replacement)
        } else {
            replacement.to_string()
        },
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn clumsily(tokens: &[Token]) -> Option<Edit> {
    let target = if tokens.iter().any(|t| t.sentence == 1) { 1 } else { 0 };
    let sentence: Vec<&Token> = tokens.iter().filter(|t| t.sentence == target).collect();
    if sentence.iter().any(|t| t.lower() == "clumsily") {
        return None;
    }
    let verb = sentence.iter().find(|t| t.is_verb())?;
    Some(Edit {
        start: verb.start,
        end: verb.start,
        replacement: "clumsily ".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::LexiconTagger;

    fn rewrite(summary: &str) -> String {
        rewrite_summary(&LexiconTagger::new(), summary)
    }

    #[test]
    fn test_blank_summary_is_empty() {
        assert_eq!(rewrite(""), "");
        assert_eq!(rewrite("   "), "");
    }

    #[test]
    fn test_entities_adverb_and_accusation() {
        let result = rewrite(
            "President Joe Biden visited Paris on Tuesday. He met officials at the Louvre.",
        );
        assert_eq!(
            result,
            "Your mother visited your mother's basement on Tuesday. He clumsily met officials \
             at the Louvre. And frankly, it's all your mother's fault."
        );
    }

    #[test]
    fn test_organization_is_replaced() {
        let result = rewrite("Shares in Apple fell sharply.");
        assert_eq!(
            result,
            "Shares in your mother's bridge club clumsily fell sharply. And frankly, it's all \
             your mother's fault."
        );
    }

    #[test]
    fn test_abbreviated_mentions_are_replaced_whole() {
        assert_eq!(
            rewrite("Dr. Fauci warns of flu season."),
            "Your mother clumsily warns of flu season. And frankly, it's all your mother's fault."
        );
        assert_eq!(
            rewrite("U.S. Senate passes climate bill."),
            "Your mother's bridge club clumsily passes climate bill. And frankly, it's all \
             your mother's fault."
        );
        assert_eq!(
            rewrite("St. Louis mayor resigns."),
            "Your mother's basement mayor clumsily resigns. And frankly, it's all your \
             mother's fault."
        );
    }

    #[test]
    fn test_existing_fault_is_not_repeated() {
        let result = rewrite("Experts agree it was nobody's fault.");
        assert_eq!(result.matches("fault").count(), 1);
        assert!(!result.contains("frankly"));
    }

    #[test]
    fn test_clumsily_is_not_doubled() {
        let result = rewrite("The cat clumsily knocked over a vase.");
        assert_eq!(result.matches("clumsily").count(), 1);
    }

    #[test]
    fn test_summary_without_entities_still_gets_blamed() {
        let result = rewrite("A glitter storm covered the town.");
        assert!(result.contains("clumsily covered"), "got: {result}");
        assert!(result.ends_with("it's all your mother's fault."));
    }
}
