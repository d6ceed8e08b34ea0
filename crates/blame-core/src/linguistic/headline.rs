use tracing::debug;

use super::lexicon::is_be_form;
use super::tagger::{mentions, EntityKind, Pos, Tagger, Token};
use crate::engine::FALLBACK_PREFIX;

const PERSON_REPLACEMENT: &str = "Your mother";
const ORGANIZATION_REPLACEMENT: &str = "Your mother's bridge club";

/// Put mother in charge of a headline the pattern rules could not parse.
///
/// Tries, in order: a leading person doing something, a leading organization
/// doing something, the first noun phrase of the first clause. If none of
/// these apply the fallback prefix is prepended.
pub(crate) fn rewrite_headline<T: Tagger>(tagger: &T, headline: &str) -> String {
    let tokens = tagger.tag(headline);

    if let Some(leading) = mentions(&tokens).into_iter().find(|m| m.first == 0) {
        let acts = tokens.get(leading.last).is_some_and(Token::is_verb);
        let replacement = match leading.kind {
            EntityKind::Person if acts => Some(PERSON_REPLACEMENT),
            EntityKind::Organization if acts => Some(ORGANIZATION_REPLACEMENT),
            _ => None,
        };
        if let Some(replacement) = replacement {
            debug!(kind = ?leading.kind, "replacing leading entity");
            return splice(headline, leading.start, leading.end, replacement);
        }
    }

    let clause = &tokens[..first_clause_end(&tokens)];
    if let Some((first, last)) = leading_noun_phrase(clause) {
        let (start, end) = (clause[first].start, clause[last - 1].end);
        if !headline[start..end].to_lowercase().contains("mother") {
            if is_passive(clause, last) {
                debug!(phrase = &headline[start..end], "noun phrase is a passive subject");
            }
            let replacement = if first == 0 { "Your mother" } else { "your mother" };
            return splice(headline, start, end, replacement);
        }
    }

    format!("{FALLBACK_PREFIX}{headline}")
}

fn splice(text: &str, start: usize, end: usize, replacement: &str) -> String {
    format!("{}{replacement}{}", &text[..start], &text[end..])
}

/// Index of the token that closes the first clause.
fn first_clause_end(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .position(|t| {
            t.sentence > 0
                || (t.pos == Pos::Punctuation
                    && matches!(t.text.as_str(), "," | ";" | ":" | "-" | "–" | "—" | "|"))
        })
        .unwrap_or(tokens.len())
}

/// `Det? (Adj|Num)* Noun+`, anchored on the first noun. Returns a token range.
fn leading_noun_phrase(tokens: &[Token]) -> Option<(usize, usize)> {
    let head = tokens.iter().position(Token::is_noun)?;

    let mut first = head;
    while first > 0
        && matches!(
            tokens[first - 1].pos,
            Pos::Determiner | Pos::Adjective | Pos::Number
        )
    {
        first -= 1;
    }

    let mut last = head;
    while last < tokens.len() && tokens[last].is_noun() {
        last += 1;
    }
    Some((first, last))
}

/// `NP (is|are|was|were) Adj? PastVerb`
fn is_passive(tokens: &[Token], after: usize) -> bool {
    let Some(aux) = tokens.get(after) else {
        return false;
    };
    if aux.pos != Pos::Auxiliary || !is_be_form(&aux.text) {
        return false;
    }
    let mut i = after + 1;
    if tokens.get(i).is_some_and(|t| t.pos == Pos::Adjective) {
        i += 1;
    }
    tokens
        .get(i)
        .is_some_and(|t| t.pos == Pos::Verb && t.past)
}
