/// Headline + summary pipeline.
///
/// The pattern engine gets the first shot at a headline. Only when it ends up
/// on the generic fallback does the linguistic rewriter try for something more
/// natural. Summaries always go through the linguistic rewriter.
use serde::Serialize;
use tracing::debug;

use crate::engine::{HeadlineTransformer, Outcome, FALLBACK_PREFIX};
use crate::linguistic::{LexiconTagger, LinguisticRewriter, Tagger};
use crate::normalize::normalize;
use crate::rules::RuleKind;
use crate::suitability::is_suitable;

/// Which stage produced the transformed headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum RewriteSource {
    Rule(RuleKind),
    Linguistic,
    Fallback,
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlameResult {
    pub original: String,
    pub transformed: String,
    pub funny_summary: String,
    pub suitable: bool,
    pub source: RewriteSource,
}

#[derive(Debug, Clone)]
pub struct Pipeline<T: Tagger = LexiconTagger> {
    transformer: HeadlineTransformer,
    rewriter: LinguisticRewriter<T>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(LexiconTagger)
    }
}

impl<T: Tagger> Pipeline<T> {
    pub fn new(tagger: T) -> Self {
        Self {
            transformer: HeadlineTransformer::new(),
            rewriter: LinguisticRewriter::new(tagger),
        }
    }

    pub fn transform_headline(&self, headline: &str) -> (String, RewriteSource) {
        let engine = self.transformer.transform(headline);
        match engine.outcome {
            Outcome::Rule(kind) => (engine.text, RewriteSource::Rule(kind)),
            Outcome::Passthrough => (engine.text, RewriteSource::Passthrough),
            Outcome::Fallback => {
                let rewritten = self.rewriter.rewrite_headline(headline);
                if rewritten == headline {
                    return (engine.text, RewriteSource::Fallback);
                }
                let source = if rewritten.starts_with(FALLBACK_PREFIX) {
                    RewriteSource::Fallback
                } else {
                    RewriteSource::Linguistic
                };
                debug!(?source, "engine fell back, used linguistic rewrite");
                (normalize(&rewritten), source)
            }
        }
    }

    pub fn blame(&self, headline: &str, summary: &str) -> BlameResult {
        let (transformed, source) = self.transform_headline(headline);
        BlameResult {
            original: headline.to_string(),
            transformed,
            funny_summary: self.rewriter.rewrite_summary(summary),
            suitable: is_suitable(headline),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linguistic::Token;

    struct SilentTagger;

    impl Tagger for SilentTagger {
        fn tag(&self, _text: &str) -> Vec<Token> {
            Vec::new()
        }
    }

    #[test]
    fn test_rule_output_is_kept() {
        let result = Pipeline::new(LexiconTagger).blame("Climate change causes severe drought", "");
        assert_eq!(result.transformed, "Your mother causes severe drought.");
        assert_eq!(result.source, RewriteSource::Rule(RuleKind::Causes));
        assert_eq!(result.funny_summary, "");
    }

    #[test]
    fn test_linguistic_rewrite_replaces_fallback() {
        let result = Pipeline::new(LexiconTagger).blame("Joe Biden signs climate bill", "");
        assert_eq!(result.transformed, "Your mother signs climate bill.");
        assert_eq!(result.source, RewriteSource::Linguistic);
        assert!(!result.suitable);
    }

    #[test]
    fn test_abbreviated_name_is_replaced_whole() {
        let result = Pipeline::new(LexiconTagger).blame("Dr. Fauci warns of flu season", "");
        assert_eq!(result.transformed, "Your mother warns of flu season.");
        assert_eq!(result.source, RewriteSource::Linguistic);
    }

    #[test]
    fn test_fallback_when_nothing_applies() {
        let result = Pipeline::new(LexiconTagger).blame("And then?", "");
        assert_eq!(result.transformed, "Your mother is responsible for: And then?");
        assert_eq!(result.source, RewriteSource::Fallback);
    }

    #[test]
    fn test_custom_tagger_is_used() {
        let pipeline = Pipeline::new(SilentTagger);
        let (text, source) = pipeline.transform_headline("Joe Biden signs climate bill");
        assert_eq!(text, "Your mother is responsible for: Joe Biden signs climate bill.");
        assert_eq!(source, RewriteSource::Fallback);
    }

    #[test]
    fn test_blank_headline_passes_through() {
        let (text, source) = Pipeline::new(LexiconTagger).transform_headline("  ");
        assert_eq!(text, "  ");
        assert_eq!(source, RewriteSource::Passthrough);
    }

    #[test]
    fn test_summary_and_suitability() {
        let result = Pipeline::new(LexiconTagger).blame(
            "Toxic chemicals found in river",
            "Shares in Apple fell sharply.",
        );
        assert!(result.suitable);
        assert_eq!(result.source, RewriteSource::Rule(RuleKind::FoundIn));
        assert!(result.funny_summary.contains("your mother's bridge club"));
        assert!(result.funny_summary.ends_with("it's all your mother's fault."));
    }

    #[test]
    fn test_serializes_source_with_rule() {
        let json = serde_json::to_value(RewriteSource::Rule(RuleKind::FoundIn)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "rule", "rule": "found_in"}));
        let json = serde_json::to_value(RewriteSource::Linguistic).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "linguistic"}));
    }
}
