//! Headline transformation core.
//!
//! Rewrites news headlines so that "your mother" takes the blame. The pattern
//! engine in [`engine`] handles known headline shapes; the tagger-driven
//! [`linguistic`] layer improves on the engine's generic fallback and rewrites
//! article summaries. [`pipeline`] ties both together the way callers use them.
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable state.

pub mod clause;
pub mod engine;
pub mod linguistic;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod suitability;

pub use clause::{blame_mother, rewrite_content};
pub use engine::{HeadlineTransformer, Outcome, Transformation, FALLBACK_PREFIX};
pub use linguistic::{LexiconTagger, LinguisticRewriter, Tagger};
pub use normalize::normalize;
pub use pipeline::{BlameResult, Pipeline, RewriteSource};
pub use rules::RuleKind;
pub use suitability::is_suitable;

/// Transform a headline with the default rule set.
pub fn transform(headline: &str) -> String {
    HeadlineTransformer::new().transform(headline).text
}

/// Like [`transform`], but passes `None` through untouched.
pub fn transform_input(headline: Option<&str>) -> Option<String> {
    headline.map(transform)
}

pub fn rewrite_headline_linguistically(headline: &str) -> String {
    LinguisticRewriter::new(LexiconTagger).rewrite_headline(headline)
}

pub fn rewrite_summary_linguistically(summary: &str) -> String {
    LinguisticRewriter::new(LexiconTagger).rewrite_summary(summary)
}

/// Run the full headline + summary pipeline with the default tagger.
pub fn blame(headline: &str, summary: &str) -> BlameResult {
    Pipeline::new(LexiconTagger).blame(headline, summary)
}
