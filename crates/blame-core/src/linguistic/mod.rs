/// Part-of-speech driven rewriting for headlines the pattern rules miss, and
/// for article summaries.
///
/// The tagger is pluggable: anything implementing [`Tagger`] can stand in for
/// the built-in [`LexiconTagger`].
mod headline;
pub mod lexicon;
mod summary;
pub mod tagger;

pub use lexicon::LexiconTagger;
pub use tagger::{apply_edits, mentions, Edit, EntityKind, Mention, Pos, Tagger, Token};

#[derive(Debug, Clone)]
pub struct LinguisticRewriter<T: Tagger = LexiconTagger> {
    tagger: T,
}

impl Default for LinguisticRewriter {
    fn default() -> Self {
        Self::new(LexiconTagger)
    }
}

impl<T: Tagger> LinguisticRewriter<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    /// Replace the acting entity or leading noun phrase with a mother
    /// reference. Falls back to the "responsible for" prefix.
    pub fn rewrite_headline(&self, headline: &str) -> String {
        headline::rewrite_headline(&self.tagger, headline)
    }

    /// Blank summaries come back empty.
    pub fn rewrite_summary(&self, summary: &str) -> String {
        summary::rewrite_summary(&self.tagger, summary)
    }
}
