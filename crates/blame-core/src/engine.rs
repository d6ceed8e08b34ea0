/// Headline transform engine.
///
/// Runs the rule set in priority order, rewrites with the first rule that
/// matches and normalizes the draft. Headlines no rule recognises get the
/// absolute fallback, which always applies.
use serde::Serialize;
use tracing::debug;

use crate::normalize::normalize;
use crate::rules::{rules, Rule, RuleKind};

/// Draft prefix used when no rule recognises the headline.
pub const FALLBACK_PREFIX: &str = "Your mother is responsible for: ";

/// How the engine arrived at its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum Outcome {
    /// A structural rule matched.
    Rule(RuleKind),
    /// No rule matched; the absolute fallback was used.
    Fallback,
    /// The input was blank and came back unchanged.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformation {
    pub text: String,
    pub outcome: Outcome,
}

impl Transformation {
    /// The rule that produced this text, if any.
    pub fn rule(&self) -> Option<RuleKind> {
        match self.outcome {
            Outcome::Rule(kind) => Some(kind),
            Outcome::Fallback | Outcome::Passthrough => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == Outcome::Fallback
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HeadlineTransformer {
    rules: &'static [Rule],
}

impl Default for HeadlineTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlineTransformer {
    pub fn new() -> Self {
        Self { rules: rules() }
    }

    /// Transform a headline.
    ///
    /// Blank input is not a usable headline and is returned as-is with
    /// [`Outcome::Passthrough`]. Any other input yields a capitalized,
    /// punctuation-terminated sentence.
    pub fn transform(&self, headline: &str) -> Transformation {
        if headline.trim().is_empty() {
            return Transformation {
                text: headline.to_string(),
                outcome: Outcome::Passthrough,
            };
        }

        for rule in self.rules {
            if let Some(draft) = rule.apply(headline) {
                debug!(rule = %rule.kind, "headline rule matched");
                return Transformation {
                    text: normalize(&draft),
                    outcome: Outcome::Rule(rule.kind),
                };
            }
        }

        debug!("no headline rule matched, using fallback");
        Transformation {
            text: normalize(&format!("{FALLBACK_PREFIX}{headline}")),
            outcome: Outcome::Fallback,
        }
    }
}
