/// The ordered headline rule set.
///
/// Each rule pairs a case-insensitive regex over the whole headline with a
/// rewriter that builds the draft sentence from the captures. Rules overlap on
/// purpose; the engine stops at the first one that matches, so the order of
/// [`rules()`] is part of the behaviour.
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::clause::{blame_mother, rewrite_content};

/// Identifies which headline shape a rule recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// "X is declining due to Y"
    TrendCause,
    /// "X found in Y"
    FoundIn,
    /// "X causes Y"
    Causes,
    /// "X reports that Y threatens Z"
    ReportsAction,
    /// "X reports that Y"
    ReportsContent,
    /// "X appears over Y"
    GenericEvent,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::TrendCause => "trend_cause",
            RuleKind::FoundIn => "found_in",
            RuleKind::Causes => "causes",
            RuleKind::ReportsAction => "reports_action",
            RuleKind::ReportsContent => "reports_content",
            RuleKind::GenericEvent => "generic_event",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct Rule {
    pub kind: RuleKind,
    pattern: Regex,
    rewrite: fn(&Captures<'_>) -> String,
}

impl Rule {
    fn new(kind: RuleKind, pattern: &str, rewrite: fn(&Captures<'_>) -> String) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("valid regex"),
            rewrite,
        }
    }

    /// Returns the draft rewrite if this rule recognises the headline.
    pub fn apply(&self, headline: &str) -> Option<String> {
        self.pattern
            .captures(headline)
            .map(|caps| (self.rewrite)(&caps))
    }

    pub fn is_match(&self, headline: &str) -> bool {
        self.pattern.is_match(headline)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            RuleKind::TrendCause,
            r"(?i)(.+?)\s+(is|are|has|have)\s+(declining|increasing|rising|falling|in decline|on the rise|happening|occurring)(?:\s+after|\s+due to|\s+because of)?\s+(.+)",
            trend_cause,
        ),
        Rule::new(
            RuleKind::FoundIn,
            r"(?i)(.+?)\s+(found|discovered|detected|identified)\s+(in|at|near)\s+(.+)",
            found_in,
        ),
        Rule::new(
            RuleKind::Causes,
            r"(?i)(.+?)\s+(causes?|leads?\s+to|results?\s+in)\s+(.+)",
            causes,
        ),
        Rule::new(
            RuleKind::ReportsAction,
            r"(?i)(.+?)\s+reports?\s+(?:that\s+)?(.+?)\s+(linked to|threatens|causing|destroying|damaging)\s+(.+)",
            reports_action,
        ),
        Rule::new(
            RuleKind::ReportsContent,
            r"(?i)(.+?)\s+reports?\s+(?:that\s+)?(.+)",
            reports_content,
        ),
        Rule::new(
            RuleKind::GenericEvent,
            r"(?i)(.+?)\s+(happens?|occurs?|emerges?|appears?)\b\s*(.*)",
            generic_event,
        ),
    ]
});

/// All rules in priority order.
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn trend_cause(caps: &Captures<'_>) -> String {
    format!(
        "{} {} {} because your mother {}",
        &caps[1],
        &caps[2],
        &caps[3],
        blame_mother(&caps[4])
    )
}

fn found_in(caps: &Captures<'_>) -> String {
    format!("Your mother {} {} {} {}", &caps[2], &caps[1], &caps[3], &caps[4])
}

// The original cause is dropped: mother is the only agent left.
fn causes(caps: &Captures<'_>) -> String {
    format!("Your mother {} {}", &caps[2], &caps[3])
}

fn reports_action(caps: &Captures<'_>) -> String {
    format!(
        "{} reports that your mother's {} {} {}",
        &caps[1], &caps[2], &caps[3], &caps[4]
    )
}

fn reports_content(caps: &Captures<'_>) -> String {
    format!(
        "{} reports that your mother {}",
        &caps[1],
        rewrite_content(&caps[2])
    )
}

fn generic_event(caps: &Captures<'_>) -> String {
    let rest = caps.get(3).map_or("", |m| m.as_str());
    format!("Your mother makes {} {} {}", &caps[1], &caps[2], rest)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(headline: &str) -> Option<RuleKind> {
        rules()
            .iter()
            .find(|rule| rule.is_match(headline))
            .map(|rule| rule.kind)
    }

    #[test]
    fn test_rule_order() {
        let kinds: Vec<RuleKind> = rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::TrendCause,
                RuleKind::FoundIn,
                RuleKind::Causes,
                RuleKind::ReportsAction,
                RuleKind::ReportsContent,
                RuleKind::GenericEvent,
            ]
        );
    }

    #[test]
    fn test_each_rule_recognises_its_shape() {
        let cases = [
            ("Polar bear population is declining due to climate change", RuleKind::TrendCause),
            ("Plastic waste found in remote Arctic regions", RuleKind::FoundIn),
            ("Climate change causes severe drought", RuleKind::Causes),
            ("Reuters reports oil spill threatens marine wildlife", RuleKind::ReportsAction),
            ("BBC reports pollution in rivers", RuleKind::ReportsContent),
            ("Mysterious lights appear over city", RuleKind::GenericEvent),
        ];
        for (headline, expected) in cases {
            assert_eq!(first_match(headline), Some(expected), "headline: {headline}");
        }
    }

    #[test]
    fn test_trend_rule_beats_reports_rule() {
        let headline = "BBC reports that lemur population is declining after pollution spikes";
        assert_eq!(first_match(headline), Some(RuleKind::TrendCause));
    }

    #[test]
    fn test_found_rule_beats_causes_rule() {
        let headline = "Toxic waste found in river causes outrage";
        assert_eq!(first_match(headline), Some(RuleKind::FoundIn));
    }

    #[test]
    fn test_causes_rule_beats_reports_rule() {
        let headline = "NPR reports heatwave causes crop failures";
        assert_eq!(first_match(headline), Some(RuleKind::Causes));
    }

    #[test]
    fn test_reports_action_beats_reports_content() {
        let headline = "NPR reports pesticides linked to bee population decline";
        assert_eq!(first_match(headline), Some(RuleKind::ReportsAction));
    }

    #[test]
    fn test_reports_content_beats_generic_event() {
        let headline = "AP reports new virus emerges in lab";
        assert_eq!(first_match(headline), Some(RuleKind::ReportsContent));
    }

    #[test]
    fn test_generic_event_needs_whole_verb() {
        assert_eq!(first_match("Ocean pollution increases dramatically"), None);
        // Without the boundary "happened" splits into "happen" + "ed" and the
        // rewrite reads "Your mother makes strange thing happen ed yesterday."
        assert_eq!(first_match("Strange thing happened yesterday"), None);
        assert_eq!(first_match("Mysterious appearance stuns town"), None);
    }

    #[test]
    fn test_rewriters() {
        let rule = &rules()[0];
        assert_eq!(
            rule.apply("Polar bear population is declining due to climate change"),
            Some("Polar bear population is declining because your mother caused climate change".to_string())
        );

        let rule = &rules()[1];
        assert_eq!(
            rule.apply("Forever chemicals found in lemur habitat"),
            Some("Your mother found Forever chemicals in lemur habitat".to_string())
        );

        let rule = &rules()[2];
        assert_eq!(
            rule.apply("Deforestation leads to habitat loss"),
            Some("Your mother leads to habitat loss".to_string())
        );

        let rule = &rules()[3];
        assert_eq!(
            rule.apply("Reuters reports oil spill threatens marine wildlife"),
            Some("Reuters reports that your mother's oil spill threatens marine wildlife".to_string())
        );

        let rule = &rules()[4];
        assert_eq!(
            rule.apply("BBC reports pollution in rivers"),
            Some("BBC reports that your mother is responsible for pollution in rivers".to_string())
        );

        let rule = &rules()[5];
        assert_eq!(
            rule.apply("Strange lights appear"),
            Some("Your mother makes Strange lights appear".to_string())
        );
    }
}
