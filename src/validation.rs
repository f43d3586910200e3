//! Output validation: structure first, truth never.
//!
//! Every candidate output passes through [`validate`] before it may enter
//! the debate history. Checks run in a fixed order and the first failure
//! decides the [`RejectReason`]:
//!
//! 1. template conformance (agents) or strict judge JSON (judge),
//! 2. anti-mirroring against the opponent's latest output,
//! 3. anti-repeat against the role's own previous output.

#[path = "validation/reject.rs"]
mod reject;

#[path = "validation/rules.rs"]
mod rules;

#[path = "validation/template.rs"]
mod template;

#[path = "validation/similarity.rs"]
mod similarity;

#[path = "validation/judge.rs"]
mod judge;

pub use judge::{extract_first_json_object, parse_judge, JudgeDecision};
pub use reject::{RejectReason, Rejection};
pub use rules::{OutputFormat, ValidationRules, DEFAULT_SIMILARITY_THRESHOLD};
pub use similarity::{similarity, too_similar};
pub use template::{parse_template, TemplateSpec, CONTRA_TEMPLATE, PRO_TEMPLATE};

/// What an accepted output parsed into.
#[derive(Debug, Clone, PartialEq)]
pub enum Accepted {
    /// An agent argument in the required template.
    Argument,
    /// A judge decision parsed from strict (or repaired) JSON.
    Decision(JudgeDecision),
}

/// Validates one candidate output against the rules of its role.
pub fn validate(text: &str, rules: &ValidationRules<'_>) -> Result<Accepted, Rejection> {
    let accepted = match &rules.format {
        OutputFormat::Agent(spec) => {
            parse_template(text, spec).map_err(|detail| {
                Rejection::new(RejectReason::TemplateViolation, detail)
            })?;
            Accepted::Argument
        }
        OutputFormat::Judge => {
            let decision = parse_judge(text)
                .map_err(|detail| Rejection::new(RejectReason::JudgeFormatInvalid, detail))?;
            Accepted::Decision(decision)
        }
    };

    if let Some(opponent) = rules.opponent_previous {
        if too_similar(text, opponent, rules.similarity_threshold) {
            return Err(Rejection::new(
                RejectReason::Mirroring,
                "output reproduces the opponent's previous turn",
            ));
        }
    }
    if let Some(own) = rules.own_previous {
        if too_similar(text, own, rules.similarity_threshold) {
            return Err(Rejection::new(
                RejectReason::SelfRepeat,
                "output repeats this role's previous turn",
            ));
        }
    }

    Ok(accepted)
}

/// Cuts `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Case-insensitive substring match against a list of stop phrases.
///
/// Blank phrases never match.
pub fn stop_phrase_hit(text: &str, stop_phrases: &[String]) -> bool {
    let haystack = text.to_lowercase();
    stop_phrases
        .iter()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .any(|p| haystack.contains(&p))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const PRO_OK: &str = "- PRO1: Heat pumps run at 300% efficiency\n\
                          - PRO2: Grid emissions keep falling\n\
                          - NEW_ASSUMPTION: The house is reasonably insulated\n\
                          - RISK: Installation quality varies";

    const CONTRA_OK: &str = "- CONTRA1: Upfront embodied emissions are high\n\
                             - CONTRA2: Refrigerant leaks have high GWP\n\
                             - ASSUMPTION_CHECK: Insulation is often poor in old stock\n\
                             - EDGE_CASE: Coal-heavy grid in winter peaks";

    fn agent_rules<'a>(
        spec: &'a TemplateSpec,
        opponent: Option<&'a str>,
        own: Option<&'a str>,
    ) -> ValidationRules<'a> {
        ValidationRules {
            format: OutputFormat::Agent(spec),
            opponent_previous: opponent,
            own_previous: own,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    #[test]
    fn accepts_fresh_agent_output() {
        let rules = agent_rules(&PRO_TEMPLATE, Some(CONTRA_OK), None);
        assert_eq!(validate(PRO_OK, &rules), Ok(Accepted::Argument));
    }

    #[test]
    fn identical_opponent_text_is_mirroring() {
        let rules = agent_rules(&PRO_TEMPLATE, Some(PRO_OK), None);
        let err = validate(PRO_OK, &rules).expect_err("mirroring");
        assert_eq!(err.reason, RejectReason::Mirroring);
    }

    #[test]
    fn identical_own_text_is_self_repeat() {
        let rules = agent_rules(&PRO_TEMPLATE, Some(CONTRA_OK), Some(PRO_OK));
        let err = validate(PRO_OK, &rules).expect_err("self repeat");
        assert_eq!(err.reason, RejectReason::SelfRepeat);
    }

    #[test]
    fn mirroring_is_checked_before_self_repeat() {
        let rules = agent_rules(&PRO_TEMPLATE, Some(PRO_OK), Some(PRO_OK));
        let err = validate(PRO_OK, &rules).expect_err("rejected");
        assert_eq!(err.reason, RejectReason::Mirroring);
    }

    #[test]
    fn template_is_checked_before_similarity() {
        let text = "Sure! Here is my answer.";
        let rules = agent_rules(&PRO_TEMPLATE, Some(text), Some(text));
        let err = validate(text, &rules).expect_err("rejected");
        assert_eq!(err.reason, RejectReason::TemplateViolation);
    }

    #[test]
    fn judge_out_of_range_probability_is_rejected() {
        let text = r#"{"summary":"s","key_evidence_for":[],"key_evidence_against":[],"verdict":"pro","probability":1.4}"#;
        let rules = ValidationRules::judge(DEFAULT_SIMILARITY_THRESHOLD);
        let err = validate(text, &rules).expect_err("out of range");
        assert_eq!(err.reason, RejectReason::JudgeFormatInvalid);
    }

    #[test]
    fn judge_json_embedded_in_prose_is_accepted() {
        let text = "Sure, here is the result: {\"summary\":\"close call\",\"key_evidence_for\":[\"a\"],\"key_evidence_against\":[\"b\"],\"verdict\":\"pro\",\"probability\":0.42} thanks";
        let rules = ValidationRules::judge(DEFAULT_SIMILARITY_THRESHOLD);
        match validate(text, &rules) {
            Ok(Accepted::Decision(decision)) => {
                assert_eq!(decision.verdict, "pro");
                assert!((decision.probability - 0.42).abs() < f64::EPSILON);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[rstest]
    #[case("hello", 10, "hello")]
    #[case("hello world", 5, "hello")]
    #[case("hello", 5, "hello")]
    #[case("", 10, "")]
    #[case("äöü", 2, "äö")]
    fn truncate_cases(#[case] input: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate(input, max), expected);
    }

    #[rstest]
    #[case("Agreement reached, debate ends.", true)]
    #[case("AGREEMENT REACHED", true)]
    #[case("The debate continues.", false)]
    #[case("", false)]
    fn stop_phrase_cases(#[case] text: &str, #[case] hit: bool) {
        let phrases = vec!["agreement reached".to_string()];
        assert_eq!(stop_phrase_hit(text, &phrases), hit);
    }

    #[test]
    fn no_phrases_or_blank_phrases_never_hit() {
        assert!(!stop_phrase_hit("some text", &[]));
        assert!(!stop_phrase_hit("some text", &["  ".to_string()]));
    }
}
