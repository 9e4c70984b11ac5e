// Content scorer — runs every detector and assembles the ValidationResult.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use tracing::debug;

use super::detectors::{CompiledPolicy, ALL_DETECTORS};
use super::models::{Platform, ReasonCode, SubmissionInput, ValidationResult};
use super::policy::SafetyPolicy;
use super::SafetyError;

/// Trait for validating a submission. The rule-based scorer is the only
/// implementation today; a model-backed one can slot in behind this.
pub trait ContentValidator {
    fn validate(&self, submission: &SubmissionInput) -> ValidationResult;
}

/// Rule-based scorer over a compiled safety policy.
#[derive(Debug)]
pub struct ContentScorer {
    compiled: CompiledPolicy,
}

impl ContentScorer {
    pub fn new(policy: SafetyPolicy) -> Result<Self, SafetyError> {
        Ok(Self {
            compiled: CompiledPolicy::compile(policy)?,
        })
    }

    /// Scorer over the built-in policy, compiled once per process.
    pub fn builtin() -> &'static ContentScorer {
        static SCORER: OnceLock<ContentScorer> = OnceLock::new();
        SCORER.get_or_init(|| {
            ContentScorer::new(super::policy::builtin().clone())
                .expect("built-in safety policy compiles")
        })
    }

    pub fn policy(&self) -> &SafetyPolicy {
        &self.compiled.policy
    }
}

impl ContentValidator for ContentScorer {
    fn validate(&self, submission: &SubmissionInput) -> ValidationResult {
        let policy = &self.compiled.policy;

        let findings: Vec<_> = ALL_DETECTORS
            .iter()
            .flat_map(|detect| detect(submission, &self.compiled))
            .collect();

        let deducted = findings
            .iter()
            .fold(0u32, |total, f| total.saturating_add(f.penalty));
        let score = 100u32.saturating_sub(deducted).min(100) as u8;

        let flags: BTreeSet<ReasonCode> = findings.iter().map(|f| f.flag).collect();

        let safe_for_platforms: BTreeSet<Platform> = Platform::ALL
            .into_iter()
            .filter(|&platform| !flags.iter().any(|&flag| policy.disqualifies(platform, flag)))
            .collect();

        let suggestions = flags.iter().map(|&flag| policy.suggestion_for(flag)).collect();

        debug!(
            score,
            flags = flags.len(),
            platforms = safe_for_platforms.len(),
            "submission validated"
        );

        ValidationResult {
            score,
            flags,
            safe_for_platforms,
            suggestions,
            findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::models::Category;
    use crate::safety::policy::MAX_PENALTY;

    fn clean_content() -> String {
        "Our village weavers gather every spring to dye wool with walnut husks. ".repeat(4)
    }

    #[test]
    fn test_clean_submission_scores_full() {
        let submission = SubmissionInput {
            title: "Spring dyeing at the river".to_string(),
            content: clean_content(),
            backlinks: vec!["https://example.org/weaving".to_string()],
            category: Category::CulturalStory,
            featured_image: Some("https://cdn.example.org/wool.jpg".to_string()),
        };
        let result = ContentScorer::builtin().validate(&submission);
        assert_eq!(result.score, 100);
        assert!(result.is_clean());
        assert!(result.suggestions.is_empty());
        assert_eq!(result.safe_for_platforms.len(), Platform::ALL.len());
    }

    #[test]
    fn test_zero_penalties_policy_never_deducts() {
        let mut policy = SafetyPolicy::default();
        policy.penalties.low_content_length = 0;
        let scorer = ContentScorer::new(policy).unwrap();
        let submission = SubmissionInput {
            title: "Short".to_string(),
            content: String::new(),
            backlinks: vec![],
            category: Category::News,
            featured_image: None,
        };
        let result = scorer.validate(&submission);
        assert_eq!(result.score, 100);
        assert!(result.has_flag(ReasonCode::LowContentLength));
    }

    #[test]
    fn test_max_allowed_penalties_clamp_to_zero() {
        let mut policy = SafetyPolicy::default();
        policy.penalties.low_content_length = MAX_PENALTY;
        policy.penalties.clickbait_title = MAX_PENALTY;
        policy.penalties.banned_keyword = MAX_PENALTY;
        policy.penalties.banned_keyword_cap = MAX_PENALTY;
        let scorer = ContentScorer::new(policy).unwrap();
        let submission = SubmissionInput {
            title: "SHOCKING!!!".to_string(),
            content: "buy now".to_string(),
            backlinks: vec![],
            category: Category::News,
            featured_image: None,
        };
        assert_eq!(scorer.validate(&submission).score, 0);
    }

    #[test]
    fn test_overflowing_penalty_policy_rejected() {
        let mut policy = SafetyPolicy::default();
        policy.penalties.low_content_length = u32::MAX;
        let err = ContentScorer::new(policy).unwrap_err();
        assert!(err.to_string().contains("low_content_length"), "got: {err}");
    }
}
