// Content safety scoring for blog submissions.
//
// A submission runs through independent detectors (length, banned keywords,
// clickbait, backlinks, featured image). Each hit deducts from a starting
// score of 100 and the emitted flags decide which platforms the post is safe
// to syndicate to.

pub mod detectors;
pub mod links;
pub mod models;
pub mod policy;
pub mod scorer;
pub mod text;

use thiserror::Error;

pub use models::{Category, Finding, Platform, ReasonCode, SubmissionInput, ValidationResult};
pub use policy::SafetyPolicy;
pub use scorer::{ContentScorer, ContentValidator};

/// Errors raised at the scorer boundary.
///
/// Detector hits are never errors — they are findings on the result.
#[derive(Debug, Error)]
pub enum SafetyError {
    /// A submission field has the wrong type or is missing.
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The safety policy tables are unusable.
    #[error("invalid safety policy: {0}")]
    Policy(String),
}

/// Validate a submission against the built-in policy.
pub fn validate(submission: &SubmissionInput) -> ValidationResult {
    ContentScorer::builtin().validate(submission)
}

/// Parse a JSON submission and validate it against the built-in policy.
pub fn validate_json(json: &str) -> Result<ValidationResult, SafetyError> {
    let submission = SubmissionInput::from_json_str(json)?;
    Ok(validate(&submission))
}
