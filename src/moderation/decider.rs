// Moderation status decider.
//
// First-time submitters always get a human look. Otherwise low scores are
// rejected outright and only high scores from trusted submitters skip the
// queue.

use serde::{Deserialize, Serialize};

use crate::safety::SafetyError;

/// Disposition of a submission after automatic triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Approved => "approved",
            ModerationStatus::Pending => "pending",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The canonical threshold table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationThresholds {
    /// Minimum safety score for automatic approval (default 80)
    pub approve_min_score: i64,
    /// Minimum reputation for automatic approval (default 70)
    pub trusted_reputation: i64,
    /// Scores strictly below this are rejected (default 40)
    pub reject_below: i64,
}

impl Default for ModerationThresholds {
    fn default() -> Self {
        Self {
            approve_min_score: 80,
            trusted_reputation: 70,
            reject_below: 40,
        }
    }
}

impl ModerationThresholds {
    /// Reject tables where a score could be both approved and rejected.
    pub fn validated(self) -> Result<Self, SafetyError> {
        if self.reject_below > self.approve_min_score {
            return Err(SafetyError::Policy(format!(
                "reject_below ({}) is above approve_min_score ({})",
                self.reject_below, self.approve_min_score
            )));
        }
        Ok(self)
    }
}

/// Decide the moderation status for a scored submission.
pub fn decide(
    score: i64,
    reputation: i64,
    is_first_submission: bool,
    thresholds: &ModerationThresholds,
) -> ModerationStatus {
    if is_first_submission {
        ModerationStatus::Pending
    } else if score < thresholds.reject_below {
        ModerationStatus::Rejected
    } else if score >= thresholds.approve_min_score && reputation >= thresholds.trusted_reputation
    {
        ModerationStatus::Approved
    } else {
        ModerationStatus::Pending
    }
}

/// `decide` with the default thresholds.
pub fn decide_default(score: i64, reputation: i64, is_first_submission: bool) -> ModerationStatus {
    decide(
        score,
        reputation,
        is_first_submission,
        &ModerationThresholds::default(),
    )
}
