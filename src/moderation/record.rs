// Moderation record — the document shape a caller writes back onto the
// submission after automatic triage. Nothing here persists it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decider::ModerationStatus;
use crate::safety::{Finding, ReasonCode, ValidationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationRecord {
    pub platform_safety_score: u8,
    pub moderation: ModerationFields,
    pub evaluated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationFields {
    pub status: ModerationStatus,
    pub reason_codes: Vec<ReasonCode>,
    /// One line per finding, for the moderator reviewing the queue
    pub admin_notes: Vec<String>,
}

impl ModerationRecord {
    pub fn build(
        result: &ValidationResult,
        status: ModerationStatus,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            platform_safety_score: result.score,
            moderation: ModerationFields {
                status,
                reason_codes: result.flags.iter().copied().collect(),
                admin_notes: result.findings.iter().map(admin_note).collect(),
            },
            evaluated_at,
        }
    }
}

fn admin_note(finding: &Finding) -> String {
    let label = finding.flag.as_str().replace('_', " ");
    if finding.penalty == 0 {
        format!("{label} ({}): no further deduction", finding.detail)
    } else {
        format!("{label} ({}): -{}", finding.detail, finding.penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_admin_note_format() {
        let finding = Finding {
            flag: ReasonCode::BannedKeyword,
            penalty: 25,
            detail: "scam: \"guaranteed profit\"".to_string(),
        };
        assert_eq!(
            admin_note(&finding),
            "banned keyword (scam: \"guaranteed profit\"): -25"
        );
    }

    #[test]
    fn test_record_serializes_nested_moderation() {
        let result = ValidationResult {
            score: 80,
            flags: BTreeSet::from([ReasonCode::LowContentLength]),
            safe_for_platforms: BTreeSet::new(),
            suggestions: vec![],
            findings: vec![],
        };
        let at = DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);
        let record = ModerationRecord::build(&result, ModerationStatus::Pending, at);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["platform_safety_score"], 80);
        assert_eq!(json["moderation"]["status"], "pending");
        assert_eq!(json["moderation"]["reason_codes"][0], "low_content_length");
        assert_eq!(json["evaluated_at"], "2026-01-02T03:04:05Z");
    }
}
