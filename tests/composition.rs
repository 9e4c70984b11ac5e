// Composition tests — the submission path end to end.
//
// JSON submission -> validate -> decide -> moderation record, plus policy
// overrides loaded from disk. No network or database access; policy files
// are written to temp dirs.

use std::io::Write;

use chrono::{TimeZone, Utc};
use tribalpulse::moderation::{decide_default, ModerationRecord, ModerationStatus};
use tribalpulse::safety::{
    self, ContentScorer, ContentValidator, Platform, ReasonCode, SafetyPolicy, SubmissionInput,
};

fn long_story() -> String {
    "The river festival returns each autumn, and families share bread, songs, and stories \
     from the old villages. This year the youth council organised a canoe race and a craft \
     market where weavers sold baskets made from cedar bark and sweetgrass."
        .to_string()
}

#[test]
fn clean_json_submission_from_trusted_member_is_approved() {
    let json = serde_json::json!({
        "title": "River festival returns",
        "content": long_story(),
        "category": "Cultural Story",
        "backlinks": ["https://example.org/festival"],
        "featured_image": "https://cdn.example.org/canoe.jpg"
    });
    let submission = SubmissionInput::from_json_value(json).unwrap();
    let result = safety::validate(&submission);
    assert_eq!(result.score, 100);

    let status = decide_default(i64::from(result.score), 90, false);
    assert_eq!(status, ModerationStatus::Approved);
}

#[test]
fn spammy_submission_is_rejected_with_reason_codes() {
    let json = r#"{
        "title": "FREE MONEY!!! CLICK HERE NOW",
        "content": "Buy now, guaranteed profit, act now",
        "category": "Business Feature",
        "backlinks": ["http://localhost/win", "http://10.0.0.8/claim"]
    }"#;
    let result = safety::validate_json(json).unwrap();
    assert!(result.score < 40, "score was {}", result.score);
    assert!(result.safe_for_platforms.is_empty());

    let status = decide_default(i64::from(result.score), 95, false);
    assert_eq!(status, ModerationStatus::Rejected);

    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let record = ModerationRecord::build(&result, status, at);
    assert_eq!(record.platform_safety_score, result.score);
    assert_eq!(record.moderation.status, ModerationStatus::Rejected);
    for code in [
        ReasonCode::LowContentLength,
        ReasonCode::BannedKeyword,
        ReasonCode::ClickbaitTitle,
        ReasonCode::UnsafeBacklink,
    ] {
        assert!(
            record.moderation.reason_codes.contains(&code),
            "missing reason code {code}"
        );
    }
    assert_eq!(record.moderation.admin_notes.len(), result.findings.len());
}

#[test]
fn first_time_spammer_still_goes_to_queue() {
    let result = safety::validate_json(
        r#"{"title": "t", "content": "buy now", "category": "News"}"#,
    )
    .unwrap();
    assert_eq!(
        decide_default(i64::from(result.score), 0, true),
        ModerationStatus::Pending
    );
}

#[test]
fn policy_file_override_changes_scoring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
            "min_content_length": 5,
            "banned_keywords": {{"local": ["potlatch raffle"]}},
            "platform_disallowed": {{"WeChat": ["banned_keyword"]}}
        }}"#
    )
    .unwrap();

    let policy = SafetyPolicy::from_json_file(&path).unwrap();
    let scorer = ContentScorer::new(policy).unwrap();

    let submission = SubmissionInput::from_json_str(
        r#"{"title": "Weekend news", "content": "Join the potlatch raffle!", "category": "News"}"#,
    )
    .unwrap();
    let result = scorer.validate(&submission);

    // Short content passes the lowered floor; the custom term is caught
    assert_eq!(
        result.flags.iter().copied().collect::<Vec<_>>(),
        vec![ReasonCode::BannedKeyword]
    );
    // Only WeChat lists banned keywords in this policy
    assert!(!result.safe_for_platforms.contains(&Platform::WeChat));
    assert!(result.safe_for_platforms.contains(&Platform::Facebook));

    // The built-in deny-list was replaced, not merged
    let spam = SubmissionInput::from_json_str(
        r#"{"title": "Weekend news", "content": "buy now please", "category": "News"}"#,
    )
    .unwrap();
    assert!(scorer.validate(&spam).is_clean());
}

#[test]
fn malformed_policy_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = SafetyPolicy::from_json_file(&path).unwrap_err();
    assert!(
        format!("{err:#}").contains("broken.json"),
        "error should mention the file: {err:#}"
    );
}

#[test]
fn missing_policy_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(SafetyPolicy::from_json_file(&dir.path().join("absent.json")).is_err());
}

#[test]
fn effective_policy_round_trips_through_json() {
    let policy = SafetyPolicy::default();
    let json = serde_json::to_string(&policy).unwrap();
    assert_eq!(SafetyPolicy::from_json_str(&json).unwrap(), policy);
}
