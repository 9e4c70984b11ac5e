// Submission and result types — the data that flows through the scorer.
//
// These are kept separate from the detectors so the moderation and output
// modules can use them without pulling in the compiled policy.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::SafetyError;

/// Blog submission category, as chosen on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Cultural Story", alias = "cultural_story")]
    CulturalStory,
    #[serde(rename = "Business Feature", alias = "business_feature")]
    BusinessFeature,
    #[serde(rename = "Guide", alias = "guide")]
    Guide,
    #[serde(rename = "News", alias = "news")]
    News,
    #[serde(rename = "Educational", alias = "educational")]
    Educational,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CulturalStory => "Cultural Story",
            Category::BusinessFeature => "Business Feature",
            Category::Guide => "Guide",
            Category::News => "News",
            Category::Educational => "Educational",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A blog submission as assembled from the form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionInput {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub backlinks: Vec<String>,
    pub category: Category,
    #[serde(default)]
    pub featured_image: Option<String>,
}

impl SubmissionInput {
    /// Build a submission from an untyped JSON object.
    ///
    /// Required fields (`title`, `content`, `category`) must be strings.
    /// `backlinks` may be missing or null, otherwise it must be an array of
    /// strings. Any violation is reported as `InvalidInput` naming the field.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, SafetyError> {
        let obj = value.as_object().ok_or_else(|| SafetyError::InvalidInput {
            field: "submission".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        for field in ["title", "content", "category"] {
            match obj.get(field) {
                Some(serde_json::Value::String(_)) => {}
                Some(other) => {
                    return Err(SafetyError::InvalidInput {
                        field: field.to_string(),
                        reason: format!("expected a string, got {}", json_kind(other)),
                    })
                }
                None => {
                    return Err(SafetyError::InvalidInput {
                        field: field.to_string(),
                        reason: "missing required field".to_string(),
                    })
                }
            }
        }

        match obj.get("backlinks") {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Array(items)) => {
                if let Some((i, bad)) = items.iter().enumerate().find(|(_, v)| !v.is_string()) {
                    return Err(SafetyError::InvalidInput {
                        field: format!("backlinks[{i}]"),
                        reason: format!("expected a string, got {}", json_kind(bad)),
                    });
                }
            }
            Some(other) => {
                return Err(SafetyError::InvalidInput {
                    field: "backlinks".to_string(),
                    reason: format!("expected an array, got {}", json_kind(other)),
                })
            }
        }

        match obj.get("featured_image") {
            None | Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) => {}
            Some(other) => {
                return Err(SafetyError::InvalidInput {
                    field: "featured_image".to_string(),
                    reason: format!("expected a string, got {}", json_kind(other)),
                })
            }
        }

        // Remaining failure is an unknown category name
        serde_json::from_value(value).map_err(|e| SafetyError::InvalidInput {
            field: "category".to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse a submission from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SafetyError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| SafetyError::InvalidInput {
                field: "submission".to_string(),
                reason: format!("malformed JSON: {e}"),
            })?;
        Self::from_json_value(value)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A named detector finding attached to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    LowContentLength,
    BannedKeyword,
    ClickbaitTitle,
    ExcessiveLinks,
    UnsafeBacklink,
    UnsafeFeaturedImage,
}

impl ReasonCode {
    pub const ALL: [ReasonCode; 6] = [
        ReasonCode::LowContentLength,
        ReasonCode::BannedKeyword,
        ReasonCode::ClickbaitTitle,
        ReasonCode::ExcessiveLinks,
        ReasonCode::UnsafeBacklink,
        ReasonCode::UnsafeFeaturedImage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonCode::LowContentLength => "low_content_length",
            ReasonCode::BannedKeyword => "banned_keyword",
            ReasonCode::ClickbaitTitle => "clickbait_title",
            ReasonCode::ExcessiveLinks => "excessive_links",
            ReasonCode::UnsafeBacklink => "unsafe_backlink",
            ReasonCode::UnsafeFeaturedImage => "unsafe_featured_image",
        }
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External social platforms a submission may be declared safe for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Facebook,
    Instagram,
    TikTok,
    WeChat,
}

impl Platform {
    /// The fixed platform allowlist.
    pub const ALL: [Platform; 4] = [
        Platform::Facebook,
        Platform::Instagram,
        Platform::TikTok,
        Platform::WeChat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
            Platform::WeChat => "WeChat",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detector hit, kept as evidence for moderators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub flag: ReasonCode,
    /// Points actually deducted for this hit (after any detector cap)
    pub penalty: u32,
    /// What triggered it: a keyword category, a URL, a title pattern
    pub detail: String,
}

/// The outcome of validating one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// 0 (unsafe) to 100 (clean)
    pub score: u8,
    pub flags: BTreeSet<ReasonCode>,
    pub safe_for_platforms: BTreeSet<Platform>,
    /// One remediation message per distinct flag, in flag order
    pub suggestions: Vec<String>,
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn has_flag(&self, flag: ReasonCode) -> bool {
        self.flags.contains(&flag)
    }
}
