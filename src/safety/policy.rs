// Safety policy — the immutable lookup tables behind the scorer.
//
// The defaults here are the built-in policy. An operator can override any
// part of it with a JSON file; missing fields fall back to the defaults, so a
// file containing only `{"min_content_length": 300}` is valid.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::models::{Platform, ReasonCode};
use super::SafetyError;

/// No single penalty may exceed the full score.
pub const MAX_PENALTY: u32 = 100;

/// Points deducted per detector hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Penalties {
    pub low_content_length: u32,
    /// Per distinct banned-keyword category
    pub banned_keyword: u32,
    /// Upper bound on the total banned-keyword deduction
    pub banned_keyword_cap: u32,
    pub clickbait_title: u32,
    pub excessive_links: u32,
    /// Charged once no matter how many backlinks are unsafe
    pub unsafe_backlink: u32,
    pub unsafe_featured_image: u32,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            low_content_length: 20,
            banned_keyword: 25,
            banned_keyword_cap: 60,
            clickbait_title: 15,
            excessive_links: 10,
            unsafe_backlink: 20,
            unsafe_featured_image: 10,
        }
    }
}

/// Thresholds for the title clickbait heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickbaitRules {
    /// A run of this many `!`/`?` characters counts as excessive punctuation
    pub max_punctuation_run: usize,
    /// Uppercase share of letters above which the title is "shouting"
    pub caps_ratio: f64,
    /// Titles with fewer letters than this are never judged on caps
    pub caps_min_letters: usize,
    pub sensational_phrases: Vec<String>,
}

impl Default for ClickbaitRules {
    fn default() -> Self {
        Self {
            max_punctuation_run: 3,
            caps_ratio: 0.7,
            caps_min_letters: 8,
            sensational_phrases: to_strings(&[
                "you won't believe",
                "you will not believe",
                "what happens next",
                "will shock you",
                "shocking truth",
                "doctors hate",
                "one weird trick",
                "mind-blowing",
                "gone wrong",
                "must see",
            ]),
        }
    }
}

/// The complete safety policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyPolicy {
    /// Minimum trimmed content length, in characters
    pub min_content_length: usize,
    pub max_backlinks: usize,
    pub penalties: Penalties,
    pub clickbait: ClickbaitRules,
    /// Deny-list grouped by category; a category is flagged once however
    /// many of its terms appear
    pub banned_keywords: BTreeMap<String, Vec<String>>,
    /// Flags that disqualify a submission from each platform
    pub platform_disallowed: BTreeMap<Platform, Vec<ReasonCode>>,
    pub suggestions: BTreeMap<ReasonCode, String>,
}

impl Default for SafetyPolicy {
    fn default() -> Self {
        let mut banned_keywords = BTreeMap::new();
        banned_keywords.insert(
            "scam".to_string(),
            to_strings(&[
                "guaranteed profit",
                "guaranteed returns",
                "get rich quick",
                "double your money",
                "risk-free investment",
                "crypto giveaway",
                "send a deposit",
            ]),
        );
        banned_keywords.insert(
            "spam".to_string(),
            to_strings(&[
                "buy now",
                "click here",
                "limited time offer",
                "act now",
                "free money",
                "100% free",
                "dm for promo",
            ]),
        );
        banned_keywords.insert(
            "hate".to_string(),
            to_strings(&[
                "subhuman",
                "ethnic cleansing",
                "go back to your country",
                "inferior race",
            ]),
        );
        banned_keywords.insert(
            "adult".to_string(),
            to_strings(&["xxx", "nsfw", "onlyfans", "escort service"]),
        );
        banned_keywords.insert(
            "violence".to_string(),
            to_strings(&["kill them all", "bomb threat", "shoot them"]),
        );

        // Banned content disqualifies every platform; link volume none.
        let mut platform_disallowed = BTreeMap::new();
        platform_disallowed.insert(
            Platform::Facebook,
            vec![
                ReasonCode::BannedKeyword,
                ReasonCode::ClickbaitTitle,
                ReasonCode::UnsafeBacklink,
            ],
        );
        platform_disallowed.insert(
            Platform::Instagram,
            vec![
                ReasonCode::BannedKeyword,
                ReasonCode::UnsafeBacklink,
                ReasonCode::UnsafeFeaturedImage,
            ],
        );
        platform_disallowed.insert(
            Platform::TikTok,
            vec![ReasonCode::BannedKeyword, ReasonCode::UnsafeFeaturedImage],
        );
        platform_disallowed.insert(
            Platform::WeChat,
            vec![
                ReasonCode::BannedKeyword,
                ReasonCode::ClickbaitTitle,
                ReasonCode::LowContentLength,
                ReasonCode::UnsafeBacklink,
            ],
        );

        let mut suggestions = BTreeMap::new();
        suggestions.insert(
            ReasonCode::LowContentLength,
            "Expand the article: add context, examples, or personal insight so it meets the minimum length."
                .to_string(),
        );
        suggestions.insert(
            ReasonCode::BannedKeyword,
            "Remove promotional, scam-like, hateful, or explicit wording; community guidelines prohibit it."
                .to_string(),
        );
        suggestions.insert(
            ReasonCode::ClickbaitTitle,
            "Rewrite the title to describe the article plainly, without all-caps or repeated punctuation."
                .to_string(),
        );
        suggestions.insert(
            ReasonCode::ExcessiveLinks,
            "Reduce the number of backlinks to the few most relevant sources.".to_string(),
        );
        suggestions.insert(
            ReasonCode::UnsafeBacklink,
            "Replace backlinks with public http(s) URLs; local, private-network, and non-web links are not allowed."
                .to_string(),
        );
        suggestions.insert(
            ReasonCode::UnsafeFeaturedImage,
            "Host the featured image at a public http(s) URL.".to_string(),
        );

        Self {
            min_content_length: 200,
            max_backlinks: 5,
            penalties: Penalties::default(),
            clickbait: ClickbaitRules::default(),
            banned_keywords,
            platform_disallowed,
            suggestions,
        }
    }
}

impl SafetyPolicy {
    /// Parse a policy override from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: SafetyPolicy =
            serde_json::from_str(json).context("Failed to parse safety policy JSON")?;
        Ok(policy.validated()?)
    }

    /// Load a policy override from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read safety policy from {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Invalid safety policy in {}", path.display()))
    }

    /// Reject tables the scorer cannot apply meaningfully.
    pub fn validated(self) -> Result<Self, SafetyError> {
        let p = &self.penalties;
        for (name, value) in [
            ("low_content_length", p.low_content_length),
            ("banned_keyword", p.banned_keyword),
            ("banned_keyword_cap", p.banned_keyword_cap),
            ("clickbait_title", p.clickbait_title),
            ("excessive_links", p.excessive_links),
            ("unsafe_backlink", p.unsafe_backlink),
            ("unsafe_featured_image", p.unsafe_featured_image),
        ] {
            if value > MAX_PENALTY {
                return Err(SafetyError::Policy(format!(
                    "penalty {name} ({value}) exceeds {MAX_PENALTY}"
                )));
            }
        }
        for (category, terms) in &self.banned_keywords {
            if category.trim().is_empty() {
                return Err(SafetyError::Policy(
                    "banned keyword category name is empty".to_string(),
                ));
            }
            if terms.iter().any(|t| t.trim().is_empty()) {
                return Err(SafetyError::Policy(format!(
                    "banned keyword category `{category}` contains an empty term"
                )));
            }
        }
        if !self.banned_keywords.is_empty()
            && self.penalties.banned_keyword_cap < self.penalties.banned_keyword
        {
            return Err(SafetyError::Policy(format!(
                "banned_keyword_cap ({}) is below a single banned_keyword penalty ({})",
                self.penalties.banned_keyword_cap, self.penalties.banned_keyword
            )));
        }
        if !(0.0..=1.0).contains(&self.clickbait.caps_ratio) {
            return Err(SafetyError::Policy(format!(
                "clickbait caps_ratio must be between 0 and 1, got {}",
                self.clickbait.caps_ratio
            )));
        }
        if self.clickbait.max_punctuation_run == 0 {
            return Err(SafetyError::Policy(
                "clickbait max_punctuation_run must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }

    /// Suggestion text for a flag, falling back to the flag name.
    pub fn suggestion_for(&self, flag: ReasonCode) -> String {
        self.suggestions
            .get(&flag)
            .cloned()
            .unwrap_or_else(|| format!("Resolve the `{flag}` finding before resubmitting."))
    }

    /// Whether `flag` removes `platform` from the safe set.
    pub fn disqualifies(&self, platform: Platform, flag: ReasonCode) -> bool {
        self.platform_disallowed
            .get(&platform)
            .is_some_and(|flags| flags.contains(&flag))
    }
}

/// The built-in policy, initialised once per process.
pub fn builtin() -> &'static SafetyPolicy {
    static BUILTIN: OnceLock<SafetyPolicy> = OnceLock::new();
    BUILTIN.get_or_init(SafetyPolicy::default)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
