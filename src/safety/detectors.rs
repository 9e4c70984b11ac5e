// Independent detectors — each inspects one aspect of a submission.
//
// A detector returns the findings it produced, with the deduction each one
// carries. Detectors never look at each other's output; the scorer sums
// them and derives flags, platforms, and suggestions afterwards.

use regex_lite::Regex;
use tracing::debug;

use super::links;
use super::models::{Finding, ReasonCode, SubmissionInput};
use super::policy::SafetyPolicy;
use super::text;
use super::SafetyError;

/// A policy with its deny-list compiled to word-boundary patterns.
#[derive(Debug)]
pub struct CompiledPolicy {
    pub policy: SafetyPolicy,
    keyword_patterns: Vec<(String, Regex)>,
    sensational_phrases: Vec<String>,
}

impl CompiledPolicy {
    pub fn compile(policy: SafetyPolicy) -> Result<Self, SafetyError> {
        let policy = policy.validated()?;

        let mut keyword_patterns = Vec::with_capacity(policy.banned_keywords.len());
        for (category, terms) in &policy.banned_keywords {
            if terms.is_empty() {
                continue;
            }
            let alternation = terms
                .iter()
                .map(|term| bounded(&text::normalize(term)))
                .collect::<Vec<_>>()
                .join("|");
            let regex = Regex::new(&format!("(?:{alternation})")).map_err(|e| {
                SafetyError::Policy(format!("keyword category `{category}` does not compile: {e}"))
            })?;
            keyword_patterns.push((category.clone(), regex));
        }

        let sensational_phrases = policy
            .clickbait
            .sensational_phrases
            .iter()
            .map(|p| text::normalize(p))
            .filter(|p| !p.is_empty())
            .collect();

        Ok(Self {
            policy,
            keyword_patterns,
            sensational_phrases,
        })
    }

    /// Normalized text with every deny-list match removed.
    fn strip_banned(&self, raw: &str) -> String {
        let mut stripped = text::normalize(raw);
        for (_, regex) in &self.keyword_patterns {
            stripped = regex.replace_all(&stripped, "").into_owned();
        }
        text::normalize(&stripped)
    }
}

/// Escape a term and anchor it on word boundaries where its edges are word
/// characters. `\b` next to `%` or `!` would never match.
fn bounded(term: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if term.chars().next().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex_lite::escape(term));
    if term.chars().last().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

/// Content shorter than the quality floor. Deny-list terms never count
/// toward the floor, so adding one can't lift a post over it.
pub fn content_length(submission: &SubmissionInput, compiled: &CompiledPolicy) -> Vec<Finding> {
    let len = text::char_len(&compiled.strip_banned(&submission.content));
    let min = compiled.policy.min_content_length;
    if len >= min {
        return vec![];
    }
    debug!(len, min, "content below minimum length");
    vec![Finding {
        flag: ReasonCode::LowContentLength,
        penalty: compiled.policy.penalties.low_content_length,
        detail: format!("{len} characters, minimum is {min}"),
    }]
}

/// Deny-list scan over title and content, one finding per matched category.
pub fn banned_keywords(submission: &SubmissionInput, compiled: &CompiledPolicy) -> Vec<Finding> {
    let haystack = text::normalize(&format!("{} {}", submission.title, submission.content));
    let per_hit = compiled.policy.penalties.banned_keyword;
    let cap = compiled.policy.penalties.banned_keyword_cap;

    let mut used = 0u32;
    let mut findings = Vec::new();
    for (category, regex) in &compiled.keyword_patterns {
        let Some(hit) = regex.find(&haystack) else {
            continue;
        };
        let penalty = per_hit.min(cap.saturating_sub(used));
        used += penalty;
        debug!(category = %category, term = hit.as_str(), penalty, "banned keyword");
        findings.push(Finding {
            flag: ReasonCode::BannedKeyword,
            penalty,
            detail: format!("{category}: \"{}\"", hit.as_str()),
        });
    }
    findings
}

/// Title heuristics: punctuation runs, shouting, sensational phrasing.
pub fn clickbait_title(submission: &SubmissionInput, compiled: &CompiledPolicy) -> Vec<Finding> {
    let rules = &compiled.policy.clickbait;
    let title = submission.title.trim();

    let mut reasons = Vec::new();

    let run = text::longest_punctuation_run(title);
    if run >= rules.max_punctuation_run {
        reasons.push(format!("{run} consecutive !/? characters"));
    }

    let (ratio, letters) = text::caps_ratio(title);
    if letters >= rules.caps_min_letters && ratio > rules.caps_ratio {
        reasons.push(format!("{:.0}% uppercase", ratio * 100.0));
    }

    let normalized = text::normalize(title);
    if let Some(phrase) = compiled
        .sensational_phrases
        .iter()
        .find(|p| normalized.contains(p.as_str()))
    {
        reasons.push(format!("sensational phrase \"{phrase}\""));
    }

    if reasons.is_empty() {
        return vec![];
    }
    debug!(reasons = ?reasons, "clickbait title");
    vec![Finding {
        flag: ReasonCode::ClickbaitTitle,
        penalty: compiled.policy.penalties.clickbait_title,
        detail: reasons.join(", "),
    }]
}

/// Backlink count and per-URL safety. Blank entries are ignored.
pub fn backlinks(submission: &SubmissionInput, compiled: &CompiledPolicy) -> Vec<Finding> {
    let urls: Vec<&str> = submission
        .backlinks
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut findings = Vec::new();

    let max = compiled.policy.max_backlinks;
    if urls.len() > max {
        findings.push(Finding {
            flag: ReasonCode::ExcessiveLinks,
            penalty: compiled.policy.penalties.excessive_links,
            detail: format!("{} backlinks, maximum is {max}", urls.len()),
        });
    }

    let mut charged = false;
    for link in urls {
        if let Err(reason) = links::check_url(link) {
            let penalty = if charged {
                0
            } else {
                charged = true;
                compiled.policy.penalties.unsafe_backlink
            };
            debug!(url = link, %reason, "unsafe backlink");
            findings.push(Finding {
                flag: ReasonCode::UnsafeBacklink,
                penalty,
                detail: format!("{link}: {reason}"),
            });
        }
    }

    findings
}

/// Featured image must be a public http(s) URL when provided.
pub fn featured_image(submission: &SubmissionInput, compiled: &CompiledPolicy) -> Vec<Finding> {
    let Some(image) = submission
        .featured_image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return vec![];
    };

    match links::check_url(image) {
        Ok(()) => vec![],
        Err(reason) => vec![Finding {
            flag: ReasonCode::UnsafeFeaturedImage,
            penalty: compiled.policy.penalties.unsafe_featured_image,
            detail: format!("{image}: {reason}"),
        }],
    }
}

/// Every detector, in the order findings are reported.
pub type Detector = fn(&SubmissionInput, &CompiledPolicy) -> Vec<Finding>;

pub const ALL_DETECTORS: [Detector; 5] = [
    content_length,
    banned_keywords,
    clickbait_title,
    backlinks,
    featured_image,
];
