// Job posting trust score.
//
// Starts at 100 and deducts for the patterns that recruitment scams share:
// anonymous employers, free-mail contacts, fee requests, unrealistic pay,
// and application links that go nowhere public.

use serde::{Deserialize, Serialize};

use crate::safety::{links, text};

/// A job posting as submitted to the jobs board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
    #[serde(default)]
    pub employer_verified: bool,
}

/// Trust tier thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustTier {
    Trusted,
    Caution,
    Suspicious,
}

impl TrustTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 75 => TrustTier::Trusted,
            s if s >= 45 => TrustTier::Caution,
            _ => TrustTier::Suspicious,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustTier::Trusted => "Trusted",
            TrustTier::Caution => "Caution",
            TrustTier::Suspicious => "Suspicious",
        }
    }
}

impl std::fmt::Display for TrustTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single deduction with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustSignal {
    pub name: &'static str,
    pub penalty: u32,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrustReport {
    pub score: u8,
    pub tier: TrustTier,
    pub signals: Vec<TrustSignal>,
}

const FREE_MAIL_DOMAINS: [&str; 8] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "mail.ru",
    "proton.me",
    "qq.com",
];

const FEE_PHRASES: [&str; 8] = [
    "registration fee",
    "training fee",
    "pay a deposit",
    "upfront payment",
    "processing fee",
    "send money",
    "western union",
    "gift card",
];

const MIN_DESCRIPTION_CHARS: usize = 80;
const MAX_PLAUSIBLE_SALARY: u32 = 1_000_000;

/// Score a job posting from 0 (likely scam) to 100 (looks legitimate).
pub fn trust_score(job: &JobPosting) -> TrustReport {
    let mut signals = Vec::new();
    let mut push = |name: &'static str, penalty: u32, detail: String| {
        signals.push(TrustSignal {
            name,
            penalty,
            detail,
        });
    };

    let company = job.company.as_deref().map(str::trim).filter(|c| !c.is_empty());
    if company.is_none() {
        push("missing_company", 15, "no employer named".to_string());
    }

    let email = job
        .contact_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    if let Some(domain) = email.and_then(|e| e.rsplit_once('@')).map(|(_, d)| d) {
        let domain = domain.to_ascii_lowercase();
        if FREE_MAIL_DOMAINS.contains(&domain.as_str()) {
            push(
                "free_mail_contact",
                10,
                format!("contact address uses {domain}"),
            );
        }
    }

    let app_url = job
        .application_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    if let Some(url) = app_url {
        if let Err(reason) = links::check_url(url) {
            push("unsafe_application_url", 25, format!("{url}: {reason}"));
        }
    }
    if email.is_none() && app_url.is_none() {
        push(
            "no_contact_channel",
            15,
            "neither a contact email nor an application link".to_string(),
        );
    }

    let haystack = text::normalize(&format!("{} {}", job.title, job.description));
    if let Some(phrase) = FEE_PHRASES.iter().find(|p| haystack.contains(*p)) {
        push(
            "upfront_fee",
            35,
            format!("asks applicants for money (\"{phrase}\")"),
        );
    }

    match (job.salary_min, job.salary_max) {
        (Some(min), Some(max)) if max < min => {
            push(
                "implausible_salary",
                15,
                format!("maximum {max} is below minimum {min}"),
            );
        }
        (_, Some(max)) if max > MAX_PLAUSIBLE_SALARY => {
            push(
                "implausible_salary",
                15,
                format!("maximum {max} is unrealistically high"),
            );
        }
        _ => {}
    }

    let desc_len = text::char_len(&job.description);
    if desc_len < MIN_DESCRIPTION_CHARS {
        push(
            "thin_description",
            10,
            format!("{desc_len} characters, expected at least {MIN_DESCRIPTION_CHARS}"),
        );
    }

    if !job.employer_verified {
        push(
            "unverified_employer",
            10,
            "employer account not verified".to_string(),
        );
    }

    let deducted = signals
        .iter()
        .fold(0u32, |total, s| total.saturating_add(s.penalty));
    let score = 100u32.saturating_sub(deducted) as u8;

    TrustReport {
        score,
        tier: TrustTier::from_score(score),
        signals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(TrustTier::from_score(75), TrustTier::Trusted);
        assert_eq!(TrustTier::from_score(74), TrustTier::Caution);
        assert_eq!(TrustTier::from_score(45), TrustTier::Caution);
        assert_eq!(TrustTier::from_score(44), TrustTier::Suspicious);
    }

    #[test]
    fn test_empty_posting_needs_caution() {
        // Missing company, no contact, thin description, unverified
        let report = trust_score(&JobPosting::default());
        assert_eq!(report.score, 50);
        assert_eq!(report.tier, TrustTier::Caution);
    }
}
