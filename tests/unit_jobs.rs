// Unit tests for the job posting trust score.

use tribalpulse::jobs::{trust_score, JobPosting, TrustTier};

fn legit_posting() -> JobPosting {
    JobPosting {
        title: "Community coordinator".to_string(),
        description: "Coordinate weekly tribe meetups, manage volunteer schedules, and report \
                      attendance to the regional office. Two years of event experience preferred."
            .to_string(),
        company: Some("Northern Arts Collective".to_string()),
        contact_email: Some("jobs@northernarts.org".to_string()),
        application_url: Some("https://northernarts.org/careers/42".to_string()),
        salary_min: Some(42_000),
        salary_max: Some(51_000),
        employer_verified: true,
    }
}

fn signal_names(job: &JobPosting) -> Vec<&'static str> {
    trust_score(job).signals.iter().map(|s| s.name).collect()
}

#[test]
fn legitimate_posting_is_fully_trusted() {
    let report = trust_score(&legit_posting());
    assert_eq!(report.score, 100);
    assert_eq!(report.tier, TrustTier::Trusted);
    assert!(report.signals.is_empty(), "got {:?}", report.signals);
}

#[test]
fn upfront_fee_is_heavily_penalised() {
    let mut job = legit_posting();
    job.description.push_str(" A small Registration Fee is required before onboarding.");
    let report = trust_score(&job);
    assert_eq!(report.score, 65);
    assert_eq!(report.tier, TrustTier::Caution);
}

#[test]
fn free_mail_contact_flagged() {
    let mut job = legit_posting();
    job.contact_email = Some("recruiter.fast@Gmail.com".to_string());
    assert_eq!(signal_names(&job), vec!["free_mail_contact"]);
}

#[test]
fn private_application_url_flagged() {
    let mut job = legit_posting();
    job.application_url = Some("http://192.168.1.20/apply".to_string());
    assert_eq!(signal_names(&job), vec!["unsafe_application_url"]);
}

#[test]
fn missing_every_contact_channel_flagged() {
    let mut job = legit_posting();
    job.contact_email = None;
    job.application_url = Some("   ".to_string());
    assert_eq!(signal_names(&job), vec!["no_contact_channel"]);
}

#[test]
fn inverted_and_absurd_salaries_flagged() {
    let mut job = legit_posting();
    job.salary_min = Some(60_000);
    job.salary_max = Some(30_000);
    assert_eq!(signal_names(&job), vec!["implausible_salary"]);

    job.salary_min = None;
    job.salary_max = Some(5_000_000);
    assert_eq!(signal_names(&job), vec!["implausible_salary"]);
}

#[test]
fn scam_posting_is_suspicious() {
    let job = JobPosting {
        title: "Work from home, earn $5000/week".to_string(),
        description: "Send money via gift card to start.".to_string(),
        company: None,
        contact_email: Some("hr@qq.com".to_string()),
        application_url: None,
        salary_min: None,
        salary_max: Some(9_000_000),
        employer_verified: false,
    };
    let report = trust_score(&job);
    // 15 company + 10 free mail + 35 fee + 15 salary + 10 thin + 10 unverified
    assert_eq!(report.score, 5);
    assert_eq!(report.tier, TrustTier::Suspicious);
}

#[test]
fn penalties_past_one_hundred_floor_at_zero() {
    let job = JobPosting {
        title: "Work from home, earn $5000/week".to_string(),
        description: "Send money via gift card to start.".to_string(),
        company: None,
        contact_email: Some("hr@qq.com".to_string()),
        application_url: Some("http://192.168.1.20/apply".to_string()),
        salary_min: None,
        salary_max: Some(9_000_000),
        employer_verified: false,
    };
    let report = trust_score(&job);
    let total: u32 = report.signals.iter().map(|s| s.penalty).sum();
    assert!(total > 100, "signals only deduct {total}");
    assert_eq!(report.score, 0);
    assert_eq!(report.tier, TrustTier::Suspicious);
}
