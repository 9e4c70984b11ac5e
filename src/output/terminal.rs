// Colored terminal output for validation results, triage, and job trust.
//
// main.rs delegates all terminal formatting here.

use colored::Colorize;

use crate::jobs::{TrustReport, TrustTier};
use crate::moderation::ModerationStatus;
use crate::safety::{Platform, SubmissionInput, ValidationResult};

/// Display a single submission's validation result.
pub fn display_validation(submission: &SubmissionInput, result: &ValidationResult) {
    println!(
        "\n{}",
        format!(
            "=== \"{}\" ({}) ===",
            super::truncate_chars(&submission.title, 60),
            submission.category
        )
        .bold()
    );

    println!("  Safety score: {}/100", colorize_score(result.score));

    if result.is_clean() {
        println!("  Flags: {}", "none".green());
    } else {
        let chips: Vec<String> = result
            .flags
            .iter()
            .map(|f| format!("[{}]", f).yellow().to_string())
            .collect();
        println!("  Flags: {}", chips.join(" "));
    }

    let platforms: Vec<String> = Platform::ALL
        .iter()
        .map(|p| {
            if result.safe_for_platforms.contains(p) {
                p.as_str().green().to_string()
            } else {
                p.as_str().red().strikethrough().to_string()
            }
        })
        .collect();
    println!("  Platforms: {}", platforms.join("  "));

    if !result.findings.is_empty() {
        println!("\n  Findings:");
        for finding in &result.findings {
            println!(
                "    {:<22} -{:<3} {}",
                finding.flag.as_str(),
                finding.penalty,
                super::truncate_chars(&finding.detail, 80).dimmed()
            );
        }
    }

    if !result.suggestions.is_empty() {
        println!("\n  Suggestions:");
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            println!("    {}. {}", i + 1, suggestion);
        }
    }
}

/// Display the moderation disposition. Goes to stderr so JSON on stdout
/// stays machine-readable.
pub fn display_status(status: ModerationStatus) {
    eprintln!("{}", status_line(status));
}

fn status_line(status: ModerationStatus) -> String {
    format!("  Moderation: {}", colorize_status(status))
}

/// Display a job posting's trust report.
pub fn display_trust_report(title: &str, report: &TrustReport) {
    println!(
        "\n{}",
        format!("=== Job: {} ===", super::truncate_chars(title, 60)).bold()
    );
    println!(
        "  Trust score: {}/100 ({})",
        colorize_score(report.score),
        colorize_tier(report.tier)
    );
    if report.signals.is_empty() {
        println!("  No warning signals.");
        return;
    }
    println!("\n  Signals:");
    for signal in &report.signals {
        println!(
            "    {:<24} -{:<3} {}",
            signal.name,
            signal.penalty,
            signal.detail.dimmed()
        );
    }
}

/// Display the tally from a batch run.
pub fn display_batch_summary(approved: usize, pending: usize, rejected: usize, invalid: usize) {
    println!(
        "\n{}",
        format!(
            "=== Batch summary ({} submissions) ===",
            approved + pending + rejected + invalid
        )
        .bold()
    );
    println!("  {} {} approved", "+".green(), approved);
    println!("  {} {} pending review", "~".yellow(), pending);
    println!("  {} {} rejected", "!!".red().bold(), rejected);
    if invalid > 0 {
        println!("  {} {} invalid (not scored)", "?".dimmed(), invalid);
    }
}

fn colorize_score(score: u8) -> colored::ColoredString {
    let text = score.to_string();
    match score {
        80..=100 => text.green().bold(),
        40..=79 => text.yellow(),
        _ => text.red().bold(),
    }
}

fn colorize_status(status: ModerationStatus) -> colored::ColoredString {
    match status {
        ModerationStatus::Approved => status.as_str().green().bold(),
        ModerationStatus::Pending => status.as_str().yellow(),
        ModerationStatus::Rejected => status.as_str().red().bold(),
    }
}

fn colorize_tier(tier: TrustTier) -> colored::ColoredString {
    match tier {
        TrustTier::Trusted => tier.as_str().green(),
        TrustTier::Caution => tier.as_str().yellow(),
        TrustTier::Suspicious => tier.as_str().red().bold(),
    }
}
