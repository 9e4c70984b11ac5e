use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use tribalpulse::config::Config;
use tribalpulse::jobs::{self, JobPosting};
use tribalpulse::moderation::{self, ModerationRecord, ModerationStatus};
use tribalpulse::output::terminal;
use tribalpulse::safety::{ContentScorer, ContentValidator, SubmissionInput};

/// TribalPulse: content safety scoring for blog submissions.
///
/// Scores a submission for banned wording, clickbait, short content, and
/// unsafe links, then decides whether it can skip the moderation queue.
#[derive(Parser)]
#[command(name = "tribalpulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission JSON file ("-" reads stdin)
    Validate {
        input: String,

        /// Print the result as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Decide the moderation status for a known score
    Decide {
        #[arg(long)]
        score: i64,

        #[arg(long)]
        reputation: i64,

        /// The submitter has never been reviewed before
        #[arg(long)]
        first: bool,
    },

    /// Validate and triage a submission, printing the moderation record
    Submit {
        input: String,

        /// Submitter reputation score
        #[arg(long, default_value = "0")]
        reputation: i64,

        /// The submitter has never been reviewed before
        #[arg(long)]
        first: bool,
    },

    /// Validate every line of a JSONL file of submissions
    Batch {
        input: String,

        /// Reputation for lines without a `reputation` field
        #[arg(long, default_value = "0")]
        reputation: i64,
    },

    /// Trust-score a job posting JSON file ("-" reads stdin)
    Job {
        input: String,

        #[arg(long)]
        json: bool,
    },

    /// Print the effective safety policy as JSON
    Policy,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tribalpulse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Validate { input, json } => {
            let scorer = build_scorer(&config)?;
            let submission = SubmissionInput::from_json_str(&read_input(&input)?)?;
            let result = scorer.validate(&submission);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                terminal::display_validation(&submission, &result);
            }
        }

        Commands::Decide {
            score,
            reputation,
            first,
        } => {
            let status = moderation::decide(score, reputation, first, &config.thresholds);
            terminal::display_status(status);
        }

        Commands::Submit {
            input,
            reputation,
            first,
        } => {
            let scorer = build_scorer(&config)?;
            let submission = SubmissionInput::from_json_str(&read_input(&input)?)?;
            let result = scorer.validate(&submission);
            let status = moderation::decide(
                i64::from(result.score),
                reputation,
                first,
                &config.thresholds,
            );
            info!(
                score = result.score,
                status = %status,
                flags = result.flags.len(),
                "Submission triaged"
            );

            terminal::display_status(status);

            let record = ModerationRecord::build(&result, status, chrono::Utc::now());
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Batch { input, reputation } => {
            let scorer = build_scorer(&config)?;
            let text = read_input(&input)?;
            let lines: Vec<(usize, &str)> = text
                .lines()
                .enumerate()
                .filter(|(_, l)| !l.trim().is_empty())
                .collect();

            let pb = ProgressBar::new(lines.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")
                    .context("Invalid progress bar template")?,
            );

            let (mut approved, mut pending, mut rejected, mut invalid) = (0, 0, 0, 0);
            for (line_no, line) in lines {
                pb.inc(1);
                let value: serde_json::Value = match serde_json::from_str(line) {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(line = line_no + 1, error = %e, "Skipping malformed JSON line");
                        invalid += 1;
                        continue;
                    }
                };
                let line_reputation = value
                    .get("reputation")
                    .and_then(|r| r.as_i64())
                    .unwrap_or(reputation);
                let first = value
                    .get("is_first_submission")
                    .and_then(|f| f.as_bool())
                    .unwrap_or(false);

                let submission = match SubmissionInput::from_json_value(value) {
                    Ok(s) => s,
                    Err(e) => {
                        warn!(line = line_no + 1, error = %e, "Skipping invalid submission");
                        invalid += 1;
                        continue;
                    }
                };

                let result = scorer.validate(&submission);
                match moderation::decide(
                    i64::from(result.score),
                    line_reputation,
                    first,
                    &config.thresholds,
                ) {
                    ModerationStatus::Approved => approved += 1,
                    ModerationStatus::Pending => pending += 1,
                    ModerationStatus::Rejected => rejected += 1,
                }
            }
            pb.finish_and_clear();

            terminal::display_batch_summary(approved, pending, rejected, invalid);
        }

        Commands::Job { input, json } => {
            let job: JobPosting = serde_json::from_str(&read_input(&input)?)
                .context("Job posting is not valid JSON")?;
            let report = jobs::trust_score(&job);

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_trust_report(&job.title, &report);
            }
        }

        Commands::Policy => {
            let policy = config.load_policy()?;
            if let Some(path) = &config.policy_path {
                eprintln!("{}", format!("Policy loaded from {}", path.display()).dimmed());
            }
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
    }

    Ok(())
}

/// Compile the configured policy into a scorer. Loaded once per run.
fn build_scorer(config: &Config) -> Result<ContentScorer> {
    let policy = config.load_policy()?;
    Ok(ContentScorer::new(policy)?)
}

/// Read a file, or stdin when the path is "-".
fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("Failed to read {path}"))
}
