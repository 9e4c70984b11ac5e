use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use crate::moderation::ModerationThresholds;
use crate::safety::SafetyPolicy;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here is secret; every value has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Safety policy override file (TRIBALPULSE_POLICY_PATH). When unset, the
    /// per-user config dir is checked, then the built-in policy is used.
    pub policy_path: Option<PathBuf>,
    pub thresholds: ModerationThresholds,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build configuration from any variable lookup (the process env in
    /// production, a map in tests).
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ModerationThresholds::default();
        let thresholds = ModerationThresholds {
            approve_min_score: var_i64(
                &var,
                "TRIBALPULSE_APPROVE_SCORE",
                defaults.approve_min_score,
            )?,
            trusted_reputation: var_i64(
                &var,
                "TRIBALPULSE_TRUSTED_REPUTATION",
                defaults.trusted_reputation,
            )?,
            reject_below: var_i64(&var, "TRIBALPULSE_REJECT_BELOW", defaults.reject_below)?,
        }
        .validated()
        .context("Invalid moderation thresholds in environment")?;

        let policy_path = match var("TRIBALPULSE_POLICY_PATH") {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => default_policy_path().filter(|p| p.exists()),
        };

        Ok(Self {
            policy_path,
            thresholds,
        })
    }

    /// Load the safety policy once. Falls back to the built-in tables when no
    /// override file is configured.
    pub fn load_policy(&self) -> Result<SafetyPolicy> {
        match &self.policy_path {
            Some(path) => {
                info!(path = %path.display(), "Loading safety policy override");
                SafetyPolicy::from_json_file(path)
            }
            None => Ok(crate::safety::policy::builtin().clone()),
        }
    }
}

/// `<config dir>/tribalpulse/policy.json`, e.g. ~/.config/tribalpulse/policy.json on Linux.
pub fn default_policy_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tribalpulse").join("policy.json"))
}

fn var_i64(var: &impl Fn(&str) -> Option<String>, name: &str, default: i64) -> Result<i64> {
    match var(name) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be an integer, got {raw:?}")),
        _ => Ok(default),
    }
}
