use anyhow::{Context, Result};

use crate::plan::PlanPolicy;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Without a key every assessment takes the heuristic path.
    pub anthropic_api_key: Option<String>,
    /// Without a URL profiles live in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub plan_policy: PlanPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = PlanPolicy::default();
        let plan_policy = PlanPolicy {
            points_per_week: parse_or(&lookup, "PLAN_POINTS_PER_WEEK", defaults.points_per_week)?,
            high_gap_threshold: parse_or(&lookup, "PLAN_HIGH_GAP", defaults.high_gap_threshold)?,
            medium_gap_threshold: parse_or(&lookup, "PLAN_MEDIUM_GAP", defaults.medium_gap_threshold)?,
        };
        anyhow::ensure!(
            plan_policy.points_per_week > 0.0,
            "PLAN_POINTS_PER_WEEK must be positive"
        );
        anyhow::ensure!(
            plan_policy.medium_gap_threshold <= plan_policy.high_gap_threshold,
            "PLAN_MEDIUM_GAP ({}) must not exceed PLAN_HIGH_GAP ({})",
            plan_policy.medium_gap_threshold,
            plan_policy.high_gap_threshold
        );

        Ok(Config {
            anthropic_api_key: optional(&lookup, "ANTHROPIC_API_KEY"),
            redis_url: optional(&lookup, "REDIS_URL"),
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            plan_policy,
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
