use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::fit_score::WeightSettings;
use crate::analysis::AnalysisSettings;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Unset disables the extraction snapshot cache.
    pub redis_url: Option<String>,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout: Duration,
    pub cache_ttl: Duration,
    /// JSON taxonomy override; the built-in table is used when unset.
    pub taxonomy_path: Option<PathBuf>,
    pub analysis: AnalysisSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        let defaults = AnalysisSettings::default();
        let fuzzy_threshold = parse_or(&lookup, "FUZZY_THRESHOLD", defaults.fuzzy_threshold)?;
        if !(fuzzy_threshold > 0.0 && fuzzy_threshold < 1.0) {
            bail!("FUZZY_THRESHOLD must lie strictly between 0 and 1, got {fuzzy_threshold}");
        }
        let weights = WeightSettings {
            technical: parse_weight(&lookup, "TECHNICAL_WEIGHT")?,
            soft_skills: parse_weight(&lookup, "SOFT_SKILLS_WEIGHT")?,
        };

        Ok(Config {
            database_url: require("DATABASE_URL")?,
            redis_url: lookup("REDIS_URL").filter(|v| !v.trim().is_empty()),
            anthropic_api_key: require("ANTHROPIC_API_KEY")?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 45)?),
            cache_ttl: Duration::from_secs(parse_or(&lookup, "CACHE_TTL_SECS", 86_400)?),
            taxonomy_path: lookup("SKILL_TAXONOMY_PATH").map(PathBuf::from),
            analysis: AnalysisSettings {
                fuzzy_threshold,
                max_recommendations: parse_or(
                    &lookup,
                    "MAX_RECOMMENDATIONS",
                    defaults.max_recommendations,
                )?,
                weights,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_weight(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<f64>> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let weight: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))?;
    if !(0.0..=1.0).contains(&weight) {
        bail!("{key} must lie between 0 and 1, got {weight}");
    }
    Ok(Some(weight))
}
