use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::classify::Thresholds;

pub const DEFAULT_REQUIRED_SKILLS: &str = "python, machine learning, sql, aws";
pub const DEFAULT_DRAFTS_DIR: &str = "drafts";
pub const DEFAULT_EXPORT_PATH: &str = "screening_results.csv";

/// Application configuration loaded from environment variables.
/// Every value has a default; command-line flags override per run.
#[derive(Debug, Clone)]
pub struct Config {
    pub required_skills: String,
    pub critical_skills: String,
    pub thresholds: Thresholds,
    pub drafts_dir: PathBuf,
    pub export_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let suitable = env_f64("SCREENER_SUITABLE_THRESHOLD", Thresholds::DEFAULT_SUITABLE)?;
        let maybe = env_f64("SCREENER_MAYBE_THRESHOLD", Thresholds::DEFAULT_MAYBE)?;
        let thresholds = Thresholds::new(suitable, maybe).with_context(|| {
            "SCREENER_SUITABLE_THRESHOLD / SCREENER_MAYBE_THRESHOLD are inconsistent"
        })?;

        Ok(Config {
            required_skills: env_or("SCREENER_REQUIRED_SKILLS", DEFAULT_REQUIRED_SKILLS),
            critical_skills: env_or("SCREENER_CRITICAL_SKILLS", ""),
            thresholds,
            drafts_dir: PathBuf::from(env_or("SCREENER_DRAFTS_DIR", DEFAULT_DRAFTS_DIR)),
            export_path: PathBuf::from(env_or("SCREENER_EXPORT_PATH", DEFAULT_EXPORT_PATH)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required_skills: DEFAULT_REQUIRED_SKILLS.to_string(),
            critical_skills: String::new(),
            thresholds: Thresholds::default(),
            drafts_dir: PathBuf::from(DEFAULT_DRAFTS_DIR),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{key} must be a decimal number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_standard_thresholds() {
        let config = Config::default();
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.required_skills, DEFAULT_REQUIRED_SKILLS);
        assert!(config.critical_skills.is_empty());
        assert_eq!(config.export_path, PathBuf::from("screening_results.csv"));
    }

    #[test]
    fn test_env_f64_falls_back_to_default_when_unset() {
        let value = env_f64("SCREENER_TEST_UNSET_THRESHOLD_VAR", 0.55).unwrap();
        assert!((value - 0.55).abs() < f64::EPSILON);
    }
}
