use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::GEMINI_API_URL;

/// Application configuration loaded from environment variables.
/// Every setting has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Presence of a key switches skill extraction to the LLM-backed path.
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub llm_timeout_secs: u64,
    pub catalog_path: PathBuf,
    /// Cap on skills returned by the deterministic extractor.
    pub max_skills: usize,
    pub max_recommendations: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_api_url: GEMINI_API_URL.to_string(),
            llm_timeout_secs: 30,
            catalog_path: PathBuf::from("static/data/course_catalog.json"),
            max_skills: 20,
            max_recommendations: 10,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_url: optional_env("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,
            catalog_path: optional_env("COURSE_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            max_skills: parse_env("MAX_SKILLS", defaults.max_skills)?,
            max_recommendations: parse_env("MAX_RECOMMENDATIONS", defaults.max_recommendations)?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

/// Returns the variable's value, treating unset and blank alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.llm_timeout_secs, 30);
        assert_eq!(config.max_skills, 20);
        assert_eq!(config.max_recommendations, 10);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.catalog_path,
            PathBuf::from("static/data/course_catalog.json")
        );
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("SKILLSTOWN_TEST_UNSET_PORT", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SKILLSTOWN_TEST_BAD_NUMBER", "twelve");
        let err = parse_env::<usize>("SKILLSTOWN_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("SKILLSTOWN_TEST_BAD_NUMBER"));
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("SKILLSTOWN_TEST_BLANK_KEY", "   ");
        assert!(optional_env("SKILLSTOWN_TEST_BLANK_KEY").is_none());
    }
}
