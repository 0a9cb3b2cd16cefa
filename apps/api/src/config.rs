use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Every AI tunable is externally configurable. `GEMINI_API_KEY` is the one
/// deliberately optional variable: without it the gateway runs in permanent
/// "unavailable" mode and every analysis resolves to fallback content.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_k: u32,
    pub top_p: f32,
    /// Overall timeout per outbound gateway call, seconds.
    pub request_timeout_secs: u64,
    /// Total gateway attempts per call (first try included).
    pub max_retries: u32,
    pub cache_ttl_secs: u64,
    pub cache_capacity: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            gemini_base_url: env_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
            temperature: parsed_env("GEMINI_TEMPERATURE", 0.7)?,
            max_output_tokens: parsed_env("GEMINI_MAX_OUTPUT_TOKENS", 2048)?,
            top_k: parsed_env("GEMINI_TOP_K", 40)?,
            top_p: parsed_env("GEMINI_TOP_P", 0.95)?,
            request_timeout_secs: parsed_env("GEMINI_TIMEOUT_SECS", 30)?,
            max_retries: parsed_env("GEMINI_MAX_RETRIES", 3)?,
            cache_ttl_secs: parsed_env("ANALYSIS_CACHE_TTL_SECS", 1800)?,
            cache_capacity: parsed_env("ANALYSIS_CACHE_CAPACITY", 256)?,
            port: parsed_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Defaults for unit tests: no env reads, no API key.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            gemini_api_key: None,
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            max_output_tokens: 2048,
            top_k: 40,
            top_p: 0.95,
            request_timeout_secs: 30,
            max_retries: 3,
            cache_ttl_secs: 1800,
            cache_capacity: 256,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
