use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// The Gemini API key is the only required variable: it must live in server
/// configuration and is never exposed to the browser bundle.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    /// Base URL of the generative-language API. Overridable so tests and
    /// local mock servers can redirect the outbound call.
    pub gemini_api_url: String,
    /// Directory the static portfolio page is served from.
    pub static_dir: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "apps/api/static".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
