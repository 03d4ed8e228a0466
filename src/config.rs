use std::env;
use std::fmt;

use secrecy::SecretString;

pub const DEFAULT_LLM_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_URL_FETCH_USER_AGENT: &str = "QuizifyAI/1.0";
pub const DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub google_api_key: Option<SecretString>,
    pub llm_api_base_url: String,
    pub llm_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub url_fetch_user_agent: String,
    pub cors_allowed_origin: Option<String>,
    /// Sessions untouched for longer than this are dropped.
    pub session_idle_timeout_minutes: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            environment: Environment::parse(
                &env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            ),
            google_api_key: env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            llm_api_base_url: env::var("LLM_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE_URL.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            url_fetch_user_agent: env::var("URL_FETCH_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_URL_FETCH_USER_AGENT.to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
            session_idle_timeout_minutes: env::var("SESSION_IDLE_TIMEOUT_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or(DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES),
        }
    }

    /// Logs a warning for settings that leave the model unreachable.
    pub fn warn_on_missing_credentials(&self) {
        if self.google_api_key.is_none() {
            if self.environment.is_development() {
                log::warn!(
                    "GOOGLE_API_KEY is not set; model calls will fail until a key is set via /api/set-dev-api-key"
                );
            } else {
                log::warn!("GOOGLE_API_KEY is not set; model calls will fail");
            }
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            environment: Environment::Development,
            google_api_key: Some(SecretString::from("env-test-key".to_string())),
            llm_api_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_model: "test-model".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            url_fetch_user_agent: DEFAULT_URL_FETCH_USER_AGENT.to_string(),
            cors_allowed_origin: None,
            session_idle_timeout_minutes: DEFAULT_SESSION_IDLE_TIMEOUT_MINUTES,
        }
    }
}
