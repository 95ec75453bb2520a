//! Application configuration types.
//!
//! `AppConfig` represents the `config.toml` that controls the HTTP listener,
//! database location, caller authentication, and the candidate models used
//! for reply and title generation. Every field has a default, so an empty
//! (or missing) file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::llm::GenerationParams;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub reply: ReplyConfig,

    #[serde(default)]
    pub title: TitleConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database location. When `url` is absent the database lives in the data dir.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// How callers prove who they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// HMAC-signed bearer tokens issued with a shared secret.
    #[default]
    SignedToken,
    /// Identity headers injected by an authenticating reverse proxy.
    TrustedHeaders,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,

    /// Environment variable holding the token signing secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
}

fn default_secret_env() -> String {
    "CAREERGUIDE_AUTH_SECRET".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            secret_env: default_secret_env(),
        }
    }
}

/// Wire protocol spoken by a completion backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Gemini,
    OpenaiCompatible,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::OpenaiCompatible => write!(f, "openai_compatible"),
        }
    }
}

/// One candidate backend: a provider bound to a single model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Environment variable holding the API key. Unset means the candidate is skipped.
    pub api_key_env: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl CandidateConfig {
    pub fn gemini(model: &str, api_key_env: &str) -> Self {
        Self {
            provider: ProviderKind::Gemini,
            model: model.to_string(),
            api_key_env: api_key_env.to_string(),
            base_url: None,
        }
    }
}

/// Settings for the assistant reply call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_reply_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_reply_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_reply_candidates")]
    pub candidates: Vec<CandidateConfig>,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_reply_max_output_tokens() -> u32 {
    512
}

fn default_reply_timeout_secs() -> u64 {
    30
}

fn default_reply_candidates() -> Vec<CandidateConfig> {
    vec![CandidateConfig::gemini("gemini-2.0-flash", "GEMINI_API_KEY")]
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: default_reply_max_output_tokens(),
            timeout_secs: default_reply_timeout_secs(),
            candidates: default_reply_candidates(),
        }
    }
}

impl ReplyConfig {
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Settings for the session title call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_title_max_output_tokens")]
    pub max_output_tokens: u32,

    #[serde(default = "default_title_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_title_candidates")]
    pub candidates: Vec<CandidateConfig>,
}

fn default_title_max_output_tokens() -> u32 {
    50
}

fn default_title_timeout_secs() -> u64 {
    15
}

fn default_title_candidates() -> Vec<CandidateConfig> {
    vec![
        CandidateConfig::gemini("gemini-2.0-flash", "AI_TITLE_AI_KEY"),
        CandidateConfig::gemini("gemini-1.5-flash", "AI_TITLE_AI_KEY"),
    ]
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_output_tokens: default_title_max_output_tokens(),
            timeout_secs: default_title_timeout_secs(),
            candidates: default_title_candidates(),
        }
    }
}

impl TitleConfig {
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
