//! Runtime configuration read from the environment

use crate::reply::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use crate::system_prompt::load_instructions;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_WELCOME: &str = "Hello! How can I help you today?";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 60;

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("CHAT_PORT is not a valid port: {0}")]
    InvalidPort(String),
    #[error("CHAT_SESSION_TTL_SECS must be a positive number of seconds: {0}")]
    InvalidSessionTtl(String),
    #[error("Cannot read instructions file {}: {source}", path.display())]
    Instructions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Instructions file {} is empty", .0.display())]
    EmptyInstructions(PathBuf),
}

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub gemini: GeminiConfig,
    pub instructions: String,
    pub welcome_message: String,
    pub port: u16,
    /// Idle time after which a session is discarded
    pub session_ttl: Duration,
}

impl ChatConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY").ok_or(ConfigError::MissingApiKey)?;

        let gemini = GeminiConfig {
            api_key,
            api_base: get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };

        let port = match get("CHAT_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let session_ttl = match get("CHAT_SESSION_TTL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidSessionTtl(raw))?,
            None => Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        };

        let instructions_path = get("CHAT_INSTRUCTIONS_PATH").map(PathBuf::from);
        let instructions = load_instructions(instructions_path.as_deref())?;

        Ok(Self {
            gemini,
            instructions,
            welcome_message: get("CHAT_WELCOME_MESSAGE")
                .unwrap_or_else(|| DEFAULT_WELCOME.to_string()),
            port,
            session_ttl,
        })
    }
}
