//! Configuration loading, validation, and management for ragagent.
//!
//! Loads configuration from `~/.ragagent/config.toml` (or the path in
//! `RAGAGENT_CONFIG`), then applies environment overrides. A `.env` file in
//! the working directory is loaded first, so the usual `OPENAI_*` variables
//! can live there. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "RAGAGENT_CONFIG";

/// Environment variables that override file settings.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_ENDPOINT: &str = "OPENAI_ENDPOINT";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_EMBEDDING_MODEL: &str = "OPENAI_EMBEDDING_MODEL";

/// The root configuration structure.
///
/// Maps directly to `~/.ragagent/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the OpenAI-compatible endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model used to index and query documents
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per LLM response (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentSettings,

    /// Retrieval tool settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Seed corpus settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Transcript rendering settings
    #[serde(default)]
    pub transcript: TranscriptConfig,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_temperature() -> f32 {
    0.7
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("embedding_model", &self.embedding_model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("agent", &self.agent)
            .field("retrieval", &self.retrieval)
            .field("knowledge", &self.knowledge)
            .field("transcript", &self.transcript)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    /// System prompt sent ahead of every request
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Maximum LLM round-trips per run
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_system_prompt() -> String {
    concat!(
        "あなたは未知の情報についてRAGコンテキストにアクセスするツールを持っています。",
        "質問に対して、このツールを必ず利用して回答してください。",
    )
    .into()
}
fn default_max_iterations() -> u32 {
    25
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            max_iterations: default_max_iterations(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Documents returned per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    2
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON file holding an array of documents; built-in corpus when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// Longest text shown before truncation
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_max_chars() -> usize {
    240
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, `RAGAGENT_CONFIG`, or the default
    /// location, in that order of preference.
    ///
    /// Loads `.env` first, then applies these environment overrides:
    /// - `OPENAI_API_KEY`
    /// - `OPENAI_ENDPOINT`
    /// - `OPENAI_MODEL`
    /// - `OPENAI_EMBEDDING_MODEL`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(env_file) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", env_file.display());
        }

        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var(CONFIG_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| Self::config_dir().join("config.toml")),
        };

        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = get(ENV_ENDPOINT) {
            self.base_url = url;
        }
        if let Some(model) = get(ENV_MODEL) {
            self.model = model;
        }
        if let Some(model) = get(ENV_EMBEDDING_MODEL) {
            self.embedding_model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".ragagent")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be > 0".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be > 0".into(),
            ));
        }

        if self.transcript.max_chars < 4 {
            return Err(ConfigError::ValidationError(
                "transcript.max_chars must be at least 4".into(),
            ));
        }

        Ok(())
    }

    /// The API key, or an error naming where to set it.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredentials(ENV_API_KEY))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            temperature: default_temperature(),
            max_tokens: None,
            agent: AgentSettings::default(),
            retrieval: RetrievalConfig::default(),
            knowledge: KnowledgeConfig::default(),
            transcript: TranscriptConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured (set {0} or api_key in the config file)")]
    MissingCredentials(&'static str),
}
