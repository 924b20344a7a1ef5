use crate::extractor::{ExtractorProfile, SchemaVersion, DEFAULT_TEMPERATURE};
use crate::providers::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};
use crate::reducer::DEFAULT_USER_AGENT;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Base name of the optional TOML file read from the working directory
pub const CONFIG_FILE_NAME: &str = "recipe-summarizer";

/// Prefix of overriding environment variables, e.g. `RECIPE_SUMMARIZER__MODEL`
pub const ENV_PREFIX: &str = "RECIPE_SUMMARIZER";

/// Conventional variable consulted when no key is configured
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Settings for one summarizer
#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    /// Gemini API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model identifier (e.g., "gemini-2.0-flash-001")
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the Gemini API (for proxies and tests)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Temperature for generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub profile: ExtractorProfile,
    #[serde(default)]
    pub schema_version: SchemaVersion,
    /// Request timeout in seconds (fractions allowed) for both the page
    /// fetch and the model call. Unset or non-positive means no deadline.
    #[serde(default)]
    pub timeout: Option<f64>,
    /// User agent sent when fetching pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: default_temperature(),
            profile: ExtractorProfile::default(),
            schema_version: SchemaVersion::default(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

// Default value functions
fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl SummarizerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SUMMARIZER__ prefix
    /// 2. recipe-summarizer.toml file in current directory
    /// 3. Default values
    ///
    /// If no API key was found that way, `GEMINI_API_KEY` is used.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

/// Load configuration from `recipe-summarizer.toml` and the environment.
///
/// See [`SummarizerConfig::load`] for the priority order.
pub fn load_config() -> Result<SummarizerConfig, ConfigError> {
    let builder =
        Config::builder().add_source(File::with_name(CONFIG_FILE_NAME).required(false));
    load_from(builder)
}

fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<SummarizerConfig, ConfigError> {
    let settings = builder
        // Use double underscore for nested: RECIPE_SUMMARIZER__API_KEY
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: SummarizerConfig = settings.try_deserialize()?;
    if config.api_key.is_none() {
        config.api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty());
    }
    Ok(config)
}
