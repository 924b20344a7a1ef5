//! Turns reduced page text into a recipe through a generative model.

mod prompt;
mod schema;

pub use prompt::{build_structured_prompt, ASSISTANT_PROMPT, PROSE_PROMPT, STRUCTURED_PROMPT};
pub use schema::{parse_recipe, response_schema, validate, SchemaVersion};

use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::model::Recipe;
use crate::providers::{GeminiProvider, GenerationRequest, GenerativeModel};
use crate::reducer::ReducedText;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub const JSON_MIME_TYPE: &str = "application/json";
pub const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Output mode of the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractorProfile {
    /// Schema-constrained JSON, validated into a [`Recipe`]
    #[default]
    Structured,
    /// Unconstrained HTML body content
    Prose,
}

/// Result of one extraction
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Recipe(Recipe),
    Html(String),
}

impl Summary {
    pub fn into_recipe(self) -> Option<Recipe> {
        match self {
            Summary::Recipe(recipe) => Some(recipe),
            Summary::Html(_) => None,
        }
    }
}

pub struct RecipeExtractor {
    model: Box<dyn GenerativeModel>,
    profile: ExtractorProfile,
    schema_version: SchemaVersion,
    temperature: f32,
}

impl RecipeExtractor {
    /// Structured profile, plain-text ingredients, default temperature
    pub fn new(model: Box<dyn GenerativeModel>) -> Self {
        Self {
            model,
            profile: ExtractorProfile::default(),
            schema_version: SchemaVersion::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Build a Gemini-backed extractor; fails with `MissingCredential` when
    /// no API key is configured.
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let provider = GeminiProvider::from_config(config)?;
        Ok(Self::new(Box::new(provider))
            .with_profile(config.profile)
            .with_schema_version(config.schema_version)
            .with_temperature(config.temperature))
    }

    pub fn with_profile(mut self, profile: ExtractorProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_schema_version(mut self, version: SchemaVersion) -> Self {
        self.schema_version = version;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn profile(&self) -> ExtractorProfile {
        self.profile
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// The request this extractor sends for `text`
    pub fn build_request(&self, text: &ReducedText) -> GenerationRequest {
        match self.profile {
            ExtractorProfile::Structured => GenerationRequest {
                content: text.as_str().to_string(),
                system_instruction: build_structured_prompt(self.schema_version),
                response_schema: Some(response_schema(self.schema_version)),
                response_mime_type: Some(JSON_MIME_TYPE.to_string()),
                temperature: self.temperature,
            },
            ExtractorProfile::Prose => GenerationRequest {
                content: text.as_str().to_string(),
                system_instruction: PROSE_PROMPT.to_string(),
                response_schema: None,
                response_mime_type: None,
                temperature: self.temperature,
            },
        }
    }

    /// Send `text` to the model and validate what comes back.
    ///
    /// No partial recipe is ever returned: the result is either a fully
    /// validated [`Summary`] or a classified error.
    pub async fn extract(&self, text: &ReducedText) -> Result<Summary, SummarizeError> {
        if text.is_empty() {
            return Err(SummarizeError::InvalidInput(
                "Recipe text cannot be empty".to_string(),
            ));
        }

        info!(
            "Extracting recipe with {} ({:?} profile)",
            self.model.provider_name(),
            self.profile
        );

        let request = self.build_request(text);
        let response = self.model.generate(&request).await?;

        let payload = match response.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                warn!("{} returned no text payload", self.model.provider_name());
                return Err(SummarizeError::NoResponse);
            }
        };
        debug!("Model payload: {}", payload);

        match self.profile {
            ExtractorProfile::Structured => parse_recipe(&payload, self.schema_version)
                .map(Summary::Recipe)
                .inspect_err(|e| {
                    if let SummarizeError::SchemaValidationFailed { detail } = e {
                        warn!("Model response failed schema validation: {}", detail);
                    }
                }),
            ExtractorProfile::Prose => Ok(Summary::Html(payload)),
        }
    }
}
