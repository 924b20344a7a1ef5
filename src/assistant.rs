use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::extractor::ASSISTANT_PROMPT;
use crate::providers::{GeminiProvider, GenerationRequest, GenerativeModel};
use log::info;

/// Answer returned when the model sends back no text
pub const NO_RESPONSE_TEXT: &str = "No response";

/// Direct single-question calls to the model, answered in plain text
pub struct Assistant {
    model: Box<dyn GenerativeModel>,
    temperature: f32,
}

impl Assistant {
    pub fn new(model: Box<dyn GenerativeModel>, temperature: f32) -> Self {
        Self { model, temperature }
    }

    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        let provider = GeminiProvider::from_config(config)?;
        Ok(Self::new(Box::new(provider), config.temperature))
    }

    pub async fn ask(&self, prompt: &str) -> Result<String, SummarizeError> {
        if prompt.trim().is_empty() {
            return Err(SummarizeError::InvalidInput(
                "Question cannot be empty".to_string(),
            ));
        }

        info!("Asking {} a direct question", self.model.provider_name());
        let response = self
            .model
            .generate(&GenerationRequest {
                content: prompt.to_string(),
                system_instruction: ASSISTANT_PROMPT.to_string(),
                response_schema: None,
                response_mime_type: None,
                temperature: self.temperature,
            })
            .await?;

        Ok(response
            .text
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string()))
    }
}
