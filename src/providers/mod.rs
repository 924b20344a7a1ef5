mod google;

pub use google::{GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

use crate::error::SummarizeError;
use async_trait::async_trait;
use serde_json::Value;

/// One call to a generative model
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Primary content, sent as the user turn
    pub content: String,
    pub system_instruction: String,
    /// Output schema for structured-output mode
    pub response_schema: Option<Value>,
    /// `application/json` in structured-output mode
    pub response_mime_type: Option<String>,
    pub temperature: f32,
}

/// What came back from the model; `text` is `None` when there was no payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub text: Option<String>,
}

impl GenerationResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// Seam between the extractor and a hosted model
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Get the provider name (e.g., "google")
    fn provider_name(&self) -> &str;

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, SummarizeError>;
}
