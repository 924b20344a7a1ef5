use crate::config::SummarizerConfig;
use crate::error::SummarizeError;
use crate::providers::{GenerationRequest, GenerationResponse, GenerativeModel};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-001";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiInstruction<'a>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiInstruction<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, if it carries any
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        if let Some(reason) = &candidate.finish_reason {
            debug!("Gemini finish reason: {}", reason);
        }
        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Google Gemini `generateContent` client
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a provider with an explicit credential.
    ///
    /// A missing or blank key is rejected here, before any request is made.
    pub fn new(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, SummarizeError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(SummarizeError::MissingCredential)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            SummarizeError::UpstreamError(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(GeminiProvider {
            client,
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a Gemini provider from configuration
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, SummarizeError> {
        Self::new(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
            config.timeout_duration(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, SummarizeError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: &request.content,
                }],
            }],
            system_instruction: GeminiInstruction {
                parts: vec![GeminiPart {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                response_mime_type: request.response_mime_type.as_deref(),
                response_schema: request.response_schema.as_ref(),
            },
        };

        debug!("Sending Gemini request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;
        debug!("{}", response_body);

        if !status.is_success() {
            return Err(SummarizeError::UpstreamError(match status.as_u16() {
                401 | 403 => format!("Gemini rejected the API key ({})", status),
                429 => "Gemini rate limit exceeded".to_string(),
                _ => format!("Gemini API error ({}): {}", status, response_body),
            }));
        }

        let parsed: GeminiResponse = serde_json::from_str(&response_body).map_err(|e| {
            SummarizeError::UpstreamError(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(GenerationResponse {
            text: parsed.into_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest {
            content: "Cake\nMix flour.".to_string(),
            system_instruction: "Summarize the recipe.".to_string(),
            response_schema: Some(json!({"type": "OBJECT"})),
            response_mime_type: Some("application/json".to_string()),
            temperature: 0.4,
        }
    }

    fn provider(base_url: String) -> GeminiProvider {
        GeminiProvider::new(
            Some("test-key".to_string()),
            "gemini-test",
            base_url,
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[test]
    fn test_provider_name() {
        let provider = provider(DEFAULT_GEMINI_BASE_URL.to_string());
        assert_eq!(provider.provider_name(), "google");
        assert_eq!(provider.model(), "gemini-test");
    }

    #[test]
    fn test_missing_credential() {
        let result = GeminiProvider::new(None, DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_BASE_URL, None);
        assert!(matches!(result, Err(SummarizeError::MissingCredential)));

        let result = GeminiProvider::new(
            Some("   ".to_string()),
            DEFAULT_GEMINI_MODEL,
            DEFAULT_GEMINI_BASE_URL,
            None,
        );
        assert!(matches!(result, Err(SummarizeError::MissingCredential)));
    }

    #[tokio::test]
    async fn test_generate_sends_schema_and_reads_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"role": "user", "parts": [{"text": "Cake\nMix flour."}]}],
                "systemInstruction": {"parts": [{"text": "Summarize the recipe."}]},
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"parts": [{"text": "{\"title\":"}, {"text": "\"Cake\"}"}], "role": "model"},
                        "finishReason": "STOP"
                    }]
                }"#,
            )
            .create_async()
            .await;

        let response = provider(server.url()).generate(&request()).await.unwrap();
        assert_eq!(response.text.as_deref(), Some(r#"{"title":"Cake"}"#));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_without_schema_omits_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .match_body(Matcher::Json(json!({
                "contents": [{"role": "user", "parts": [{"text": "cake"}]}],
                "systemInstruction": {"parts": [{"text": "plain"}]},
                "generationConfig": {"temperature": 0.4}
            })))
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "<h1>Cake</h1>"}]}}]}"#)
            .create_async()
            .await;

        let mut prose = request();
        prose.response_schema = None;
        prose.response_mime_type = None;
        prose.system_instruction = "plain".to_string();
        prose.content = "cake".to_string();

        let response = provider(server.url()).generate(&prose).await.unwrap();
        assert_eq!(response.text.as_deref(), Some("<h1>Cake</h1>"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_no_candidates_is_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_body(r#"{"candidates": [], "promptFeedback": {"blockReason": "OTHER"}}"#)
            .create_async()
            .await;

        let response = provider(server.url()).generate(&request()).await.unwrap();
        assert_eq!(response, GenerationResponse::default());
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(500)
            .with_body(r#"{"error": {"message": "internal"}}"#)
            .create_async()
            .await;

        let result = provider(server.url()).generate(&request()).await;
        match result {
            Err(SummarizeError::UpstreamError(message)) => assert!(message.contains("500")),
            other => panic!("Expected UpstreamError, got {:?}", other),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_rejected_key() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(403)
            .with_body(r#"{"error": {"message": "API key not valid"}}"#)
            .create_async()
            .await;

        let result = provider(server.url()).generate(&request()).await;
        assert!(matches!(result, Err(SummarizeError::UpstreamError(_))));
    }

    #[tokio::test]
    async fn test_generate_unparsable_envelope() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let result = provider(server.url()).generate(&request()).await;
        assert!(matches!(result, Err(SummarizeError::UpstreamError(_))));
    }
}
