use thiserror::Error;

/// Message shown to the end user for any failure in the pipeline
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to summarize the recipe from the provided URL";

/// Errors that can occur while summarizing a recipe
#[derive(Error, Debug)]
pub enum SummarizeError {
    /// The page could not be fetched or reduced to any text
    #[error("Could not fetch recipe content from {url}")]
    FetchFailed { url: String },

    /// No API key was configured for the model provider
    #[error("Missing Gemini API key")]
    MissingCredential,

    /// The model answered without a text payload
    #[error("The model returned no response")]
    NoResponse,

    /// The model answered with malformed or non-conforming JSON.
    /// `detail` holds the parser/validator message for diagnostics.
    #[error("The model response did not match the recipe schema")]
    SchemaValidationFailed { detail: String },

    /// Any other failure of the model call
    #[error("Model request failed: {0}")]
    UpstreamError(String),

    /// Caller supplied an unusable input (empty URL or text)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl SummarizeError {
    pub(crate) fn schema(detail: impl Into<String>) -> Self {
        SummarizeError::SchemaValidationFailed {
            detail: detail.into(),
        }
    }

    /// The single message an end user gets to see for this error
    pub fn user_message(&self) -> &'static str {
        match self {
            SummarizeError::InvalidInput(_) => "Please provide a valid URL",
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

impl From<reqwest::Error> for SummarizeError {
    fn from(err: reqwest::Error) -> Self {
        SummarizeError::UpstreamError(err.to_string())
    }
}
