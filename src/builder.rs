use std::time::Duration;

use crate::{
    config::SummarizerConfig,
    extractor::{ExtractorProfile, RecipeExtractor, SchemaVersion, Summary},
    pipeline::{summarize_text, summarize_url},
    reducer::ContentReducer,
    SummarizeError,
};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch and reduce the page at a URL
    Url(String),
    /// Use text (or HTML) that is already at hand
    Text(String),
}

/// Builder for configuring and running one summarization
#[derive(Debug, Default)]
pub struct RecipeSummarizerBuilder {
    config: SummarizerConfig,
    source: Option<InputSource>,
}

impl RecipeSummarizerBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::RecipeSummarizer;
    ///
    /// let builder = RecipeSummarizer::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to recipe text
    ///
    /// The text is reduced like a fetched page, so pasted HTML works too.
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::RecipeSummarizer;
    ///
    /// let builder = RecipeSummarizer::builder()
    ///     .text("Pancakes\n1 cup flour\n1 egg\nWhisk and fry.");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the Gemini API key
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::RecipeSummarizer;
    ///
    /// let builder = RecipeSummarizer::builder()
    ///     .url("https://example.com/recipe")
    ///     .api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Point the provider at a different API root (proxies, tests)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Choose between structured recipes and free-form HTML
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::{ExtractorProfile, RecipeSummarizer};
    ///
    /// let builder = RecipeSummarizer::builder()
    ///     .url("https://example.com/recipe")
    ///     .profile(ExtractorProfile::Prose);
    /// ```
    pub fn profile(mut self, profile: ExtractorProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Choose the ingredient shape requested from the model
    pub fn schema_version(mut self, version: SchemaVersion) -> Self {
        self.config.schema_version = version;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// Set a timeout for the page fetch and the model call
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::RecipeSummarizer;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSummarizer::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.timeout = Some(duration.as_secs_f64());
        self
    }

    /// Build and execute the summarization
    ///
    /// # Errors
    /// Returns `SummarizeError` if:
    /// - No input source was specified, or it is empty
    /// - No API key is available (checked before any request is made)
    /// - The page cannot be fetched
    /// - The model call or validation fails
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_summarizer::RecipeSummarizer;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let summary = RecipeSummarizer::builder()
    ///     .url("https://example.com/recipe")
    ///     .api_key("your-api-key")
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<Summary, SummarizeError> {
        let source = self.source.ok_or_else(|| {
            SummarizeError::InvalidInput(
                "No input source specified. Use .url() or .text()".to_string(),
            )
        })?;

        // Fails on a missing key before the page is fetched
        let extractor = RecipeExtractor::from_config(&self.config)?;

        match source {
            InputSource::Url(url) => {
                let reducer =
                    ContentReducer::new(self.config.timeout_duration(), &self.config.user_agent)?;
                summarize_url(&url, &reducer, &extractor).await
            }
            InputSource::Text(text) => summarize_text(&text, &extractor).await,
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeSummarizer;

impl RecipeSummarizer {
    /// Creates a builder starting from default settings (no API key)
    ///
    /// # Example
    /// ```
    /// use recipe_summarizer::RecipeSummarizer;
    ///
    /// let builder = RecipeSummarizer::builder();
    /// ```
    pub fn builder() -> RecipeSummarizerBuilder {
        RecipeSummarizerBuilder::default()
    }

    /// Creates a builder starting from loaded configuration
    pub fn with_config(config: SummarizerConfig) -> RecipeSummarizerBuilder {
        RecipeSummarizerBuilder {
            config,
            source: None,
        }
    }
}
