pub mod assistant;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractor;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod reducer;
pub mod render;

// Re-export commonly used types
pub use assistant::Assistant;
pub use builder::{InputSource, RecipeSummarizer, RecipeSummarizerBuilder};
pub use config::SummarizerConfig;
pub use error::SummarizeError;
pub use extractor::{ExtractorProfile, RecipeExtractor, SchemaVersion, Summary};
pub use model::{Ingredient, Recipe, Step};
pub use reducer::{reduce_html, ContentReducer, ReducedText};

/// Fetch `url` and summarize it with settings from `config`.
///
/// # Example
/// ```no_run
/// use recipe_summarizer::{summarize_url_with_config, SummarizerConfig};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SummarizerConfig::load()?;
/// let summary = summarize_url_with_config("https://example.com/recipe", &config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn summarize_url_with_config(
    url: &str,
    config: &SummarizerConfig,
) -> Result<Summary, SummarizeError> {
    RecipeSummarizer::with_config(config.clone())
        .url(url)
        .build()
        .await
}

/// Fetch and reduce `url` without calling the model.
///
/// A page that cannot be fetched or reduces to nothing is `FetchFailed`.
pub async fn reduce_url(
    url: &str,
    config: &SummarizerConfig,
) -> Result<ReducedText, SummarizeError> {
    ContentReducer::new(config.timeout_duration(), &config.user_agent)?
        .reduce(url)
        .await
        .ok_or_else(|| SummarizeError::FetchFailed {
            url: url.to_string(),
        })
}
