use crate::error::SummarizeError;
use crate::extractor::{RecipeExtractor, Summary};
use crate::reducer::{reduce_html, ContentReducer};
use log::info;

/// Summarize the recipe at `url`
///
/// This pipeline:
/// 1. Fetches and reduces the page with the [`ContentReducer`]
/// 2. Stops with `FetchFailed` if nothing usable came back
/// 3. Hands the reduced text to the [`RecipeExtractor`]
///
/// # Arguments
/// * `url` - The URL to fetch; only checked for being non-empty
///
/// # Returns
/// * `Ok(Summary)` - The validated recipe, or HTML in the prose profile
/// * `Err(...)` - The first failure of either stage
pub async fn summarize_url(
    url: &str,
    reducer: &ContentReducer,
    extractor: &RecipeExtractor,
) -> Result<Summary, SummarizeError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SummarizeError::InvalidInput(
            "URL cannot be empty".to_string(),
        ));
    }

    let text = reducer
        .reduce(url)
        .await
        .ok_or_else(|| SummarizeError::FetchFailed {
            url: url.to_string(),
        })?;
    info!("Reduced {} to {} characters", url, text.as_str().len());

    extractor.extract(&text).await
}

/// Summarize recipe text (or HTML) that is already at hand.
///
/// The input goes through the same reduction as a fetched page, which leaves
/// plain text unchanged apart from whitespace.
pub async fn summarize_text(
    text: &str,
    extractor: &RecipeExtractor,
) -> Result<Summary, SummarizeError> {
    let reduced = reduce_html(text);
    if reduced.is_empty() {
        return Err(SummarizeError::InvalidInput(
            "Recipe text cannot be empty".to_string(),
        ));
    }
    extractor.extract(&reduced).await
}
