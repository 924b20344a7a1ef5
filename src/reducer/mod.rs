//! Page download and HTML-to-text reduction.
//!
//! The reducer never fails past its own boundary: any fetch or parse problem
//! is logged and reported as "no content" (`None`).

mod fetcher;
mod text;

pub use fetcher::{PageFetcher, DEFAULT_USER_AGENT};
pub use text::{escape_stray_brackets, remove_excluded, structured_text, EXCLUDED_TAGS};

use crate::error::SummarizeError;
use config::ConfigError;
use log::{debug, info, warn};
use scraper::Html;
use std::fmt;
use std::time::Duration;

const DOCTYPE_MARKER: &str = "<!DOCTYPE html>";

/// Upper bound on re-parse passes after the first
const MAX_REPARSE_PASSES: usize = 4;

/// Plain text left over from a page after reduction.
///
/// Only [`reduce_html`] builds values of this type, so it never carries
/// excluded markup or a doctype marker and is always trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedText(String);

impl ReducedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ReducedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ReducedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduce an HTML document to structured plain text.
///
/// The first pass drops the excluded subtrees and flattens the tree into
/// lines. The flattened text is then parsed and flattened again until it no
/// longer changes; lines survive that, while markup that only appeared once
/// entities were decoded is dropped. Stray `<` brackets are escaped before
/// every parse so they stay text.
pub fn reduce_html(html: &str) -> ReducedText {
    let mut document = Html::parse_document(&escape_stray_brackets(html));
    remove_excluded(&mut document);
    let mut text = structured_text(&document);

    for _ in 0..MAX_REPARSE_PASSES {
        let reparsed = Html::parse_document(&escape_stray_brackets(&text));
        let next = structured_text(&reparsed);
        if next == text {
            break;
        }
        text = next;
    }

    ReducedText(text.replace(DOCTYPE_MARKER, "").trim().to_string())
}

/// Downloads a page and reduces it to [`ReducedText`]
pub struct ContentReducer {
    fetcher: PageFetcher,
}

impl ContentReducer {
    /// Fails when the HTTP client cannot be built from these settings, e.g.
    /// a user agent that is not a valid header value.
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, SummarizeError> {
        let fetcher = PageFetcher::new(timeout, user_agent).map_err(|e| {
            SummarizeError::Config(ConfigError::Message(format!(
                "invalid HTTP client settings: {}",
                e
            )))
        })?;
        Ok(Self { fetcher })
    }

    /// Fetch `url` and reduce it.
    ///
    /// Returns `None` when the page cannot be fetched or reduces to nothing;
    /// callers must not hand that to the extractor.
    pub async fn reduce(&self, url: &str) -> Option<ReducedText> {
        info!("Fetching recipe content from {}", url);

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Error fetching recipe content from {}: {}", url, e);
                return None;
            }
        };

        let reduced = reduce_html(&html);
        debug!(
            "Reduced {} bytes of HTML to {} bytes of text",
            html.len(),
            reduced.as_str().len()
        );

        if reduced.is_empty() {
            warn!("No text content left on {} after reduction", url);
            return None;
        }
        Some(reduced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_simple_page() {
        let html = "<html><head><script>x</script></head><body><h1>Cake</h1><p>Mix flour.</p></body></html>";
        let reduced = reduce_html(html);
        assert!(reduced.as_str().contains("Cake"));
        assert!(reduced.as_str().contains("Mix flour."));
        // Only the script body was "x"; the page text itself has one in "Mix"
        assert_eq!(reduced.as_str(), "Cake\nMix flour.");
    }

    #[test]
    fn test_excluded_subtrees_leave_no_trace() {
        let cases = [
            ("head", "<html><head><title>SITE-TITLE</title></head><body><p>Body</p></body></html>"),
            ("script", "<p>Body</p><script>var secret = 'SCRIPT-TEXT';</script>"),
            ("style", "<style>.x { content: 'STYLE-TEXT'; }</style><p>Body</p>"),
            ("img", r#"<p>Body</p><img src="a.jpg" alt="IMG-TEXT">"#),
            ("iframe", "<p>Body</p><iframe>IFRAME-TEXT</iframe>"),
            ("nav", "<nav><ul><li>NAV-TEXT</li></ul></nav><p>Body</p>"),
            ("button", "<p>Body</p><button><span>BUTTON-TEXT</span></button>"),
        ];

        for (tag, html) in cases {
            let reduced = reduce_html(html);
            assert_eq!(reduced.as_str(), "Body", "subtree of <{tag}> leaked");
        }
    }

    #[test]
    fn test_doctype_marker_stripped() {
        // Entity-escaped marker decodes to a literal doctype in the first pass
        let html = "<!DOCTYPE html><html><body><p>&lt;!DOCTYPE html&gt;</p><p>Soup</p></body></html>";
        let reduced = reduce_html(html);
        assert!(!reduced.as_str().contains("DOCTYPE"));
        assert!(reduced.as_str().contains("Soup"));
    }

    #[test]
    fn test_second_pass_drops_decoded_markup() {
        let html = "<p>&lt;script&gt;alert(1)&lt;/script&gt;Stir gently.</p>";
        let reduced = reduce_html(html);
        assert_eq!(reduced.as_str(), "Stir gently.");
    }

    #[test]
    fn test_escaped_bracket_keeps_following_lines() {
        let html = "<h1>Brownies</h1><p>Bake until the center is &lt;b barely set</p><p>Add 2 cups flour.</p><p>Cool 30 minutes.</p>";
        let reduced = reduce_html(html);
        assert_eq!(
            reduced.as_str(),
            "Brownies\nBake until the center is <b barely set\nAdd 2 cups flour.\nCool 30 minutes."
        );
        assert_eq!(reduce_html(reduced.as_str()), reduced);

        assert_eq!(
            reduce_html("<p>Simmer &lt;a few minutes</p>").as_str(),
            "Simmer <a few minutes"
        );
    }

    #[test]
    fn test_double_escaped_markup_is_stable() {
        let reduced = reduce_html("<p>Cook &amp;lt;b&amp;gt;gently</p>");
        assert_eq!(reduced.as_str(), "Cook gently");
        assert_eq!(reduce_html(reduced.as_str()), reduced);
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let html = r#"
            <!DOCTYPE html>
            <html>
            <head><title>Banana Bread</title><style>body {}</style></head>
            <body>
                <nav><a href="/">Home</a> | <a href="/recipes">Recipes</a></nav>
                <article>
                    <h1>Banana   Bread</h1>
                    <p>This is the best
                       banana bread.</p>
                    <ul><li>3 ripe bananas</li><li>2 cups flour</li></ul>
                    <ol><li>Mash the bananas.</li><li>Fold in <b>flour</b>.</li></ol>
                </article>
                <button>Print</button>
            </body>
            </html>
        "#;
        let once = reduce_html(html);
        let twice = reduce_html(once.as_str());
        assert_eq!(once, twice);
        assert_eq!(
            once.as_str(),
            "Banana Bread\nThis is the best banana bread.\n3 ripe bananas\n2 cups flour\nMash the bananas.\nFold in flour."
        );
    }

    #[test]
    fn test_reduce_empty_document() {
        assert!(reduce_html("").is_empty());
        assert!(reduce_html("<html><head><title>Only head</title></head></html>").is_empty());
    }

    #[tokio::test]
    async fn test_reducer_returns_none_on_connection_error() {
        let reducer =
            ContentReducer::new(Some(Duration::from_secs(2)), DEFAULT_USER_AGENT).unwrap();
        // Port 9 (discard) is not expected to serve HTTP
        assert!(reducer.reduce("http://127.0.0.1:9/recipe").await.is_none());
    }

    #[tokio::test]
    async fn test_reducer_returns_none_on_invalid_url() {
        let reducer = ContentReducer::new(None, DEFAULT_USER_AGENT).unwrap();
        assert!(reducer.reduce("not a url").await.is_none());
    }

    #[test]
    fn test_invalid_user_agent_is_config_error() {
        let result = ContentReducer::new(Some(Duration::from_millis(300)), "bad\nagent");
        assert!(matches!(result, Err(SummarizeError::Config(_))));
    }
}
