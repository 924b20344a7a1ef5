use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; RecipeSummarizer/0.1; +https://github.com/recipe-summarizer)";

/// Plain HTTP GET fetcher for recipe pages
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// `timeout` of `None` leaves the client without a request deadline
    pub fn new(timeout: Option<Duration>, user_agent: &str) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder().user_agent(user_agent.to_string());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch the body of `url`. Non-success statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}
