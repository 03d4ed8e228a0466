use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{config::Config, errors::AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page body. Non-2xx statuses are returned, not raised;
    /// only transport failures are errors.
    async fn fetch(&self, url: &str) -> AppResult<FetchedPage>;
}

pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.url_fetch_user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> AppResult<FetchedPage> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = if response.status().is_success() {
            response.text().await?
        } else {
            // The status alone is reported on failure; a partial body is fine.
            response.text().await.unwrap_or_default()
        };

        log::debug!("Fetched {} with status {} ({} bytes)", url, status, body.len());

        Ok(FetchedPage { status, body })
    }
}
