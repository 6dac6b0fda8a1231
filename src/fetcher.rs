use std::time::Duration;

use feed_rs::model::Entry;
use feed_rs::parser;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{info, warn};

use crate::article::{self, NormalizedArticle};
use crate::config::{ArticlesConfig, ThumbnailSource};
use crate::extract;

/// Top-level feed failures. These are the only errors that reach the
/// response boundary; per-item enrichment problems never do.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(StatusCode),
    #[error("feed could not be parsed: {0}")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// Fetches the configured feed and turns it into a bounded, ordered list of
/// [`NormalizedArticle`]s. Holds no mutable state, so one instance is shared
/// across requests.
pub struct Fetcher {
    client: Client,
    config: ArticlesConfig,
}

impl Fetcher {
    pub fn new(config: ArticlesConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; BSA-Website/1.0)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Fetch the feed and normalize its first `max_articles` entries, in
    /// feed order. Fails as a unit when the feed itself cannot be fetched
    /// or parsed; individual thumbnail lookups degrade to no thumbnail.
    pub async fn fetch_articles(&self) -> Result<Vec<NormalizedArticle>, FetchError> {
        info!("Fetching feed: {}", self.config.feed_url);

        let response = self.client.get(&self.config.feed_url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let bytes = response.bytes().await?;
        let parsed = parser::parse(&bytes[..])?;

        let entries: Vec<Entry> = parsed
            .entries
            .into_iter()
            .take(self.config.max_articles)
            .collect();

        let mut articles: Vec<NormalizedArticle> = entries
            .iter()
            .map(|entry| article::normalize_entry(entry, &self.config.blog_url))
            .collect();

        match self.config.thumbnail_source {
            ThumbnailSource::EmbeddedContent => {
                for (article, entry) in articles.iter_mut().zip(&entries) {
                    article.thumbnail =
                        article::embedded_thumbnail(entry, &self.config.trusted_image_hosts);
                }
            }
            ThumbnailSource::ArticlePage => {
                // Page fetches are independent; fan out concurrently and
                // reassemble in feed order (join_all preserves input order).
                let lookups = entries.iter().map(|entry| {
                    let page_url = entry
                        .links
                        .first()
                        .map(|l| l.href.clone())
                        .filter(|href| !href.is_empty());
                    async move {
                        match page_url {
                            Some(url) => self.page_thumbnail(&url).await,
                            None => None,
                        }
                    }
                });
                let thumbnails = join_all(lookups).await;
                for (article, thumbnail) in articles.iter_mut().zip(thumbnails) {
                    article.thumbnail = thumbnail;
                }
            }
        }

        info!("Normalized {} articles", articles.len());
        Ok(articles)
    }

    /// Social-preview image of one linked article page. Any failure is this
    /// item's problem only: log it and move on without a thumbnail.
    async fn page_thumbnail(&self, url: &str) -> Option<String> {
        match self.fetch_page(url).await {
            Ok(html) => extract::extract_meta_image(&html),
            Err(e) => {
                warn!("Thumbnail lookup failed for {}: {}", url, e);
                None
            }
        }
    }

    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.text().await?)
    }
}
