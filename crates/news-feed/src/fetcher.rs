use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use futures::future::join_all;
use rand::seq::IndexedRandom;
use rand::Rng;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::FetcherConfig;
use crate::error::FeedError;
use crate::model::{default_feeds, normalize_article, sample_articles, Article, FeedSource};
use crate::parser::parse_feed;

#[derive(Clone)]
pub struct NewsFetcher {
    config: FetcherConfig,
    feeds: Vec<FeedSource>,
    http: reqwest::Client,
}

impl NewsFetcher {
    pub fn new(config: FetcherConfig) -> Result<Self, FeedError> {
        Self::with_feeds(config, default_feeds())
    }

    pub fn with_feeds(config: FetcherConfig, feeds: Vec<FeedSource>) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            config,
            feeds,
            http,
        })
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    pub fn feeds(&self) -> &[FeedSource] {
        &self.feeds
    }

    /// Fetch and normalize one feed. Failures are logged and yield no articles.
    pub async fn fetch_from_feed(&self, feed: &FeedSource) -> Vec<Article> {
        match self.try_fetch_feed(feed).await {
            Ok(articles) => {
                debug!(feed = %feed.name, count = articles.len(), "fetched feed");
                articles
            }
            Err(e) => {
                warn!(feed = %feed.name, error = %e, "failed to fetch feed");
                Vec::new()
            }
        }
    }

    async fn try_fetch_feed(&self, feed: &FeedSource) -> Result<Vec<Article>, FeedError> {
        let body = self
            .request_with_retry(|| async {
                let resp = self
                    .http
                    .get(&feed.url)
                    .timeout(self.config.timeout)
                    .send()
                    .await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(FeedError::Status(status));
                }
                Ok(resp.text().await?)
            })
            .await?;

        let items = parse_feed(&body)?;
        Ok(items
            .into_iter()
            .filter_map(|item| normalize_article(item, feed))
            .collect())
    }

    /// All feeds concurrently, deduplicated and capped at `max_articles`.
    ///
    /// Falls back to the built-in sample stories when nothing came back.
    pub async fn fetch_all(&self) -> Vec<Article> {
        let results = join_all(self.feeds.iter().map(|feed| self.fetch_from_feed(feed))).await;
        let articles = self.dedupe(results.into_iter().flatten());

        if articles.is_empty() {
            warn!("no feed headlines fetched, falling back to sample data");
            return sample_articles(Utc::now());
        }
        info!(count = articles.len(), "fetched headlines");
        articles
    }

    /// Articles from feeds in `category`. An empty category means every feed.
    /// There is no sample fallback here.
    pub async fn fetch_by_category(&self, category: &str) -> Vec<Article> {
        let wanted = category.to_lowercase();
        let feeds = self
            .feeds
            .iter()
            .filter(|feed| wanted.is_empty() || feed.category.to_lowercase() == wanted);
        let results = join_all(feeds.map(|feed| self.fetch_from_feed(feed))).await;

        self.dedupe(
            results
                .into_iter()
                .flatten()
                .filter(|a| a.category.to_lowercase().contains(&wanted)),
        )
    }

    pub async fn random_headline(&self) -> Option<Article> {
        let articles = self.fetch_all().await;
        articles.choose(&mut rand::rng()).cloned()
    }

    fn dedupe(&self, articles: impl IntoIterator<Item = Article>) -> Vec<Article> {
        let mut seen = HashSet::new();
        articles
            .into_iter()
            .filter(|a| !a.title.is_empty() && seen.insert(a.dedupe_key()))
            .take(self.config.max_articles)
            .collect()
    }

    async fn request_with_retry<T, Fut, F>(&self, mut f: F) -> Result<T, FeedError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, FeedError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    if attempt > self.config.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = backoff_delay(
                        self.config.initial_backoff,
                        self.config.max_backoff,
                        attempt - 1,
                    );
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "feed request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

fn should_retry(err: &FeedError) -> bool {
    match err {
        FeedError::Request(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
        FeedError::Status(status) => {
            *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
        }
        FeedError::Xml(_) => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    let jitter_cap = std::cmp::max(1, capped_ms / 4);
    let jitter_ms = rand::rng().random_range(0..=jitter_cap);
    Duration::from_millis(capped_ms.saturating_add(jitter_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_feeds() {
        let config = FetcherConfig {
            max_articles: 7,
            ..FetcherConfig::default()
        };
        let fetcher = NewsFetcher::new(config).unwrap();

        assert_eq!(fetcher.config().max_articles, 7);
        let names: Vec<&str> = fetcher.feeds().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "BBC News");
        assert_eq!(fetcher.feeds(), default_feeds().as_slice());
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let initial = Duration::from_millis(100);
        let max = Duration::from_millis(1_000);

        let first = backoff_delay(initial, max, 0).as_millis();
        assert!((100..=125).contains(&first), "got {first}");

        let third = backoff_delay(initial, max, 2).as_millis();
        assert!((400..=500).contains(&third), "got {third}");

        let capped = backoff_delay(initial, max, 40).as_millis();
        assert!((1_000..=1_250).contains(&capped), "got {capped}");
    }

    #[test]
    fn test_retry_policy_for_status() {
        assert!(should_retry(&FeedError::Status(StatusCode::SERVICE_UNAVAILABLE)));
        assert!(should_retry(&FeedError::Status(StatusCode::TOO_MANY_REQUESTS)));
        assert!(!should_retry(&FeedError::Status(StatusCode::NOT_FOUND)));
    }

    #[test]
    fn test_dedupe_on_title_and_source() {
        let config = FetcherConfig {
            max_articles: 2,
            ..FetcherConfig::default()
        };
        let fetcher = NewsFetcher::with_feeds(config, Vec::new()).unwrap();
        let mut articles = sample_articles(Utc::now());
        let mut shouting = articles[0].clone();
        shouting.title = shouting.title.to_uppercase();
        articles.insert(1, shouting);

        let deduped = fetcher.dedupe(articles.clone());
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, articles[0].title);
        assert_eq!(deduped[1].title, articles[2].title);
    }
}
