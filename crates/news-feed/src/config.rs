use std::time::Duration;

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    pub max_articles: usize,
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_articles: 200,
            timeout: Duration::from_secs(10),
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_millis(2_000),
            user_agent: "blame-mom/news-feed".to_string(),
        }
    }
}

impl FetcherConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_articles = std::env::var("NEWS_MAX_ARTICLES")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_articles);

        let timeout = std::env::var("NEWS_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_retries = std::env::var("NEWS_FETCH_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_retries);

        let initial_backoff = std::env::var("NEWS_FETCH_RETRY_INITIAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.initial_backoff);

        let max_backoff = std::env::var("NEWS_FETCH_RETRY_MAX_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.max_backoff);

        Self {
            max_articles,
            timeout,
            max_retries,
            initial_backoff,
            max_backoff,
            ..defaults
        }
    }
}
