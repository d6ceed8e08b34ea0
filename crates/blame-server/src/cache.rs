//! In-process headline cache.
//!
//! Holds the transformed records from the most recent successful fetch. A
//! failed refresh keeps serving the previous records and leaves the fetch
//! timestamp alone, so the next request tries again.
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use blame_core::Pipeline;
use news_feed::{Article, NewsFetcher};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::AppError;
use crate::model::HeadlineRecord;

pub type ArticleFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Article>, AppError>> + Send + 'a>>;

/// Anything that can hand the cache a fresh batch of articles.
///
/// `NewsFetcher` never fails (broken feeds are skipped and an empty batch
/// becomes the sample headlines); the error path serves other sources.
pub trait ArticleSource: Send + Sync {
    fn fetch_articles(&self) -> ArticleFuture<'_>;
}

impl ArticleSource for NewsFetcher {
    fn fetch_articles(&self) -> ArticleFuture<'_> {
        Box::pin(async move { Ok(self.fetch_all().await) })
    }
}

#[derive(Default)]
struct CacheState {
    records: Arc<Vec<HeadlineRecord>>,
    last_fetch: Option<Instant>,
}

pub struct HeadlineCache {
    source: Arc<dyn ArticleSource>,
    pipeline: Arc<Pipeline>,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl HeadlineCache {
    pub fn new(source: Arc<dyn ArticleSource>, pipeline: Arc<Pipeline>, ttl: Duration) -> Self {
        Self {
            source,
            pipeline,
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Current records, refetching first when the cache is empty or stale.
    pub async fn get_or_refresh(&self, now: Instant) -> Arc<Vec<HeadlineRecord>> {
        let mut state = self.state.lock().await;
        let stale = match state.last_fetch {
            None => true,
            Some(at) => now.saturating_duration_since(at) >= self.ttl,
        };
        if stale {
            self.refresh_locked(&mut state, now).await;
        }
        Arc::clone(&state.records)
    }

    /// Force a refetch regardless of age. Returns the number of records now held.
    pub async fn refresh(&self, now: Instant) -> usize {
        let mut state = self.state.lock().await;
        self.refresh_locked(&mut state, now).await;
        state.records.len()
    }

    async fn refresh_locked(&self, state: &mut CacheState, now: Instant) {
        match self.source.fetch_articles().await {
            Ok(articles) => {
                let records: Vec<HeadlineRecord> = articles
                    .into_iter()
                    .map(|article| HeadlineRecord::from_article(article, &self.pipeline))
                    .collect();
                info!(count = records.len(), "headline cache refreshed");
                state.records = Arc::new(records);
                state.last_fetch = Some(now);
            }
            Err(e) => {
                warn!(
                    error = %e,
                    cached = state.records.len(),
                    "headline refresh failed, keeping previous records"
                );
            }
        }
    }
}
