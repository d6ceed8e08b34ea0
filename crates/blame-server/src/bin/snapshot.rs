//! Fetch the current headlines once and write the static JSON snapshot.

use anyhow::Context;
use blame_core::Pipeline;
use blame_server::{build_snapshot, write_snapshot, ArticleSource, Config, HeadlineRecord};
use news_feed::{FetcherConfig, NewsFetcher};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    blame_server::init_tracing();

    let config = Config::from_env()?;
    let fetcher = NewsFetcher::new(FetcherConfig::from_env())?;
    let pipeline = Pipeline::default();

    let articles = fetcher.fetch_articles().await?;
    info!(count = articles.len(), "articles fetched");

    let records = articles
        .into_iter()
        .map(|article| HeadlineRecord::from_article(article, &pipeline));
    let snapshot = build_snapshot(records, chrono::Utc::now());

    write_snapshot(&snapshot, &config.snapshot_path).with_context(|| {
        format!("writing snapshot to {}", config.snapshot_path.display())
    })?;
    info!(
        count = snapshot.count,
        path = %config.snapshot_path.display(),
        "snapshot complete"
    );
    Ok(())
}
