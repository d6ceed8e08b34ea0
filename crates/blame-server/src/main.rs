use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use blame_core::Pipeline;
use blame_server::{router, AppState, Config, HeadlineCache, RateLimiter};
use news_feed::{FetcherConfig, NewsFetcher};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    blame_server::init_tracing();

    info!("starting blame-mom server");

    let config = Config::from_env()?;
    let fetcher = Arc::new(NewsFetcher::new(FetcherConfig::from_env())?);
    info!(
        feeds = fetcher.feeds().len(),
        max_articles = fetcher.config().max_articles,
        timeout_ms = fetcher.config().timeout.as_millis(),
        max_retries = fetcher.config().max_retries,
        "news fetcher configured"
    );

    let pipeline = Arc::new(Pipeline::default());
    let cache = Arc::new(HeadlineCache::new(
        fetcher,
        Arc::clone(&pipeline),
        config.cache_ttl,
    ));
    let count = cache.refresh(Instant::now()).await;
    info!(count, "initial headlines loaded");

    let limiter = RateLimiter::new(config.rate_limit_max, config.rate_limit_window);
    let state = AppState::new(cache, limiter, pipeline);
    let app = router(state, &config.static_dir);

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, static_dir = %config.static_dir.display(), "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .inspect_err(|e| tracing::error!(error = %e, "server error"))?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
