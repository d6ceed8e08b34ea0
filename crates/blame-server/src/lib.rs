pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod rate_limit;
pub mod server;
pub mod snapshot;

pub use cache::{ArticleFuture, ArticleSource, HeadlineCache};
pub use config::Config;
pub use error::AppError;
pub use model::HeadlineRecord;
pub use rate_limit::RateLimiter;
pub use server::{router, AppState};
pub use snapshot::{build_snapshot, write_snapshot, Snapshot};

/// Install the stderr `tracing` subscriber shared by both binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
