pub mod config;
pub mod error;
pub mod fetcher;
pub mod html;
pub mod model;
pub mod parser;

pub use config::FetcherConfig;
pub use error::FeedError;
pub use fetcher::NewsFetcher;
pub use model::{default_feeds, normalize_article, sample_articles, Article, FeedSource, RawItem};
pub use html::strip_html;
pub use parser::parse_feed;
