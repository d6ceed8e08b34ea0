/// Failures while fetching or parsing a single feed.
///
/// The fetcher never surfaces these to its callers: a failing feed is logged
/// and contributes no articles. Services that wrap the fetcher convert into
/// their own error type via `#[from]`.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid feed XML: {0}")]
    Xml(#[from] quick_xml::Error),
}
