use blame_core::Pipeline;
use news_feed::Article;
use serde::{Deserialize, Serialize};

/// A fetched article together with its rewritten headline and summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineRecord {
    pub original: Article,
    pub transformed: String,
    pub funny_summary: String,
    pub suitable: bool,
}

impl HeadlineRecord {
    pub fn from_article(article: Article, pipeline: &Pipeline) -> Self {
        let result = pipeline.blame(&article.title, &article.summary);
        Self {
            original: article,
            transformed: result.transformed,
            funny_summary: result.funny_summary,
            suitable: result.suitable,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HeadlinesQuery {
    pub limit: Option<String>,
    pub suitable: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeadlinesResponse {
    pub success: bool,
    pub count: usize,
    pub headlines: Vec<HeadlineRecord>,
}

#[derive(Debug, Serialize)]
pub struct RandomResponse {
    pub success: bool,
    pub headline: HeadlineRecord,
}

#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    pub headline: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResponse {
    pub success: bool,
    pub original: String,
    pub transformed: String,
    pub funny_summary: String,
    pub suitable: bool,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: &'static str,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
