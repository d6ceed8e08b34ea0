use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::html::strip_html;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
    pub category: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        }
    }
}

pub fn default_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new("BBC News", "https://feeds.bbci.co.uk/news/rss.xml", "world"),
        FeedSource::new(
            "BBC Science",
            "https://feeds.bbci.co.uk/news/science_and_environment/rss.xml",
            "science",
        ),
        FeedSource::new(
            "Reuters World",
            "https://www.reutersagency.com/feed/?taxonomy=best-topics&post_type=best",
            "world",
        ),
        FeedSource::new("NPR News", "https://feeds.npr.org/1001/rss.xml", "news"),
        FeedSource::new("AP Top Stories", "https://feeds.apnews.com/apf-topnews", "world"),
        FeedSource::new("AP International", "https://feeds.apnews.com/apf-intlnews", "world"),
    ]
}

/// A news item as handed to the rest of the system.
///
/// `description` mirrors `summary` for clients that read either field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub link: Option<String>,
    pub source: String,
    pub category: String,
    pub published_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Key used to drop duplicate stories across and within feeds.
    pub fn dedupe_key(&self) -> String {
        format!("{}|{}", self.title.to_lowercase(), self.source)
    }
}

/// Fields pulled out of one `<item>` or `<entry>`, still raw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub published: Option<String>,
}

/// Clean up a raw item. Items whose title is empty after stripping markup
/// are dropped.
pub fn normalize_article(item: RawItem, feed: &FeedSource) -> Option<Article> {
    let title = strip_html(item.title.as_deref().unwrap_or_default());
    if title.is_empty() {
        return None;
    }

    let summary = strip_html(
        item.summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(item.content.as_deref())
            .unwrap_or_default(),
    );
    let link = item
        .link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());
    let published_at = item.published.as_deref().and_then(parse_date);

    Some(Article {
        title,
        description: summary.clone(),
        summary,
        link,
        source: feed.name.clone(),
        category: feed.category.clone(),
        published_at,
    })
}

/// RSS uses RFC 2822 dates, Atom uses RFC 3339.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|d| d.with_timezone(&Utc))
        .ok()
}

/// Stand-in stories served when every feed comes back empty.
pub fn sample_articles(now: DateTime<Utc>) -> Vec<Article> {
    let samples = [
        (
            "Scientists warn of glitter crisis hovering over capital city",
            "Authorities say the glitter originated from an unknown party cannon deployed at dawn.",
            "https://example.com/glitter-cloud",
            "weird",
        ),
        (
            "Local pigeon blamed for traffic problem downtown",
            "Witnesses report the pigeon refused to move until drivers calmed down.",
            "https://example.com/pigeon-hero",
            "local",
        ),
        (
            "Economists warn of left sock shortage crisis",
            "Retailers recommend buying matched pairs while supplies last.",
            "https://example.com/sock-crisis",
            "economy",
        ),
    ];

    samples
        .into_iter()
        .map(|(title, summary, link, category)| Article {
            title: title.to_string(),
            summary: summary.to_string(),
            description: summary.to_string(),
            link: Some(link.to_string()),
            source: "Sample Wire".to_string(),
            category: category.to_string(),
            published_at: Some(now),
        })
        .collect()
}
