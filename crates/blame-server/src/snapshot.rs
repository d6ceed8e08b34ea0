use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::model::HeadlineRecord;

/// Static export of suitable headlines for hosting without the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub count: usize,
    pub headlines: Vec<HeadlineRecord>,
}

pub fn build_snapshot(records: impl IntoIterator<Item = HeadlineRecord>, now: DateTime<Utc>) -> Snapshot {
    let headlines: Vec<HeadlineRecord> = records.into_iter().filter(|r| r.suitable).collect();
    Snapshot {
        generated_at: now,
        count: headlines.len(),
        headlines,
    }
}

/// Write the snapshot as pretty JSON, creating parent directories as needed.
pub fn write_snapshot(snapshot: &Snapshot, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), count = snapshot.count, "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use news_feed::Article;

    use super::*;

    fn record(title: &str, suitable: bool) -> HeadlineRecord {
        HeadlineRecord {
            original: Article {
                title: title.to_string(),
                summary: String::new(),
                description: String::new(),
                link: None,
                source: "Test".to_string(),
                category: "world".to_string(),
                published_at: None,
            },
            transformed: format!("Your mother: {title}"),
            funny_summary: String::new(),
            suitable,
        }
    }

    #[test]
    fn test_only_suitable_records_are_kept() {
        let snapshot = build_snapshot(
            vec![record("Rain", true), record("Tragedy", false), record("Sun", true)],
            Utc::now(),
        );
        assert_eq!(snapshot.count, 2);
        let titles: Vec<_> = snapshot.headlines.iter().map(|r| r.original.title.as_str()).collect();
        assert_eq!(titles, ["Rain", "Sun"]);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("public").join("headlines.json");
        let snapshot = build_snapshot(vec![record("Rain", true)], Utc::now());

        write_snapshot(&snapshot, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["count"], 1);
        assert!(json["generatedAt"].is_string());
        assert_eq!(json["headlines"][0]["transformed"], "Your mother: Rain");
        assert_eq!(json["headlines"][0]["funnySummary"], "");

        let back: Snapshot = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, snapshot);
    }
}
