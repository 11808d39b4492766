//! Record dataset loading.
//!
//! Records come from a JSON array on disk, one object per record. The
//! engine takes the whole list on every call; nothing is indexed.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use visibility_search_core::models::Record;

pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;
    let records: Vec<Record> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse records file: {}", path.display()))?;
    info!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use visibility_search_core::models::{RecordKind, Sentiment};

    #[test]
    fn loads_records_with_extras() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("records.json");
        std::fs::write(
            &path,
            r#"[
  {"id": "m1", "kind": "mention", "title": "Acme on Reddit", "body": "love it",
   "platform": "reddit", "sentiment": "positive", "date": "2024-05-01T10:00:00Z",
   "score": 80, "extras": {"author": "u/someone"}},
  {"kind": "report", "title": "Monthly report"}
]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sentiment, Some(Sentiment::Positive));
        assert_eq!(records[0].score, Some(80.0));
        assert!(records[0].extras.as_ref().unwrap().contains_key("author"));
        assert_eq!(records[1].kind, RecordKind::Report);
    }

    #[test]
    fn malformed_file_reports_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("records.json");
        std::fs::write(&path, "[{\"kind\": \"tweet\"}]").unwrap();
        let err = load_records(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("records.json"));
    }
}
