//! In-memory dataset built from an uploaded CSV file.
//!
//! A [`DatasetStore`] holds the records of the most recent successful upload.
//! Uploads replace the whole snapshot at once, so a search running next to an
//! upload sees either the previous records or the new ones, never a mix.
//! Concurrent uploads are last-writer-wins.

use std::collections::HashSet;
use std::str::Utf8Error;
use std::sync::Arc;

use csv::ReaderBuilder;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tokio::sync::RwLock;

/// One CSV data row, keyed by the header row. Field order follows the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// True when any value contains `needle`, ignoring case.
    /// `needle` must already be lower-cased.
    fn matches(&self, needle: &str) -> bool {
        self.values().any(|value| value.to_lowercase().contains(needle))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("file is not valid UTF-8: {0}")]
    Decode(#[from] Utf8Error),

    #[error("duplicate column {0:?} in header")]
    DuplicateHeader(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Decode `bytes` as UTF-8 and parse them as comma-delimited CSV with a
/// header row. Rows whose length differs from the header, and headers that
/// name a column twice, are rejected.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Record>, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    let text = text.trim_start_matches('\u{feff}');

    let mut rdr = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(ParseError::DuplicateHeader(duplicate.clone()));
    }

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let fields = headers
            .iter()
            .cloned()
            .zip(row.iter().map(|v| v.to_string()))
            .collect();
        records.push(Record::new(fields));
    }

    Ok(records)
}

/// Records with at least one value containing `query`, case-insensitively,
/// in dataset order.
pub fn search(records: &[Record], query: &str) -> Vec<Record> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| record.matches(&needle))
        .cloned()
        .collect()
}

#[derive(Clone, Default)]
pub struct DatasetStore {
    inner: Arc<RwLock<Arc<Vec<Record>>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a new dataset, dropping the previous one.
    pub async fn replace(&self, records: Vec<Record>) {
        let records = Arc::new(records);
        let mut guard = self.inner.write().await;
        *guard = records;
    }

    pub async fn snapshot(&self) -> Arc<Vec<Record>> {
        let guard = self.inner.read().await;
        Arc::clone(&*guard)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Vec<Record> {
        parse_csv(b"name,age\nAlice,30\nBob,40\n").unwrap()
    }

    #[test]
    fn test_parse_maps_header_to_fields() {
        let records = people();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some("Alice"));
        assert_eq!(records[0].get("age"), Some("30"));
        assert_eq!(records[1].get("name"), Some("Bob"));
    }

    #[test]
    fn test_parse_keeps_header_order_in_json() {
        let records = parse_csv(b"zeta,alpha\n1,2\n").unwrap();
        let json = serde_json::to_string(&records[0]).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn test_parse_quoted_fields() {
        let records = parse_csv(b"name,city\n\"Smith, Jane\",\"New York\"\n").unwrap();
        assert_eq!(records[0].get("name"), Some("Smith, Jane"));
        assert_eq!(records[0].get("city"), Some("New York"));
    }

    #[test]
    fn test_parse_strips_bom() {
        let mut bytes = vec![0xef, 0xbb, 0xbf];
        bytes.extend_from_slice(b"name\nAlice\n");
        let records = parse_csv(&bytes).unwrap();
        assert_eq!(records[0].get("name"), Some("Alice"));
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        assert!(parse_csv(b"name,age\n").unwrap().is_empty());
        assert!(parse_csv(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let err = parse_csv(&[0x6e, 0xff, 0xfe, 0x0a]).unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
    }

    #[test]
    fn test_parse_rejects_ragged_rows() {
        let err = parse_csv(b"name,age\nAlice,30\nBob\n").unwrap_err();
        assert!(matches!(err, ParseError::Csv(_)));
    }

    #[test]
    fn test_parse_rejects_duplicate_header() {
        let err = parse_csv(b"name,age,name\nAlice,30,Bob\n").unwrap_err();
        assert!(matches!(err, ParseError::DuplicateHeader(ref column) if column == "name"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = people();
        for query in ["alice", "ALICE", "lic"] {
            let hits = search(&records, query);
            assert_eq!(hits.len(), 1, "query {query}");
            assert_eq!(hits[0].get("name"), Some("Alice"));
        }
    }

    #[test]
    fn test_search_matches_any_field_in_order() {
        let records = parse_csv(b"name,team\nAlice,red\nBob,blue\nCarol,Redwood\n").unwrap();
        let hits = search(&records, "red");
        let names: Vec<_> = hits.iter().filter_map(|r| r.get("name")).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        assert!(search(&people(), "zzz").is_empty());
    }

    #[tokio::test]
    async fn test_store_starts_empty_and_replaces_wholesale() {
        let store = DatasetStore::new();
        assert!(store.is_empty().await);

        store.replace(people()).await;
        assert_eq!(store.len().await, 2);

        store.replace(parse_csv(b"name\nCarol\n").unwrap()).await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].get("name"), Some("Carol"));
    }

    #[tokio::test]
    async fn test_snapshot_survives_replace() {
        let store = DatasetStore::new();
        store.replace(people()).await;

        let before = store.snapshot().await;
        store.replace(Vec::new()).await;

        assert_eq!(before.len(), 2);
        assert!(store.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = DatasetStore::new();
        let other = store.clone();
        other.replace(people()).await;
        assert_eq!(store.len().await, 2);
    }
}
