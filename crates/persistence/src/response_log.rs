//! Response log stores
//!
//! Accepted answers are logged append-only, one record per answer, and the
//! log supports an explicit truncate invoked on session teardown. The file
//! store writes one tab-separated line per record so the log stays greppable
//! and re-readable; an in-memory store backs tests and single-process runs.

use async_trait::async_trait;
use carvoice_core::{AnswerRecord, AnswerValue, Error, ResponseStore, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Parse a logged answer back into its value shape
fn parse_answer(raw: &str) -> AnswerValue {
    if let Ok(v) = raw.parse::<i64>() {
        AnswerValue::Integer(v)
    } else if let Ok(v) = raw.parse::<f64>() {
        AnswerValue::Number(v)
    } else {
        AnswerValue::Text(raw.to_string())
    }
}

/// Collapse records to the latest value per question key
///
/// A retried question appears twice in the log; recommendation flows want
/// only the value that finally stuck.
pub fn latest_by_key(records: &[AnswerRecord]) -> HashMap<String, AnswerValue> {
    let mut latest = HashMap::new();
    for record in records {
        latest.insert(record.question_key.clone(), record.answer.clone());
    }
    latest
}

/// File-backed append-only response log
///
/// One record per line: `timestamp \t key \t prompt \t answer`.
pub struct FileResponseStore {
    path: PathBuf,
}

impl FileResponseStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_line(line: &str) -> Option<AnswerRecord> {
        let mut parts = line.splitn(4, '\t');
        let timestamp = parts.next()?;
        let question_key = parts.next()?;
        let question_prompt = parts.next()?;
        let answer = parts.next()?;

        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .ok()?
            .with_timezone(&Utc);

        Some(AnswerRecord {
            timestamp,
            question_key: question_key.to_string(),
            question_prompt: question_prompt.to_string(),
            answer: parse_answer(answer.trim_end()),
        })
    }
}

#[async_trait]
impl ResponseStore for FileResponseStore {
    async fn append(&self, record: &AnswerRecord) -> Result<()> {
        let line = format!(
            "{}\t{}\t{}\t{}\n",
            record.timestamp.to_rfc3339(),
            record.question_key,
            record.question_prompt,
            record.answer
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        tokio::fs::write(&self.path, b"").await?;
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<AnswerRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(Error::Io(err)),
        };

        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(Self::parse_line)
            .collect())
    }
}

/// In-memory response log
#[derive(Default)]
pub struct MemoryResponseStore {
    records: Mutex<Vec<AnswerRecord>>,
}

impl MemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for MemoryResponseStore {
    async fn append(&self, record: &AnswerRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.records.lock().clear();
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<AnswerRecord>> {
        Ok(self.records.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, answer: AnswerValue) -> AnswerRecord {
        AnswerRecord::now(key, &format!("Prompt for {key}?"), answer)
    }

    #[tokio::test]
    async fn test_file_store_append_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResponseStore::new(dir.path().join("responses.txt"));

        store
            .append(&record("totalBudget", AnswerValue::Integer(35000)))
            .await
            .unwrap();
        store
            .append(&record("interestRate", AnswerValue::Number(6.5)))
            .await
            .unwrap();
        store
            .append(&record("buyOrLease", AnswerValue::Text("buy".into())))
            .await
            .unwrap();

        let records = store.read_all().await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].answer, AnswerValue::Integer(35000));
        assert_eq!(records[1].answer, AnswerValue::Number(6.5));
        assert_eq!(records[2].answer, AnswerValue::Text("buy".into()));
    }

    #[tokio::test]
    async fn test_file_store_clear_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResponseStore::new(dir.path().join("responses.txt"));

        store
            .append(&record("salary", AnswerValue::Integer(85000)))
            .await
            .unwrap();
        store.clear().await.unwrap();

        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileResponseStore::new(dir.path().join("never-written.txt"));
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_by_key_prefers_retry() {
        let store = MemoryResponseStore::new();
        store
            .append(&record("creditScore", AnswerValue::Integer(500)))
            .await
            .unwrap();
        store
            .append(&record("creditScore", AnswerValue::Integer(720)))
            .await
            .unwrap();

        let records = store.read_all().await.unwrap();
        let latest = latest_by_key(&records);
        assert_eq!(latest.get("creditScore"), Some(&AnswerValue::Integer(720)));
    }
}
