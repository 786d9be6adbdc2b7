//! Response store collaborator
//!
//! An append-only log of accepted answers, one record per answer, with an
//! explicit truncate invoked on session teardown.

use crate::{AnswerValue, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One accepted answer, as logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// When the answer was accepted
    pub timestamp: DateTime<Utc>,
    /// Question key the answer fills
    pub question_key: String,
    /// Prompt that was asked
    pub question_prompt: String,
    /// Normalized answer value
    pub answer: AnswerValue,
}

impl AnswerRecord {
    /// Record an acceptance happening now
    pub fn now(key: &str, prompt: &str, answer: AnswerValue) -> Self {
        Self {
            timestamp: Utc::now(),
            question_key: key.to_string(),
            question_prompt: prompt.to_string(),
            answer,
        }
    }
}

/// Append-only log of accepted answers
#[async_trait]
pub trait ResponseStore: Send + Sync + 'static {
    /// Append one accepted answer
    async fn append(&self, record: &AnswerRecord) -> Result<()>;

    /// Truncate the log (session teardown)
    async fn clear(&self) -> Result<()>;

    /// Read back every logged record, oldest first
    async fn read_all(&self) -> Result<Vec<AnswerRecord>>;
}
