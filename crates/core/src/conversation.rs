//! Conversation types: questions, answers, and dialogue state
//!
//! One engine instance serves one active conversation. `step` is the sole
//! driver of which question is active: 0 = not started, 1..=N = asking
//! question N, N+1 = finished. It only moves forward; a rejected answer
//! re-asks in place without changing it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single interview question
///
/// Questions are defined once as an ordered static slice; the order is the
/// interview order and is semantically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Stable key the answer is stored and logged under
    pub key: &'static str,
    /// Prompt spoken to the user
    pub prompt: &'static str,
}

/// A normalized answer value
///
/// Validation normalizes raw transcripts into one of these shapes: dollar
/// amounts and counts become integers, rates stay fractional, and free-text
/// answers (like the user's name) stay text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnswerValue::Integer(v) => Some(*v as f64),
            AnswerValue::Number(v) => Some(*v),
            AnswerValue::Text(_) => None,
        }
    }

    /// Integer view of the value, if it has one
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AnswerValue::Integer(v) => Some(*v),
            AnswerValue::Number(v) => Some(v.round() as i64),
            AnswerValue::Text(_) => None,
        }
    }

    /// Text view of the value, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Integer(v) => write!(f, "{}", v),
            AnswerValue::Number(v) => write!(f, "{}", v),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Accumulated answers for one conversation
///
/// Keys are unique; the map grows monotonically during a session and a value
/// is only replaced by an explicit retry of the same question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answers {
    values: HashMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a normalized answer under its question key
    pub fn set(&mut self, key: &str, value: AnswerValue) {
        self.values.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric answer, or the provided default when absent or non-numeric
    pub fn number_or(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).and_then(|v| v.as_f64()).unwrap_or(default)
    }

    /// Text answer, if present
    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_text())
    }
}

/// Outcome of validating one raw answer
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// Answer accepted with its normalized value
    Accepted(AnswerValue),
    /// Answer rejected; the retry prompt is spoken and the question re-asked
    Rejected { retry_prompt: String },
}

impl ValidationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationResult::Accepted(_))
    }

    pub fn rejected<S: Into<String>>(prompt: S) -> Self {
        ValidationResult::Rejected {
            retry_prompt: prompt.into(),
        }
    }
}

/// Phase of the dialogue derived from `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialoguePhase {
    /// Conversation not started
    Idle,
    /// Asking question k (1-based)
    Asking(usize),
    /// All questions answered; estimate computed
    Finished,
}

/// Conversation state owned exclusively by the dialogue engine
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    /// 0 = not started, 1..=N = asking question N, N+1 = finished
    pub step: usize,
    /// Normalized answers accepted so far
    pub answers: Answers,
    /// Most recent raw transcript from the user (including rejected input)
    pub last_user_utterance: String,
    /// Most recent prompt spoken by the assistant
    pub last_assistant_utterance: String,
    /// A capture is currently active
    pub listening: bool,
    /// Playback is currently active
    pub speaking: bool,
}

impl ConversationState {
    /// Derive the phase for a questionnaire of `question_count` entries
    pub fn phase(&self, question_count: usize) -> DialoguePhase {
        if self.step == 0 {
            DialoguePhase::Idle
        } else if self.step <= question_count {
            DialoguePhase::Asking(self.step)
        } else {
            DialoguePhase::Finished
        }
    }
}
