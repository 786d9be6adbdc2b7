//! Slot-filling dialogue engine for the voice showroom assistant
//!
//! Owns the ordered question list, the conversation state, and the
//! turn-taking protocol; validates and normalizes answers, computes the
//! affordability estimate, and selects budget-nearest inventory matches.

pub mod afford;
pub mod engine;
pub mod questions;
pub mod validate;

pub use afford::{monthly_payment, total_payment};
pub use engine::{budget_nearest, DialogueEngine, TurnOutcome};
pub use questions::{PAYMENT_PREFIX, QUESTIONS};
pub use validate::{AnswerValidator, RETRY_GENERIC};
