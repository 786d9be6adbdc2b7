//! Natural-language helpers for the voice showroom assistant
//!
//! Two leaf components live here:
//! - `numbers`: robust utterance-to-number parsing (digits, separators,
//!   percents, spelled-out words)
//! - `translate`: keyword/regex translation of free-form utterances into
//!   structured inventory filters

pub mod numbers;
pub mod translate;

pub use numbers::{parse_number, words_to_number};
pub use translate::QueryTranslator;
