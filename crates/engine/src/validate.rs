//! Per-question answer validation
//!
//! Applies the parsing and range rules for each question key and returns
//! either a normalized value or a rejection with a targeted retry prompt.
//! Validation never fails hard: bad input always maps to a retry.

use carvoice_core::{AnswerValue, ValidationResult};
use carvoice_nlu::parse_number;

/// Spoken when input is blank or unintelligible, regardless of question
pub const RETRY_GENERIC: &str = "I didn't get that, please answer again.";

/// Validates and normalizes raw answers per question key
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerValidator;

impl AnswerValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate one raw transcript against the rules for `key`
    ///
    /// Unrecognized keys accept the trimmed text verbatim, so free-text
    /// questions (like the user's name) need no rule entry.
    pub fn validate(&self, key: &str, raw: &str) -> ValidationResult {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ValidationResult::rejected(RETRY_GENERIC);
        }

        match key {
            "buyOrLease" => {
                let lower = trimmed.to_lowercase();
                if lower.contains("buy") {
                    ValidationResult::Accepted(AnswerValue::Text("buy".to_string()))
                } else if lower.contains("lease") {
                    ValidationResult::Accepted(AnswerValue::Text("lease".to_string()))
                } else {
                    ValidationResult::rejected("Please say \"buy\" or \"lease\".")
                }
            }
            "salary" => match parse_number(trimmed) {
                Some(n) if n.is_finite() && n >= 0.0 => {
                    ValidationResult::Accepted(AnswerValue::Integer(n.round() as i64))
                }
                _ => ValidationResult::rejected(
                    "Please say your yearly salary as a number, for example 85000.",
                ),
            },
            "totalBudget" => match parse_number(trimmed) {
                Some(n) if n.is_finite() && n > 0.0 => {
                    ValidationResult::Accepted(AnswerValue::Integer(n.round() as i64))
                }
                _ => ValidationResult::rejected(
                    "Please state your total budget as a dollar amount, for example 35000.",
                ),
            },
            "creditScore" => match parse_number(trimmed) {
                Some(n) if n.is_finite() && (250.0..=900.0).contains(&n) => {
                    ValidationResult::Accepted(AnswerValue::Integer(n.round() as i64))
                }
                _ => ValidationResult::rejected(
                    "Please say your credit score as a number, for example 720.",
                ),
            },
            "interestRate" => {
                let Some(mut rate) = parse_number(trimmed).filter(|n| n.is_finite()) else {
                    return ValidationResult::rejected(
                        "Please say the interest rate as a percent, for example 6 or 6 percent.",
                    );
                };
                // A fractional rate like 0.06 was meant as 6%.
                if rate.abs() <= 1.0 {
                    rate *= 100.0;
                }
                if rate <= 0.0 || rate > 100.0 {
                    return ValidationResult::rejected(
                        "Please provide a realistic annual interest rate (like 6).",
                    );
                }
                ValidationResult::Accepted(AnswerValue::Number(rate))
            }
            "downPayment" => match parse_number(trimmed) {
                Some(n) if n.is_finite() && n >= 0.0 => {
                    ValidationResult::Accepted(AnswerValue::Integer(n.round() as i64))
                }
                _ => ValidationResult::rejected(
                    "Please state the down payment as a dollar amount, for example 3500.",
                ),
            },
            "loanTerm" => {
                let Some(n) = parse_number(trimmed).filter(|n| n.is_finite()) else {
                    return ValidationResult::rejected(
                        "Please say the loan term in months, for example 60.",
                    );
                };
                let months = n.round() as i64;
                if months <= 0 || months > 600 {
                    return ValidationResult::rejected(
                        "Please provide a reasonable term in months (e.g. 36, 48, 60).",
                    );
                }
                ValidationResult::Accepted(AnswerValue::Integer(months))
            }
            _ => ValidationResult::Accepted(AnswerValue::Text(trimmed.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> AnswerValidator {
        AnswerValidator::new()
    }

    fn accepted(result: ValidationResult) -> AnswerValue {
        match result {
            ValidationResult::Accepted(value) => value,
            ValidationResult::Rejected { retry_prompt } => {
                panic!("expected acceptance, got rejection: {retry_prompt}")
            }
        }
    }

    #[test]
    fn test_blank_input_always_rejected() {
        for key in ["name", "salary", "buyOrLease", "unknownKey"] {
            let result = validator().validate(key, "   ");
            assert!(!result.is_accepted(), "blank accepted for {key}");
        }
    }

    #[test]
    fn test_buy_or_lease_containment() {
        assert_eq!(
            accepted(validator().validate("buyOrLease", "I'd like to BUY it")),
            AnswerValue::Text("buy".to_string())
        );
        assert_eq!(
            accepted(validator().validate("buyOrLease", "lease please")),
            AnswerValue::Text("lease".to_string())
        );
        assert!(!validator().validate("buyOrLease", "rent").is_accepted());
    }

    #[test]
    fn test_salary_rounds_and_allows_zero() {
        assert_eq!(
            accepted(validator().validate("salary", "85,000.40")),
            AnswerValue::Integer(85000)
        );
        assert_eq!(
            accepted(validator().validate("salary", "zero")),
            AnswerValue::Integer(0)
        );
        assert!(!validator().validate("salary", "a lot").is_accepted());
    }

    #[test]
    fn test_budget_must_be_positive() {
        assert_eq!(
            accepted(validator().validate("totalBudget", "thirty five thousand")),
            AnswerValue::Integer(35000)
        );
        assert!(!validator().validate("totalBudget", "0").is_accepted());
    }

    #[test]
    fn test_credit_score_range() {
        assert_eq!(
            accepted(validator().validate("creditScore", "720")),
            AnswerValue::Integer(720)
        );
        assert!(!validator().validate("creditScore", "200").is_accepted());
        assert!(!validator().validate("creditScore", "950").is_accepted());
    }

    #[test]
    fn test_interest_rate_scaling_and_bounds() {
        assert_eq!(
            accepted(validator().validate("interestRate", "6")),
            AnswerValue::Number(6.0)
        );
        // 0.06 is treated as a fractional rate and scaled to 6.
        assert_eq!(
            accepted(validator().validate("interestRate", "0.06")),
            AnswerValue::Number(6.0)
        );
        assert!(!validator().validate("interestRate", "0").is_accepted());
        assert!(!validator().validate("interestRate", "150").is_accepted());
        assert_eq!(
            accepted(validator().validate("interestRate", "6 percent")),
            AnswerValue::Number(6.0)
        );
    }

    #[test]
    fn test_loan_term_bounds() {
        assert_eq!(
            accepted(validator().validate("loanTerm", "60")),
            AnswerValue::Integer(60)
        );
        assert_eq!(
            accepted(validator().validate("loanTerm", "sixty")),
            AnswerValue::Integer(60)
        );
        assert!(!validator().validate("loanTerm", "0").is_accepted());
        assert!(!validator().validate("loanTerm", "601").is_accepted());
    }

    #[test]
    fn test_down_payment_allows_zero() {
        assert_eq!(
            accepted(validator().validate("downPayment", "0")),
            AnswerValue::Integer(0)
        );
        assert!(!validator().validate("downPayment", "negative five").is_accepted());
    }

    #[test]
    fn test_unknown_key_accepts_trimmed_text() {
        assert_eq!(
            accepted(validator().validate("name", "  Jordan Lee  ")),
            AnswerValue::Text("Jordan Lee".to_string())
        );
    }

    #[test]
    fn test_time_like_input_rejected_for_numeric_keys() {
        assert!(!validator().validate("loanTerm", "7:20").is_accepted());
    }
}
