//! The interview questionnaire
//!
//! Defined once, in interview order. Keys double as response-log keys and
//! validator dispatch keys.

use carvoice_core::Question;

/// Ordered interview questions
pub const QUESTIONS: &[Question] = &[
    Question {
        key: "name",
        prompt: "Hi there! I am the CarVoice assistant. May I have your name?",
    },
    Question {
        key: "buyOrLease",
        prompt: "Would you like to buy or lease the car?",
    },
    Question {
        key: "salary",
        prompt: "What is your yearly salary?",
    },
    Question {
        key: "totalBudget",
        prompt: "What is your total budget for the car?",
    },
    Question {
        key: "creditScore",
        prompt: "What is your credit score?",
    },
    Question {
        key: "interestRate",
        prompt: "What interest rate do you expect (annual percent)?",
    },
    Question {
        key: "downPayment",
        prompt: "How much will you put as a downpayment?",
    },
    Question {
        key: "loanTerm",
        prompt: "Loan term in months?",
    },
];

/// Spoken before the computed estimate; preloaded alongside the first prompt
pub const PAYMENT_PREFIX: &str = "This is your estimated monthly payment:";
