// Personality quiz: question bank, scoring engine, and the HTTP handlers
// that drive a client-held session through to a result.

pub mod bank;
pub mod category;
pub mod handlers;
pub mod scoring;

use thiserror::Error;

pub use bank::QuestionBank;
pub use category::Category;
pub use scoring::{QuizResult, QuizSession};

/// Contract violations of the scoring engine. None of these are recoverable
/// by retrying; they mean the caller sent something the bank doesn't contain.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("question index {index} is out of range (bank has {total} questions)")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error("option '{option_id}' does not belong to question {index}")]
    UnknownOption { index: usize, option_id: String },

    #[error("quiz is complete; cannot navigate back")]
    AlreadyComplete,

    #[error("quiz is incomplete: {answered} of {total} questions answered")]
    Incomplete { answered: usize, total: usize },

    #[error("invalid question bank: {0}")]
    InvalidBank(String),
}
