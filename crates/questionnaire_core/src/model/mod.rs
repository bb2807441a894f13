//! Domain model for questionnaires, returns and answers.
//!
//! # Responsibility
//! - Define the canonical records this core projects from the record store.
//! - Provide validation helpers enforced by store write paths.
//!
//! # Invariants
//! - Every record is identified by a stable `Uuid`.
//! - A `QuestionnaireReturn` exists at most once per `(questionnaire, user)`.
//! - An `Answer` exists at most once per `(return, question)`.

pub mod answer;
pub mod questionnaire;
pub mod questionnaire_return;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Local validation failure raised before any store mutation is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Answer carries neither a selected value nor a comment.
    EmptyAnswer,
    /// Return is flagged submitted while terms were never accepted.
    SubmittedWithoutTerms,
    /// Questionnaire name is blank.
    BlankQuestionnaireName,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAnswer => {
                write!(f, "answer must carry a selected value or a comment")
            }
            Self::SubmittedWithoutTerms => {
                write!(
                    f,
                    "return cannot be submitted before terms and conditions are accepted"
                )
            }
            Self::BlankQuestionnaireName => write!(f, "questionnaire name cannot be blank"),
        }
    }
}

impl Error for ValidationError {}
