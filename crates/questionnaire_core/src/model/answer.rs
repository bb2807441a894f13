//! Answer records and the fixed agreement option set.
//!
//! # Responsibility
//! - Define the `Answer` record and its creation request shape.
//! - Provide label/storage-token conversions for `AgreementLevel`.
//!
//! # Invariants
//! - `return_id` and `question_id` are immutable once the record exists;
//!   update paths touch value and comment only.
//! - An answer must carry at least a value or a comment.

use super::questionnaire::QuestionId;
use super::questionnaire_return::ReturnId;
use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an answer record.
pub type AnswerId = Uuid;

/// The fixed ordered option set offered for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementLevel {
    StronglyDisagree,
    Disagree,
    Undecided,
    Agree,
    StronglyAgree,
}

/// Rendering order for option pickers.
pub const AGREEMENT_OPTIONS: [AgreementLevel; 5] = [
    AgreementLevel::StronglyDisagree,
    AgreementLevel::Disagree,
    AgreementLevel::Undecided,
    AgreementLevel::Agree,
    AgreementLevel::StronglyAgree,
];

impl AgreementLevel {
    /// User-facing label, also the persisted wire value.
    pub fn label(self) -> &'static str {
        match self {
            Self::StronglyDisagree => "Strongly Disagree",
            Self::Disagree => "Disagree",
            Self::Undecided => "Undecided",
            Self::Agree => "Agree",
            Self::StronglyAgree => "Strongly Agree",
        }
    }

    /// Parses a persisted label; unknown labels yield `None`.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value {
            "Strongly Disagree" => Some(Self::StronglyDisagree),
            "Disagree" => Some(Self::Disagree),
            "Undecided" => Some(Self::Undecided),
            "Agree" => Some(Self::Agree),
            "Strongly Agree" => Some(Self::StronglyAgree),
            _ => None,
        }
    }
}

/// One user response to one question within a return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub return_id: ReturnId,
    pub question_id: QuestionId,
    /// Absent when the user commented before picking an option.
    pub value: Option<AgreementLevel>,
    pub comment: Option<String>,
}

impl Answer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_answer_content(self.value, self.comment.as_deref())
    }
}

/// Creation request for an answer; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub return_id: ReturnId,
    pub question_id: QuestionId,
    pub value: Option<AgreementLevel>,
    pub comment: Option<String>,
}

impl NewAnswer {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_answer_content(self.value, self.comment.as_deref())
    }
}

/// Shared check for create and update paths: an answer must carry at least
/// a selected value or a non-blank comment.
pub(crate) fn validate_answer_content(
    value: Option<AgreementLevel>,
    comment: Option<&str>,
) -> Result<(), ValidationError> {
    let has_comment = comment.is_some_and(|text| !text.trim().is_empty());
    if value.is_none() && !has_comment {
        return Err(ValidationError::EmptyAnswer);
    }
    Ok(())
}
