//! Questionnaire and question records plus the card-facing view aggregates.
//!
//! # Responsibility
//! - Define the immutable questionnaire/question projections.
//! - Define `QuestionAnswerPair` and `QuestionnaireOverview`, the aggregates
//!   the card and view components are driven by.
//!
//! # Invariants
//! - Questionnaires and questions are never mutated by this core.
//! - `QuestionnaireStatus` labels are stable wire values.

use super::answer::AnswerId;
use super::questionnaire_return::ReturnId;
use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a questionnaire definition.
pub type QuestionnaireId = Uuid;

/// Stable identifier of a single question within a questionnaire.
pub type QuestionId = Uuid;

/// A questionnaire definition. Immutable from this core's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    pub name: String,
    pub description: Option<String>,
    /// Number of questions the author published; the live count comes from
    /// the question list itself.
    pub total_questions: u32,
}

impl Questionnaire {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankQuestionnaireName);
        }
        Ok(())
    }
}

/// One question of a questionnaire. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub questionnaire_id: QuestionnaireId,
    /// 1-based display sequence number.
    pub number: u32,
    pub text: String,
    pub help_text: Option<String>,
    /// Whether a free-text comment field is offered next to the option set.
    pub comment_allowed: bool,
}

/// Progress state of a user's attempt, as shown on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionnaireStatus {
    NotStarted,
    InProgress,
    Submitted,
}

impl QuestionnaireStatus {
    /// Display label, also the wire value used by list payloads.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Submitted => "Submitted",
        }
    }

    /// Parses a display label; unknown labels yield `None`.
    pub fn parse_label(value: &str) -> Option<Self> {
        match value {
            "Not Started" => Some(Self::NotStarted),
            "In Progress" => Some(Self::InProgress),
            "Submitted" => Some(Self::Submitted),
            _ => None,
        }
    }
}

/// One question plus the id of its answer, when one exists.
///
/// Used only for counting and for widget construction; the full answer
/// record is fetched through the store when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswerPair {
    pub question_id: QuestionId,
    pub answer_id: Option<AnswerId>,
}

impl QuestionAnswerPair {
    pub fn unanswered(question_id: QuestionId) -> Self {
        Self {
            question_id,
            answer_id: None,
        }
    }

    pub fn answered(question_id: QuestionId, answer_id: AnswerId) -> Self {
        Self {
            question_id,
            answer_id: Some(answer_id),
        }
    }
}

/// Card/selection view model for one questionnaire and one user's attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireOverview {
    pub questionnaire_id: QuestionnaireId,
    /// Absent until the user's return record has been created.
    pub return_id: Option<ReturnId>,
    pub name: String,
    pub status: Option<QuestionnaireStatus>,
    pub pairs: Vec<QuestionAnswerPair>,
}
