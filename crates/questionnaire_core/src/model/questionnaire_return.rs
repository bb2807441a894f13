//! Questionnaire return records (one user's attempt at a questionnaire).
//!
//! # Responsibility
//! - Define the `QuestionnaireReturn` record and its creation request shape.
//! - Enforce the submitted-implies-terms-accepted invariant.
//!
//! # Invariants
//! - At most one return exists per `(questionnaire, user)`.
//! - `submitted` flips to true exactly once and never back.

use super::questionnaire::QuestionnaireId;
use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a return record.
pub type ReturnId = Uuid;

/// Stable identifier of the answering user, assigned by the host.
pub type UserId = Uuid;

/// A user's in-progress or completed attempt at a questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionnaireReturn {
    pub id: ReturnId,
    pub questionnaire_id: QuestionnaireId,
    pub answered_by: UserId,
    pub terms_accepted: bool,
    pub submitted: bool,
}

impl QuestionnaireReturn {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.submitted && !self.terms_accepted {
            return Err(ValidationError::SubmittedWithoutTerms);
        }
        Ok(())
    }
}

/// Creation request for a return; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReturn {
    pub questionnaire_id: QuestionnaireId,
    pub answered_by: UserId,
    pub terms_accepted: bool,
    pub submitted: bool,
}

impl NewReturn {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.submitted && !self.terms_accepted {
            return Err(ValidationError::SubmittedWithoutTerms);
        }
        Ok(())
    }
}
