//! Outbound events and user-facing notifications.
//!
//! # Responsibility
//! - Define the typed events workflow components raise toward their host.
//! - Define the `EventSink` seam a host passes in at construction time.
//!
//! # Invariants
//! - Operation enums render stable wire labels.
//! - Components never require a concrete sink type; anything implementing
//!   `EventSink` (including shared references) can observe the flow.

use crate::model::answer::AnswerId;
use crate::model::questionnaire::{QuestionId, QuestionnaireId, QuestionnaireOverview};
use crate::model::questionnaire_return::ReturnId;
use serde::{Deserialize, Serialize};

/// Operation tag for question/answer list refresh payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOperation {
    NewAnswer,
}

impl ListOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::NewAnswer => "New Answer",
        }
    }
}

/// Operation tag for questionnaire-level refresh payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnOperation {
    NewReturn,
    ReturnSubmitted,
}

impl ReturnOperation {
    pub fn label(self) -> &'static str {
        match self {
            Self::NewReturn => "New Return",
            Self::ReturnSubmitted => "Return Submitted",
        }
    }
}

/// Events raised by workflow components toward the containing view.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionnaireEvent {
    /// An answer edit needs a parent return record that does not exist yet.
    CreateReturnRequested { question_id: QuestionId },
    /// The question/answer list changed and should be re-fetched.
    ListUpdated {
        operation: ListOperation,
        question_id: QuestionId,
        new_answer_id: AnswerId,
    },
    /// The return record changed (created or submitted).
    QuestionnaireUpdated {
        operation: ReturnOperation,
        new_return_id: ReturnId,
    },
    /// The user opened a questionnaire from its card.
    QuestionnaireSelected {
        record_id: QuestionnaireId,
        questionnaire: QuestionnaireOverview,
    },
    /// The questionnaire view should be dismissed.
    CloseRequested,
}

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastVariant {
    Success,
    Error,
}

/// User-facing notification raised next to the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: ToastVariant::Success,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant: ToastVariant::Error,
        }
    }
}

/// Typed callback seam replacing bubbling host events.
///
/// Implementations are expected to be cheap and non-blocking; workflow
/// components call them synchronously while handling an interaction.
pub trait EventSink {
    fn emit(&self, event: QuestionnaireEvent);
    fn toast(&self, toast: Toast);
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, event: QuestionnaireEvent) {
        (**self).emit(event);
    }

    fn toast(&self, toast: Toast) {
        (**self).toast(toast);
    }
}
