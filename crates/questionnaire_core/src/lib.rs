//! Questionnaire workflow core.
//!
//! Cards, question/answer widgets and the completion flow over a record
//! store seam. This crate is the single source of truth for the workflow
//! invariants: lazy return creation with deferred answer replay, one-way
//! submission, and idempotent card aggregation.

pub mod db;
pub mod event;
pub mod logging;
pub mod model;
pub mod store;
pub mod workflow;

pub use event::{
    EventSink, ListOperation, QuestionnaireEvent, ReturnOperation, Toast, ToastVariant,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::answer::{
    AgreementLevel, Answer, AnswerId, NewAnswer, AGREEMENT_OPTIONS,
};
pub use model::questionnaire::{
    Question, QuestionAnswerPair, QuestionId, Questionnaire, QuestionnaireId,
    QuestionnaireOverview, QuestionnaireStatus,
};
pub use model::questionnaire_return::{
    NewReturn, QuestionnaireReturn, ReturnId, UserId,
};
pub use model::ValidationError;
pub use store::answer_store::{AnswerStore, SqliteAnswerStore};
pub use store::questionnaire_store::{QuestionnaireStore, SqliteQuestionnaireStore};
pub use store::return_store::{ReturnStore, SqliteReturnStore};
pub use store::{StoreError, StoreResult};
pub use workflow::answer_widget::{AnswerDraft, AnswerWidget, SaveOutcome};
pub use workflow::card::{
    aggregate, card_theme, theme_suffix, CardSummary, QuestionnaireCard, CARD_THEME_BASE,
};
pub use workflow::return_lifecycle::{ReturnLifecycle, ReturnState};
pub use workflow::view::{AnswerEdit, QuestionnaireView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
