//! Answer widget: one question's create-or-update sync logic.
//!
//! # Responsibility
//! - Decide create vs. update for the answer record behind one question.
//! - Defer the write while the parent return id is unresolved and replay
//!   it once the id arrives.
//!
//! # Invariants
//! - At most one deferred draft is held; a later edit while creation is
//!   unresolved replaces it, so only the latest edit replays.
//! - `return_id`/`question_id` are never sent on update paths.
//! - On persistence failure no answer id is recorded and no list event is
//!   raised.

use crate::event::{EventSink, ListOperation, QuestionnaireEvent, Toast};
use crate::model::answer::{AgreementLevel, Answer, AnswerId, NewAnswer};
use crate::model::questionnaire::QuestionId;
use crate::model::questionnaire_return::ReturnId;
use crate::store::answer_store::AnswerStore;
use log::{info, warn};

/// Snapshot of the field values awaiting a parent return id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerDraft {
    pub value: Option<AgreementLevel>,
    pub comment: Option<String>,
}

/// Result of one field interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The answer record was written.
    Saved { answer_id: AnswerId, created: bool },
    /// The write waits for the parent return to be created.
    Deferred,
    /// The store rejected the write; an error toast was raised.
    Failed,
}

/// Question/answer widget bound to one question of an open questionnaire.
pub struct AnswerWidget<A: AnswerStore, E: EventSink> {
    question_id: QuestionId,
    answer_id: Option<AnswerId>,
    return_id: Option<ReturnId>,
    value: Option<AgreementLevel>,
    comment: Option<String>,
    pending: Option<AnswerDraft>,
    store: A,
    sink: E,
}

impl<A: AnswerStore, E: EventSink> AnswerWidget<A, E> {
    pub fn new(question_id: QuestionId, return_id: Option<ReturnId>, store: A, sink: E) -> Self {
        Self {
            question_id,
            answer_id: None,
            return_id,
            value: None,
            comment: None,
            pending: None,
            store,
            sink,
        }
    }

    /// Hydrates the widget from an already persisted answer record.
    pub fn attach_answer(&mut self, answer: &Answer) {
        self.answer_id = Some(answer.id);
        self.value = answer.value;
        self.comment = answer.comment.clone();
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn answer_id(&self) -> Option<AnswerId> {
        self.answer_id
    }

    pub fn return_id(&self) -> Option<ReturnId> {
        self.return_id
    }

    pub fn value(&self) -> Option<AgreementLevel> {
        self.value
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The user picked an option.
    pub fn handle_value_change(&mut self, value: AgreementLevel) -> SaveOutcome {
        self.value = Some(value);
        self.save_or_defer()
    }

    /// The user edited the free-text comment.
    pub fn handle_comment_change(&mut self, comment: impl Into<String>) -> SaveOutcome {
        self.comment = Some(comment.into());
        self.save_or_defer()
    }

    /// The parent return id became available; replays the pending draft.
    ///
    /// The draft slot is one-shot: it is cleared before the replayed write
    /// so a failure never replays twice. Returns `None` when nothing was
    /// pending.
    pub fn return_id_assigned(&mut self, return_id: ReturnId) -> Option<SaveOutcome> {
        if self.return_id.is_none() {
            self.return_id = Some(return_id);
        }

        let draft = self.pending.take()?;
        self.value = draft.value;
        self.comment = draft.comment;
        Some(self.submit_answer())
    }

    fn save_or_defer(&mut self) -> SaveOutcome {
        if self.return_id.is_some() {
            return self.submit_answer();
        }

        // Replaces any earlier snapshot: only the latest edit replays.
        self.pending = Some(AnswerDraft {
            value: self.value,
            comment: self.comment.clone(),
        });
        info!(
            "event=answer_deferred module=workflow status=ok question_id={}",
            self.question_id
        );
        self.sink.emit(QuestionnaireEvent::CreateReturnRequested {
            question_id: self.question_id,
        });
        SaveOutcome::Deferred
    }

    fn submit_answer(&mut self) -> SaveOutcome {
        match self.answer_id {
            None => self.create_answer(),
            Some(id) => self.update_answer(id),
        }
    }

    fn create_answer(&mut self) -> SaveOutcome {
        let return_id = match self.return_id {
            Some(id) => id,
            // save_or_defer guards this path; kept as a hard stop for
            // direct submit calls.
            None => return SaveOutcome::Deferred,
        };

        let request = NewAnswer {
            return_id,
            question_id: self.question_id,
            value: self.value,
            comment: self.comment.clone(),
        };

        match self.store.create_answer(&request) {
            Ok(id) => {
                self.answer_id = Some(id);
                self.sink.emit(QuestionnaireEvent::ListUpdated {
                    operation: ListOperation::NewAnswer,
                    question_id: self.question_id,
                    new_answer_id: id,
                });
                self.sink.toast(Toast::success("Success", "Answer saved"));
                SaveOutcome::Saved {
                    answer_id: id,
                    created: true,
                }
            }
            Err(err) => {
                warn!(
                    "event=answer_create module=workflow status=error question_id={} error={err}",
                    self.question_id
                );
                self.sink
                    .toast(Toast::error("Error creating record", err.to_string()));
                SaveOutcome::Failed
            }
        }
    }

    fn update_answer(&mut self, id: AnswerId) -> SaveOutcome {
        match self
            .store
            .update_answer(id, self.value, self.comment.as_deref())
        {
            Ok(()) => {
                self.sink.toast(Toast::success("Success", "Answer Updated"));
                SaveOutcome::Saved {
                    answer_id: id,
                    created: false,
                }
            }
            Err(err) => {
                warn!(
                    "event=answer_update module=workflow status=error answer_id={id} error={err}"
                );
                self.sink
                    .toast(Toast::error("Error updating record", err.to_string()));
                SaveOutcome::Failed
            }
        }
    }
}
