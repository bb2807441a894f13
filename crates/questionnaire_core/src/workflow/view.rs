//! Questionnaire view coordinator.
//!
//! # Responsibility
//! - Wire one return lifecycle to one answer widget per question.
//! - Resolve `CreateReturnRequested` round-trips: create the return, then
//!   distribute the new id so deferred answer writes replay.
//!
//! # Invariants
//! - Answer creates are only issued from `return_id_assigned`, which runs
//!   after the return create succeeded.
//! - Every widget receives the return id; each replays at most its own
//!   pending draft.

use super::answer_widget::{AnswerWidget, SaveOutcome};
use super::return_lifecycle::ReturnLifecycle;
use crate::event::EventSink;
use crate::model::answer::AgreementLevel;
use crate::model::questionnaire::{QuestionAnswerPair, QuestionId, QuestionnaireOverview};
use crate::model::questionnaire_return::{ReturnId, UserId};
use crate::store::answer_store::AnswerStore;
use crate::store::return_store::ReturnStore;
use crate::store::StoreResult;

/// One user interaction with a question widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEdit {
    Value(AgreementLevel),
    Comment(String),
}

/// Coordinator for one open questionnaire: lifecycle plus widgets.
pub struct QuestionnaireView<R, A, E>
where
    R: ReturnStore,
    A: AnswerStore + Clone,
    E: EventSink + Clone,
{
    lifecycle: ReturnLifecycle<R, E>,
    widgets: Vec<AnswerWidget<A, E>>,
}

impl<R, A, E> QuestionnaireView<R, A, E>
where
    R: ReturnStore,
    A: AnswerStore + Clone,
    E: EventSink + Clone,
{
    /// Opens a questionnaire for the given user.
    ///
    /// Resumes the lifecycle when the overview carries a live return id and
    /// hydrates widgets from their persisted answers. A stale return id
    /// that no longer resolves falls back to the fresh-lifecycle path.
    pub fn open(
        overview: &QuestionnaireOverview,
        answered_by: UserId,
        return_store: R,
        answer_store: A,
        sink: E,
    ) -> StoreResult<Self> {
        let existing = match overview.return_id {
            Some(id) => return_store.fetch_return(id)?,
            None => None,
        };

        let lifecycle = match existing {
            Some(record) => ReturnLifecycle::resume(&record, return_store, sink.clone()),
            None => ReturnLifecycle::new(
                overview.questionnaire_id,
                answered_by,
                return_store,
                sink.clone(),
            ),
        };

        let mut widgets = Vec::with_capacity(overview.pairs.len());
        for pair in &overview.pairs {
            let mut widget = AnswerWidget::new(
                pair.question_id,
                lifecycle.return_id(),
                answer_store.clone(),
                sink.clone(),
            );
            if let Some(answer_id) = pair.answer_id {
                if let Some(answer) = answer_store.fetch_answer(answer_id)? {
                    widget.attach_answer(&answer);
                }
            }
            widgets.push(widget);
        }

        Ok(Self { lifecycle, widgets })
    }

    pub fn return_id(&self) -> Option<ReturnId> {
        self.lifecycle.return_id()
    }

    pub fn terms_accepted(&self) -> bool {
        self.lifecycle.terms_accepted()
    }

    pub fn submitted(&self) -> bool {
        self.lifecycle.submitted()
    }

    pub fn widget(&self, question_id: QuestionId) -> Option<&AnswerWidget<A, E>> {
        self.widgets
            .iter()
            .find(|widget| widget.question_id() == question_id)
    }

    /// Routes a field edit to its widget and resolves any deferred write.
    ///
    /// Returns `None` for an unknown question id. When the edit deferred
    /// and the return creation succeeded, the returned outcome is the
    /// replayed write's result; a failed creation leaves the draft pending
    /// for the next attempt.
    pub fn edit_answer(&mut self, question_id: QuestionId, edit: AnswerEdit) -> Option<SaveOutcome> {
        let index = self
            .widgets
            .iter()
            .position(|widget| widget.question_id() == question_id)?;

        let outcome = {
            let widget = &mut self.widgets[index];
            match edit {
                AnswerEdit::Value(value) => widget.handle_value_change(value),
                AnswerEdit::Comment(comment) => widget.handle_comment_change(comment),
            }
        };

        if outcome != SaveOutcome::Deferred {
            return Some(outcome);
        }

        let Some(return_id) = self.lifecycle.ensure_return() else {
            return Some(SaveOutcome::Deferred);
        };

        let mut final_outcome = SaveOutcome::Deferred;
        for (position, widget) in self.widgets.iter_mut().enumerate() {
            if let Some(replayed) = widget.return_id_assigned(return_id) {
                if position == index {
                    final_outcome = replayed;
                }
            }
        }
        Some(final_outcome)
    }

    /// The user toggled the terms checkbox.
    pub fn set_terms_accepted(&mut self, accepted: bool) -> bool {
        let persisted = self.lifecycle.handle_terms_change(accepted);
        // The toggle may have created the return; release deferred writes.
        self.distribute_return_id();
        persisted
    }

    /// The user pressed "Mark Complete".
    pub fn mark_complete(&mut self) -> bool {
        let submitted = self.lifecycle.mark_complete();
        self.distribute_return_id();
        submitted
    }

    /// The user dismissed the questionnaire.
    pub fn close(&self) {
        self.lifecycle.close();
    }

    /// Rebuilds the view aggregate for card refresh.
    pub fn question_answer_pairs(&self) -> Vec<QuestionAnswerPair> {
        self.widgets
            .iter()
            .map(|widget| QuestionAnswerPair {
                question_id: widget.question_id(),
                answer_id: widget.answer_id(),
            })
            .collect()
    }

    fn distribute_return_id(&mut self) {
        if let Some(return_id) = self.lifecycle.return_id() {
            for widget in &mut self.widgets {
                widget.return_id_assigned(return_id);
            }
        }
    }
}
