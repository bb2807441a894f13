//! Return record lifecycle: lazy creation, terms flag, terminal submit.
//!
//! # Responsibility
//! - Drive the `NoReturn -> PendingCreation -> Created` state machine.
//! - Persist terms/submitted changes against the existing id once created.
//!
//! # Invariants
//! - `submitted` flips to true exactly once; repeated `mark_complete`
//!   calls after success perform no further writes.
//! - A failed creation restores `NoReturn`; no partial state survives.
//! - `mark_complete` without accepted terms performs zero store calls.

use crate::event::{EventSink, QuestionnaireEvent, ReturnOperation, Toast};
use crate::model::questionnaire::QuestionnaireId;
use crate::model::questionnaire_return::{NewReturn, QuestionnaireReturn, ReturnId, UserId};
use crate::store::return_store::ReturnStore;
use log::{debug, info, warn};

const TERMS_REQUIRED_MESSAGE: &str =
    "You must agree to terms and conditions before submitting";

/// Creation state of the user's return record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnState {
    /// No record exists yet; the first relevant edit triggers creation.
    NoReturn,
    /// A creation request is in flight; dependent writes must wait.
    PendingCreation,
    /// The record exists under a stable id.
    Created { return_id: ReturnId },
}

/// Lifecycle component for one user's attempt at one questionnaire.
pub struct ReturnLifecycle<R: ReturnStore, E: EventSink> {
    questionnaire_id: QuestionnaireId,
    answered_by: UserId,
    state: ReturnState,
    terms_accepted: bool,
    submitted: bool,
    store: R,
    sink: E,
}

impl<R: ReturnStore, E: EventSink> ReturnLifecycle<R, E> {
    /// Starts a fresh lifecycle with no return record.
    pub fn new(
        questionnaire_id: QuestionnaireId,
        answered_by: UserId,
        store: R,
        sink: E,
    ) -> Self {
        Self {
            questionnaire_id,
            answered_by,
            state: ReturnState::NoReturn,
            terms_accepted: false,
            submitted: false,
            store,
            sink,
        }
    }

    /// Rebuilds `Created` state from an existing record (reopened view).
    pub fn resume(record: &QuestionnaireReturn, store: R, sink: E) -> Self {
        Self {
            questionnaire_id: record.questionnaire_id,
            answered_by: record.answered_by,
            state: ReturnState::Created {
                return_id: record.id,
            },
            terms_accepted: record.terms_accepted,
            submitted: record.submitted,
            store,
            sink,
        }
    }

    pub fn state(&self) -> ReturnState {
        self.state
    }

    pub fn return_id(&self) -> Option<ReturnId> {
        match self.state {
            ReturnState::Created { return_id } => Some(return_id),
            _ => None,
        }
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    /// The user toggled the terms-and-conditions checkbox.
    ///
    /// Returns whether the flag was persisted. On persistence failure the
    /// local flag reverts to its previous value.
    pub fn handle_terms_change(&mut self, accepted: bool) -> bool {
        let previous = self.terms_accepted;
        self.terms_accepted = accepted;

        match self.state {
            ReturnState::Created { return_id } => {
                match self.store.update_return(&self.record(return_id)) {
                    Ok(()) => {
                        self.sink
                            .toast(Toast::success("Success", "Questionnaire Updated"));
                        true
                    }
                    Err(err) => {
                        self.terms_accepted = previous;
                        warn!(
                            "event=return_update module=workflow status=error return_id={return_id} error={err}"
                        );
                        self.sink
                            .toast(Toast::error("Error updating record", err.to_string()));
                        false
                    }
                }
            }
            ReturnState::PendingCreation => {
                // Creation is in flight; the flag rides along once it lands.
                debug!("event=terms_change module=workflow status=deferred");
                false
            }
            ReturnState::NoReturn => self.create_return().is_some(),
        }
    }

    /// Idempotent entry used when a dependent write needs the return id.
    ///
    /// Returns `None` when creation failed (an error toast was raised) or
    /// is still unresolved.
    pub fn ensure_return(&mut self) -> Option<ReturnId> {
        match self.state {
            ReturnState::Created { return_id } => Some(return_id),
            ReturnState::PendingCreation => None,
            ReturnState::NoReturn => self.create_return(),
        }
    }

    /// Terminal action: persist `submitted=true`.
    ///
    /// Rejected locally with a validation toast when terms were not
    /// accepted; in that case no store call is issued.
    pub fn mark_complete(&mut self) -> bool {
        if !self.terms_accepted {
            self.sink
                .toast(Toast::error("Cannot submit", TERMS_REQUIRED_MESSAGE));
            return false;
        }

        if self.submitted {
            return true;
        }

        let Some(return_id) = self.ensure_return() else {
            return false;
        };

        let mut record = self.record(return_id);
        record.submitted = true;

        match self.store.update_return(&record) {
            Ok(()) => {
                self.submitted = true;
                info!(
                    "event=return_submit module=workflow status=ok return_id={return_id}"
                );
                self.sink.emit(QuestionnaireEvent::QuestionnaireUpdated {
                    operation: ReturnOperation::ReturnSubmitted,
                    new_return_id: return_id,
                });
                self.sink
                    .toast(Toast::success("Success", "Questionnaire Submitted"));
                self.sink.emit(QuestionnaireEvent::CloseRequested);
                true
            }
            Err(err) => {
                warn!(
                    "event=return_submit module=workflow status=error return_id={return_id} error={err}"
                );
                self.sink
                    .toast(Toast::error("Error submitting record", err.to_string()));
                false
            }
        }
    }

    /// Raises the close signal without touching any record.
    pub fn close(&self) {
        self.sink.emit(QuestionnaireEvent::CloseRequested);
    }

    fn create_return(&mut self) -> Option<ReturnId> {
        self.state = ReturnState::PendingCreation;

        let request = NewReturn {
            questionnaire_id: self.questionnaire_id,
            answered_by: self.answered_by,
            terms_accepted: self.terms_accepted,
            submitted: false,
        };

        match self.store.create_return(&request) {
            Ok(return_id) => {
                self.state = ReturnState::Created { return_id };
                info!(
                    "event=return_create module=workflow status=ok return_id={return_id}"
                );
                self.sink.emit(QuestionnaireEvent::QuestionnaireUpdated {
                    operation: ReturnOperation::NewReturn,
                    new_return_id: return_id,
                });
                self.sink
                    .toast(Toast::success("Success", "Questionnaire saved"));
                Some(return_id)
            }
            Err(err) => {
                self.state = ReturnState::NoReturn;
                warn!("event=return_create module=workflow status=error error={err}");
                self.sink
                    .toast(Toast::error("Error creating record", err.to_string()));
                None
            }
        }
    }

    fn record(&self, return_id: ReturnId) -> QuestionnaireReturn {
        QuestionnaireReturn {
            id: return_id,
            questionnaire_id: self.questionnaire_id,
            answered_by: self.answered_by,
            terms_accepted: self.terms_accepted,
            submitted: self.submitted,
        }
    }
}
