mod common;

use common::{seed_uat_questionnaire, CallLog, RecordingSink};
use questionnaire_core::db::open_db_in_memory;
use questionnaire_core::{
    NewReturn, QuestionnaireEvent, QuestionnaireReturn, ReturnLifecycle, ReturnOperation,
    ReturnState, ReturnStore, SqliteReturnStore, StoreError, StoreResult, ToastVariant,
};
use uuid::Uuid;

#[test]
fn terms_toggle_without_return_creates_one() {
    let conn = open_db_in_memory().unwrap();
    let (questionnaire, _) = seed_uat_questionnaire(&conn);
    let sink = RecordingSink::new();
    let store = SqliteReturnStore::new(&conn);
    let user = Uuid::new_v4();
    let mut lifecycle = ReturnLifecycle::new(questionnaire.id, user, store, &sink);

    assert_eq!(lifecycle.state(), ReturnState::NoReturn);
    assert!(lifecycle.handle_terms_change(true));

    let return_id = lifecycle.return_id().expect("return should exist");
    assert!(matches!(
        lifecycle.state(),
        ReturnState::Created { return_id: id } if id == return_id
    ));

    let persisted = SqliteReturnStore::new(&conn)
        .fetch_return(return_id)
        .unwrap()
        .unwrap();
    assert!(persisted.terms_accepted);
    assert!(!persisted.submitted);

    assert!(sink.events().contains(&QuestionnaireEvent::QuestionnaireUpdated {
        operation: ReturnOperation::NewReturn,
        new_return_id: return_id,
    }));
    assert_eq!(sink.success_toast_count(), 1);
}

#[test]
fn terms_toggle_with_existing_return_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let (questionnaire, _) = seed_uat_questionnaire(&conn);
    let store = SqliteReturnStore::new(&conn);
    let user = Uuid::new_v4();
    let return_id = store
        .create_return(&NewReturn {
            questionnaire_id: questionnaire.id,
            answered_by: user,
            terms_accepted: false,
            submitted: false,
        })
        .unwrap();
    let record = store.fetch_return(return_id).unwrap().unwrap();

    let sink = RecordingSink::new();
    let mut lifecycle = ReturnLifecycle::resume(&record, store, &sink);

    assert!(lifecycle.handle_terms_change(true));
    assert_eq!(lifecycle.return_id(), Some(return_id));
    // No second creation happened.
    assert!(!sink
        .events()
        .iter()
        .any(|event| matches!(event, QuestionnaireEvent::QuestionnaireUpdated { .. })));

    let persisted = SqliteReturnStore::new(&conn)
        .fetch_return(return_id)
        .unwrap()
        .unwrap();
    assert!(persisted.terms_accepted);
}

#[test]
fn ensure_return_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let (questionnaire, _) = seed_uat_questionnaire(&conn);
    let sink = RecordingSink::new();
    let store = SqliteReturnStore::new(&conn);
    let mut lifecycle = ReturnLifecycle::new(questionnaire.id, Uuid::new_v4(), store, &sink);

    let first = lifecycle.ensure_return().unwrap();
    let second = lifecycle.ensure_return().unwrap();
    assert_eq!(first, second);

    let creations = sink
        .events()
        .iter()
        .filter(|event| {
            matches!(
                event,
                QuestionnaireEvent::QuestionnaireUpdated {
                    operation: ReturnOperation::NewReturn,
                    ..
                }
            )
        })
        .count();
    assert_eq!(creations, 1);
}

/// Return store that counts calls and optionally fails them.
#[derive(Clone)]
struct ScriptedReturnStore {
    log: CallLog,
    fail_all: bool,
}

impl ReturnStore for ScriptedReturnStore {
    fn create_return(&self, _request: &NewReturn) -> StoreResult<Uuid> {
        self.log.push("create_return");
        if self.fail_all {
            return Err(StoreError::InvalidData("injected failure".to_string()));
        }
        Ok(Uuid::new_v4())
    }

    fn update_return(&self, record: &QuestionnaireReturn) -> StoreResult<()> {
        self.log.push("update_return");
        if self.fail_all {
            return Err(StoreError::InvalidData("injected failure".to_string()));
        }
        record.validate().map_err(StoreError::from)
    }

    fn fetch_return(&self, _id: Uuid) -> StoreResult<Option<QuestionnaireReturn>> {
        Ok(None)
    }

    fn find_return(
        &self,
        _questionnaire_id: Uuid,
        _answered_by: Uuid,
    ) -> StoreResult<Option<QuestionnaireReturn>> {
        Ok(None)
    }
}

#[test]
fn mark_complete_without_terms_issues_no_store_call() {
    let sink = RecordingSink::new();
    let log = CallLog::new();
    let store = ScriptedReturnStore {
        log: log.clone(),
        fail_all: false,
    };
    let mut lifecycle = ReturnLifecycle::new(Uuid::new_v4(), Uuid::new_v4(), store, &sink);

    assert!(!lifecycle.mark_complete());
    assert!(log.calls().is_empty());
    assert_eq!(sink.error_toast_count(), 1);
    let toast = &sink.toasts()[0];
    assert_eq!(toast.variant, ToastVariant::Error);
    assert!(toast.message.contains("terms and conditions"));
    assert!(!lifecycle.submitted());
}

#[test]
fn mark_complete_persists_submit_and_closes() {
    let conn = open_db_in_memory().unwrap();
    let (questionnaire, _) = seed_uat_questionnaire(&conn);
    let sink = RecordingSink::new();
    let store = SqliteReturnStore::new(&conn);
    let mut lifecycle = ReturnLifecycle::new(questionnaire.id, Uuid::new_v4(), store, &sink);

    lifecycle.handle_terms_change(true);
    let return_id = lifecycle.return_id().unwrap();
    sink.clear();

    assert!(lifecycle.mark_complete());
    assert!(lifecycle.submitted());

    let events = sink.events();
    assert!(events.contains(&QuestionnaireEvent::QuestionnaireUpdated {
        operation: ReturnOperation::ReturnSubmitted,
        new_return_id: return_id,
    }));
    assert!(events.contains(&QuestionnaireEvent::CloseRequested));

    let persisted = SqliteReturnStore::new(&conn)
        .fetch_return(return_id)
        .unwrap()
        .unwrap();
    assert!(persisted.submitted);
}

#[test]
fn mark_complete_is_terminal_and_idempotent() {
    let log = CallLog::new();
    let store = ScriptedReturnStore {
        log: log.clone(),
        fail_all: false,
    };
    let sink = RecordingSink::new();
    let mut lifecycle = ReturnLifecycle::new(Uuid::new_v4(), Uuid::new_v4(), store, &sink);

    lifecycle.handle_terms_change(true);
    assert!(lifecycle.mark_complete());
    let calls_after_submit = log.calls().len();

    // A second press performs no further writes.
    assert!(lifecycle.mark_complete());
    assert_eq!(log.calls().len(), calls_after_submit);
}

#[test]
fn failed_creation_restores_no_return_state() {
    let sink = RecordingSink::new();
    let store = ScriptedReturnStore {
        log: CallLog::new(),
        fail_all: true,
    };
    let mut lifecycle = ReturnLifecycle::new(Uuid::new_v4(), Uuid::new_v4(), store, &sink);

    assert!(!lifecycle.handle_terms_change(true));
    assert_eq!(lifecycle.state(), ReturnState::NoReturn);
    assert_eq!(lifecycle.return_id(), None);
    assert_eq!(sink.error_toast_count(), 1);
    // The local checkbox state survives; only persistence failed.
    assert!(lifecycle.terms_accepted());
}

#[test]
fn failed_update_reverts_terms_flag() {
    let record = QuestionnaireReturn {
        id: Uuid::new_v4(),
        questionnaire_id: Uuid::new_v4(),
        answered_by: Uuid::new_v4(),
        terms_accepted: false,
        submitted: false,
    };
    let sink = RecordingSink::new();
    let store = ScriptedReturnStore {
        log: CallLog::new(),
        fail_all: true,
    };
    let mut lifecycle = ReturnLifecycle::resume(&record, store, &sink);

    assert!(!lifecycle.handle_terms_change(true));
    assert!(!lifecycle.terms_accepted());
    assert_eq!(sink.error_toast_count(), 1);
}

#[test]
fn close_emits_close_request_only() {
    let sink = RecordingSink::new();
    let store = ScriptedReturnStore {
        log: CallLog::new(),
        fail_all: false,
    };
    let lifecycle = ReturnLifecycle::new(Uuid::new_v4(), Uuid::new_v4(), store, &sink);

    lifecycle.close();
    assert_eq!(sink.events(), vec![QuestionnaireEvent::CloseRequested]);
    assert!(sink.toasts().is_empty());
}
