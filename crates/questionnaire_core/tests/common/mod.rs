#![allow(dead_code)]

use questionnaire_core::{
    EventSink, Question, Questionnaire, QuestionnaireEvent, SqliteQuestionnaireStore, Toast,
    ToastVariant,
};
use rusqlite::Connection;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// Event sink recording everything the components raise.
#[derive(Default)]
pub struct RecordingSink {
    events: RefCell<Vec<QuestionnaireEvent>>,
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<QuestionnaireEvent> {
        self.events.borrow().clone()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn error_toast_count(&self) -> usize {
        self.toasts
            .borrow()
            .iter()
            .filter(|toast| toast.variant == ToastVariant::Error)
            .count()
    }

    pub fn success_toast_count(&self) -> usize {
        self.toasts
            .borrow()
            .iter()
            .filter(|toast| toast.variant == ToastVariant::Success)
            .count()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
        self.toasts.borrow_mut().clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: QuestionnaireEvent) {
        self.events.borrow_mut().push(event);
    }

    fn toast(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

/// Shared call-order log for mock stores.
#[derive(Default, Clone)]
pub struct CallLog(Rc<RefCell<Vec<String>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

#[derive(Deserialize)]
struct QuestionDef {
    text: String,
    #[serde(default)]
    help_text: Option<String>,
    #[serde(default = "default_comment_allowed")]
    comment_allowed: bool,
}

fn default_comment_allowed() -> bool {
    true
}

#[derive(Deserialize)]
struct QuestionnaireDef {
    title: String,
    questions: Vec<QuestionDef>,
}

const UAT_FIXTURE: &str = r#"{
    "title": "UAT Evaluation",
    "questions": [
        {
            "text": "I didn't experience issues related to the performance of software, hardware or network.",
            "help_text": "Covers the main database as well as the CMS connector."
        },
        {
            "text": "The documentation will be sufficient for my day to day activities after the upgrade."
        },
        {
            "text": "The tests conducted were representative of the major business processes my institution performs."
        }
    ]
}"#;

/// Seeds the UAT evaluation fixture and returns its definitions.
pub fn seed_uat_questionnaire(conn: &Connection) -> (Questionnaire, Vec<Question>) {
    let def: QuestionnaireDef =
        serde_json::from_str(UAT_FIXTURE).expect("fixture JSON should parse");

    let questionnaire = Questionnaire {
        id: Uuid::new_v4(),
        name: def.title,
        description: Some("User acceptance evaluation".to_string()),
        total_questions: def.questions.len() as u32,
    };

    let store = SqliteQuestionnaireStore::new(conn);
    store.insert_questionnaire(&questionnaire).unwrap();

    let questions: Vec<Question> = def
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| Question {
            id: Uuid::new_v4(),
            questionnaire_id: questionnaire.id,
            number: index as u32 + 1,
            text: question.text,
            help_text: question.help_text,
            comment_allowed: question.comment_allowed,
        })
        .collect();

    for question in &questions {
        store.insert_question(question).unwrap();
    }

    (questionnaire, questions)
}
