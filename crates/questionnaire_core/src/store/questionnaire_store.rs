//! Questionnaire and question read contracts plus SQLite implementation.
//!
//! # Responsibility
//! - Provide read-only projections of questionnaire definitions.
//! - Offer seeding inserts on the SQLite implementation only; definitions
//!   are immutable through the trait.

use super::{parse_uuid_column, StoreResult};
use crate::model::questionnaire::{Question, QuestionId, Questionnaire, QuestionnaireId};
use rusqlite::{params, Connection, Row};

const QUESTION_SELECT_SQL: &str = "SELECT
    uuid,
    questionnaire_id,
    number,
    text,
    help_text,
    comment_allowed
FROM questions";

/// Read-only store contract for questionnaire definitions.
pub trait QuestionnaireStore {
    fn fetch_questionnaire(&self, id: QuestionnaireId) -> StoreResult<Option<Questionnaire>>;
    fn fetch_question(&self, id: QuestionId) -> StoreResult<Option<Question>>;
    /// Questions of one questionnaire, ordered by display number.
    fn list_questions(&self, questionnaire_id: QuestionnaireId) -> StoreResult<Vec<Question>>;
}

/// SQLite-backed questionnaire store.
pub struct SqliteQuestionnaireStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionnaireStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts a questionnaire definition. Seeding/import path only.
    pub fn insert_questionnaire(&self, questionnaire: &Questionnaire) -> StoreResult<()> {
        questionnaire.validate()?;

        self.conn.execute(
            "INSERT INTO questionnaires (uuid, name, description, total_questions)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                questionnaire.id.to_string(),
                questionnaire.name.as_str(),
                questionnaire.description.as_deref(),
                questionnaire.total_questions,
            ],
        )?;

        Ok(())
    }

    /// Inserts a question definition. Seeding/import path only.
    pub fn insert_question(&self, question: &Question) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO questions (uuid, questionnaire_id, number, text, help_text, comment_allowed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                question.id.to_string(),
                question.questionnaire_id.to_string(),
                question.number,
                question.text.as_str(),
                question.help_text.as_deref(),
                super::bool_to_int(question.comment_allowed),
            ],
        )?;

        Ok(())
    }
}

impl QuestionnaireStore for SqliteQuestionnaireStore<'_> {
    fn fetch_questionnaire(&self, id: QuestionnaireId) -> StoreResult<Option<Questionnaire>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, description, total_questions
             FROM questionnaires
             WHERE uuid = ?1;",
        )?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_questionnaire_row(row)?));
        }

        Ok(None)
    }

    fn fetch_question(&self, id: QuestionId) -> StoreResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn list_questions(&self, questionnaire_id: QuestionnaireId) -> StoreResult<Vec<Question>> {
        let mut stmt = self.conn.prepare(&format!(
            "{QUESTION_SELECT_SQL}
             WHERE questionnaire_id = ?1
             ORDER BY number ASC;"
        ))?;

        let mut rows = stmt.query(params![questionnaire_id.to_string()])?;
        let mut questions = Vec::new();

        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        Ok(questions)
    }
}

fn parse_questionnaire_row(row: &Row<'_>) -> StoreResult<Questionnaire> {
    let uuid_text: String = row.get("uuid")?;

    Ok(Questionnaire {
        id: parse_uuid_column(&uuid_text, "questionnaires.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        total_questions: row.get("total_questions")?,
    })
}

fn parse_question_row(row: &Row<'_>) -> StoreResult<Question> {
    let uuid_text: String = row.get("uuid")?;
    let questionnaire_text: String = row.get("questionnaire_id")?;

    Ok(Question {
        id: parse_uuid_column(&uuid_text, "questions.uuid")?,
        questionnaire_id: parse_uuid_column(&questionnaire_text, "questions.questionnaire_id")?,
        number: row.get("number")?,
        text: row.get("text")?,
        help_text: row.get("help_text")?,
        comment_allowed: super::int_to_bool(
            row.get::<_, i64>("comment_allowed")?,
            "questions.comment_allowed",
        )?,
    })
}
