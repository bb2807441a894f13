//! Answer record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/fetch APIs for `questionnaire_answers`.
//! - Keep `return_id`/`question_id` immutable after creation; update
//!   statements touch value and comment only.
//!
//! # Invariants
//! - At most one answer per `(return, question)`, backed by a UNIQUE
//!   constraint.
//! - Write paths validate that an answer carries a value or a comment.

use super::{parse_uuid_column, StoreError, StoreResult};
use crate::model::answer::{AgreementLevel, Answer, AnswerId, NewAnswer};
use crate::model::questionnaire_return::ReturnId;
use log::info;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const ANSWER_SELECT_SQL: &str = "SELECT
    uuid,
    return_id,
    question_id,
    value,
    comment
FROM questionnaire_answers";

/// Store contract for answer records.
pub trait AnswerStore {
    fn create_answer(&self, request: &NewAnswer) -> StoreResult<AnswerId>;
    /// Updates the mutable fields of an existing answer.
    fn update_answer(
        &self,
        id: AnswerId,
        value: Option<AgreementLevel>,
        comment: Option<&str>,
    ) -> StoreResult<()>;
    fn fetch_answer(&self, id: AnswerId) -> StoreResult<Option<Answer>>;
    fn list_answers(&self, return_id: ReturnId) -> StoreResult<Vec<Answer>>;
}

/// SQLite-backed answer store.
#[derive(Clone, Copy)]
pub struct SqliteAnswerStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnswerStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AnswerStore for SqliteAnswerStore<'_> {
    fn create_answer(&self, request: &NewAnswer) -> StoreResult<AnswerId> {
        request.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO questionnaire_answers (
                uuid,
                return_id,
                question_id,
                value,
                comment
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                request.return_id.to_string(),
                request.question_id.to_string(),
                request.value.map(AgreementLevel::label),
                request.comment.as_deref(),
            ],
        )?;

        info!(
            "event=answer_create module=store status=ok answer_id={id} question_id={}",
            request.question_id
        );
        Ok(id)
    }

    fn update_answer(
        &self,
        id: AnswerId,
        value: Option<AgreementLevel>,
        comment: Option<&str>,
    ) -> StoreResult<()> {
        crate::model::answer::validate_answer_content(value, comment)?;

        let changed = self.conn.execute(
            "UPDATE questionnaire_answers
             SET
                value = ?1,
                comment = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![
                value.map(AgreementLevel::label),
                comment,
                id.to_string()
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        info!("event=answer_update module=store status=ok answer_id={id}");
        Ok(())
    }

    fn fetch_answer(&self, id: AnswerId) -> StoreResult<Option<Answer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ANSWER_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_answer_row(row)?));
        }

        Ok(None)
    }

    fn list_answers(&self, return_id: ReturnId) -> StoreResult<Vec<Answer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ANSWER_SELECT_SQL}
             WHERE return_id = ?1
             ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query(params![return_id.to_string()])?;
        let mut answers = Vec::new();

        while let Some(row) = rows.next()? {
            answers.push(parse_answer_row(row)?);
        }

        Ok(answers)
    }
}

fn parse_answer_row(row: &Row<'_>) -> StoreResult<Answer> {
    let uuid_text: String = row.get("uuid")?;
    let return_text: String = row.get("return_id")?;
    let question_text: String = row.get("question_id")?;

    let value = match row.get::<_, Option<String>>("value")? {
        Some(label) => Some(AgreementLevel::parse_label(&label).ok_or_else(|| {
            StoreError::InvalidData(format!(
                "invalid agreement value `{label}` in questionnaire_answers.value"
            ))
        })?),
        None => None,
    };

    let answer = Answer {
        id: parse_uuid_column(&uuid_text, "questionnaire_answers.uuid")?,
        return_id: parse_uuid_column(&return_text, "questionnaire_answers.return_id")?,
        question_id: parse_uuid_column(&question_text, "questionnaire_answers.question_id")?,
        value,
        comment: row.get("comment")?,
    };
    answer.validate()?;
    Ok(answer)
}
