//! Return record store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/fetch APIs for `questionnaire_returns`.
//! - Enforce return validation before SQL mutations.
//!
//! # Invariants
//! - At most one return per `(questionnaire, user)`, backed by a UNIQUE
//!   constraint.
//! - Updating a missing id is `NotFound`, never a silent no-op.

use super::{bool_to_int, int_to_bool, parse_uuid_column, StoreError, StoreResult};
use crate::model::questionnaire::QuestionnaireId;
use crate::model::questionnaire_return::{NewReturn, QuestionnaireReturn, ReturnId, UserId};
use log::info;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const RETURN_SELECT_SQL: &str = "SELECT
    uuid,
    questionnaire_id,
    answered_by,
    terms_accepted,
    submitted
FROM questionnaire_returns";

/// Store contract for return records.
pub trait ReturnStore {
    fn create_return(&self, request: &NewReturn) -> StoreResult<ReturnId>;
    fn update_return(&self, record: &QuestionnaireReturn) -> StoreResult<()>;
    fn fetch_return(&self, id: ReturnId) -> StoreResult<Option<QuestionnaireReturn>>;
    /// Looks up the single return a user may hold for a questionnaire.
    fn find_return(
        &self,
        questionnaire_id: QuestionnaireId,
        answered_by: UserId,
    ) -> StoreResult<Option<QuestionnaireReturn>>;
}

/// SQLite-backed return store.
pub struct SqliteReturnStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReturnStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ReturnStore for SqliteReturnStore<'_> {
    fn create_return(&self, request: &NewReturn) -> StoreResult<ReturnId> {
        request.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO questionnaire_returns (
                uuid,
                questionnaire_id,
                answered_by,
                terms_accepted,
                submitted
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                request.questionnaire_id.to_string(),
                request.answered_by.to_string(),
                bool_to_int(request.terms_accepted),
                bool_to_int(request.submitted),
            ],
        )?;

        info!("event=return_create module=store status=ok return_id={id}");
        Ok(id)
    }

    fn update_return(&self, record: &QuestionnaireReturn) -> StoreResult<()> {
        record.validate()?;

        let changed = self.conn.execute(
            "UPDATE questionnaire_returns
             SET
                terms_accepted = ?1,
                submitted = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?3;",
            params![
                bool_to_int(record.terms_accepted),
                bool_to_int(record.submitted),
                record.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(record.id));
        }

        info!(
            "event=return_update module=store status=ok return_id={} submitted={}",
            record.id, record.submitted
        );
        Ok(())
    }

    fn fetch_return(&self, id: ReturnId) -> StoreResult<Option<QuestionnaireReturn>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RETURN_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_return_row(row)?));
        }

        Ok(None)
    }

    fn find_return(
        &self,
        questionnaire_id: QuestionnaireId,
        answered_by: UserId,
    ) -> StoreResult<Option<QuestionnaireReturn>> {
        let mut stmt = self.conn.prepare(&format!(
            "{RETURN_SELECT_SQL}
             WHERE questionnaire_id = ?1
               AND answered_by = ?2;"
        ))?;

        let mut rows = stmt.query(params![
            questionnaire_id.to_string(),
            answered_by.to_string()
        ])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_return_row(row)?));
        }

        Ok(None)
    }
}

fn parse_return_row(row: &Row<'_>) -> StoreResult<QuestionnaireReturn> {
    let uuid_text: String = row.get("uuid")?;
    let questionnaire_text: String = row.get("questionnaire_id")?;
    let answered_by_text: String = row.get("answered_by")?;

    let record = QuestionnaireReturn {
        id: parse_uuid_column(&uuid_text, "questionnaire_returns.uuid")?,
        questionnaire_id: parse_uuid_column(
            &questionnaire_text,
            "questionnaire_returns.questionnaire_id",
        )?,
        answered_by: parse_uuid_column(&answered_by_text, "questionnaire_returns.answered_by")?,
        terms_accepted: int_to_bool(
            row.get::<_, i64>("terms_accepted")?,
            "questionnaire_returns.terms_accepted",
        )?,
        submitted: int_to_bool(
            row.get::<_, i64>("submitted")?,
            "questionnaire_returns.submitted",
        )?,
    };
    record.validate()?;
    Ok(record)
}
