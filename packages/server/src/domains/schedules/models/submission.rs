//! Submission date model - a child row owned by a schedule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::common::time::{from_millis, to_millis};
use crate::persistence::entity::{Entity, EntityKind, ParentLink, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};
use crate::persistence::reader::ResultReader;

/// One submission deadline inside a schedule's window. Storage rejects
/// dates outside `[startDate, endDate]` and duplicates within a schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionDate {
    pub id: i64,
    pub schedule_id: Option<i64>,
    pub submission_date: Option<DateTime<Utc>>,
}

impl SubmissionDate {
    /// All submission rows of a schedule, in storage order.
    pub async fn list_for_schedule(
        schedule_id: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>, PersistenceError> {
        let rows = sqlx::query("SELECT * FROM submissions WHERE scheduleId = ? ORDER BY submissionDate ASC")
            .bind(schedule_id)
            .fetch_all(pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        Ok(ResultReader::read_all(&rows, EntityKind::SubmissionDate)?
            .into_iter()
            .filter_map(Entity::into_submission_date)
            .collect())
    }
}

impl Serializable for SubmissionDate {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.schedule_id = reader.read_opt_number("scheduleId")?;
        self.submission_date = reader
            .read_opt_number("submissionDate")?
            .map(|m| from_millis("submissionDate", m))
            .transpose()?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_number("scheduleId", self.schedule_id);
        writer.write_opt_number("submissionDate", self.submission_date.map(to_millis));
    }
}

impl Persistable for SubmissionDate {
    fn kind(&self) -> EntityKind {
        EntityKind::SubmissionDate
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn parent_link(&self) -> Option<ParentLink> {
        Some(ParentLink {
            parent: EntityKind::Schedule,
            id: self.schedule_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::date_utc;
    use crate::persistence::fields::ColumnBuffer;

    #[test]
    fn round_trip_reproduces_every_field() {
        let submission = SubmissionDate {
            id: 5,
            schedule_id: Some(2),
            submission_date: date_utc(2022, 1, 1),
        };

        let mut emitted = ColumnBuffer::new();
        submission.emit(&mut emitted);

        let mut rebuilt = SubmissionDate::default();
        rebuilt.populate(&emitted).unwrap();

        let mut re_emitted = ColumnBuffer::new();
        rebuilt.emit(&mut re_emitted);
        assert_eq!(emitted.columns(), re_emitted.columns());
    }
}
