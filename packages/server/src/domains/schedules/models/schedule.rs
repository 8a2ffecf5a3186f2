//! Schedule model - a submission window owning its submission dates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::common::time::{from_millis, to_millis};
use crate::domains::schedules::models::submission::SubmissionDate;
use crate::persistence::entity::{EntityKind, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};

/// A submission window. The submission dates are an owned collection: each
/// root write replaces the stored child set with the in-memory one, so the
/// in-memory graph is authoritative at write time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub submissions: Vec<SubmissionDate>,
}

impl Schedule {
    /// Attach a submission date, wiring its parent reference to this
    /// schedule's identity.
    pub fn add_submission(&mut self, mut submission: SubmissionDate) {
        submission.schedule_id = Some(self.id);
        self.submissions.push(submission);
    }

    /// The explicit second query for this schedule's stored submissions.
    pub async fn load_submissions(&mut self, pool: &SqlitePool) -> Result<(), PersistenceError> {
        self.submissions = SubmissionDate::list_for_schedule(self.id, pool).await?;
        Ok(())
    }
}

impl Serializable for Schedule {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.start_date = reader
            .read_opt_number("startDate")?
            .map(|m| from_millis("startDate", m))
            .transpose()?;
        self.end_date = reader
            .read_opt_number("endDate")?
            .map(|m| from_millis("endDate", m))
            .transpose()?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_number("startDate", self.start_date.map(to_millis));
        writer.write_opt_number("endDate", self.end_date.map(to_millis));
    }
}

impl Persistable for Schedule {
    fn kind(&self) -> EntityKind {
        EntityKind::Schedule
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn owned_rows(&self) -> Vec<&dyn Persistable> {
        self.submissions
            .iter()
            .map(|s| s as &dyn Persistable)
            .collect()
    }
}
