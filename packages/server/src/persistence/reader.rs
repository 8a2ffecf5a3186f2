//! Result reader - reconstructs typed entities from raw query rows.
//!
//! Reconstruction is flat: nested relationships are never resolved here.
//! Managers issue their own second query and attach the results
//! (`add_course`, `add_project`, `add_submission`), which keeps every call
//! boundable and free of hidden fan-out.

use sqlx::sqlite::SqliteRow;

use crate::common::errors::PersistenceError;
use crate::persistence::entity::{Entity, EntityKind};
use crate::persistence::fields::SqliteRowReader;

pub struct ResultReader;

impl ResultReader {
    /// Reconstruct exactly one entity of `kind` from a raw row.
    pub fn read_root(row: &SqliteRow, kind: EntityKind) -> Result<Entity, PersistenceError> {
        let mut entity = Entity::empty(kind);
        entity
            .as_persistable_mut()
            .populate(&SqliteRowReader::new(row))?;
        Ok(entity)
    }

    /// Reconstruct a sequence, preserving the underlying query's row order.
    pub fn read_all(rows: &[SqliteRow], kind: EntityKind) -> Result<Vec<Entity>, PersistenceError> {
        rows.iter().map(|row| Self::read_root(row, kind)).collect()
    }
}
