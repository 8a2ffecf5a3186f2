//! Abstract column accessors.
//!
//! Entities never touch rows or SQL directly: they populate themselves from
//! a [`FieldReader`] and emit themselves into a [`FieldWriter`], both keyed
//! by column name and semantic type (number, string, nullable variants).
//! The physical representation (a live `SqliteRow` on the way in, an
//! ordered column buffer on the way out) stays behind these traits.

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::common::errors::PersistenceError;

/// Typed read access to one row's named fields.
///
/// A type-incompatible column fails with `MalformedRow`: a schema/entity
/// mapping mismatch is surfaced, never coerced.
pub trait FieldReader {
    fn read_opt_number(&self, field: &str) -> Result<Option<i64>, PersistenceError>;
    fn read_opt_string(&self, field: &str) -> Result<Option<String>, PersistenceError>;

    fn read_number(&self, field: &str) -> Result<i64, PersistenceError> {
        self.read_opt_number(field)?
            .ok_or_else(|| PersistenceError::malformed(field, "unexpected NULL"))
    }

    fn read_string(&self, field: &str) -> Result<String, PersistenceError> {
        self.read_opt_string(field)?
            .ok_or_else(|| PersistenceError::malformed(field, "unexpected NULL"))
    }
}

/// Typed write access to one row's named fields.
///
/// Domain null is written as storage null, never as an empty string or zero.
pub trait FieldWriter {
    fn write_opt_number(&mut self, field: &str, value: Option<i64>);
    fn write_opt_string(&mut self, field: &str, value: Option<&str>);

    fn write_number(&mut self, field: &str, value: i64) {
        self.write_opt_number(field, Some(value));
    }

    fn write_string(&mut self, field: &str, value: &str) {
        self.write_opt_string(field, Some(value));
    }
}

// ============================================================================
// Primitive column values
// ============================================================================

/// The primitive projection of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
    Null,
}

// ============================================================================
// Reader over a live sqlx row
// ============================================================================

/// [`FieldReader`] over a raw query result row.
pub struct SqliteRowReader<'r> {
    row: &'r SqliteRow,
}

impl<'r> SqliteRowReader<'r> {
    pub fn new(row: &'r SqliteRow) -> Self {
        Self { row }
    }
}

impl FieldReader for SqliteRowReader<'_> {
    fn read_opt_number(&self, field: &str) -> Result<Option<i64>, PersistenceError> {
        self.row
            .try_get::<Option<i64>, _>(field)
            .map_err(|e| PersistenceError::malformed(field, e.to_string()))
    }

    fn read_opt_string(&self, field: &str) -> Result<Option<String>, PersistenceError> {
        self.row
            .try_get::<Option<String>, _>(field)
            .map_err(|e| PersistenceError::malformed(field, e.to_string()))
    }
}

// ============================================================================
// Column buffer: writer target, re-readable
// ============================================================================

/// Ordered collection of emitted columns.
///
/// The root writer turns a buffer into INSERT/UPDATE statements; because the
/// buffer also implements [`FieldReader`], an emitted entity can be
/// re-populated without touching storage, which is what the round-trip law
/// tests exercise.
#[derive(Debug, Default, Clone)]
pub struct ColumnBuffer {
    columns: Vec<(String, SqlValue)>,
}

impl ColumnBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns in emit order.
    pub fn columns(&self) -> &[(String, SqlValue)] {
        &self.columns
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Drop one column (the root writer strips `id` before building SET
    /// clauses).
    pub fn remove(&mut self, field: &str) -> Option<SqlValue> {
        let idx = self.columns.iter().position(|(name, _)| name == field)?;
        Some(self.columns.remove(idx).1)
    }

    fn push(&mut self, field: &str, value: SqlValue) {
        // Last write wins, mirroring a row's single slot per column.
        if let Some(slot) = self
            .columns
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
        {
            *slot = value;
        } else {
            self.columns.push((field.to_string(), value));
        }
    }
}

impl FieldWriter for ColumnBuffer {
    fn write_opt_number(&mut self, field: &str, value: Option<i64>) {
        self.push(field, value.map_or(SqlValue::Null, SqlValue::Integer));
    }

    fn write_opt_string(&mut self, field: &str, value: Option<&str>) {
        self.push(
            field,
            value.map_or(SqlValue::Null, |s| SqlValue::Text(s.to_string())),
        );
    }
}

impl FieldReader for ColumnBuffer {
    fn read_opt_number(&self, field: &str) -> Result<Option<i64>, PersistenceError> {
        match self.get(field) {
            Some(SqlValue::Integer(n)) => Ok(Some(*n)),
            Some(SqlValue::Null) | None => Ok(None),
            Some(SqlValue::Text(_)) => {
                Err(PersistenceError::malformed(field, "expected INTEGER, found TEXT"))
            }
        }
    }

    fn read_opt_string(&self, field: &str) -> Result<Option<String>, PersistenceError> {
        match self.get(field) {
            Some(SqlValue::Text(s)) => Ok(Some(s.clone())),
            Some(SqlValue::Null) | None => Ok(None),
            Some(SqlValue::Integer(_)) => {
                Err(PersistenceError::malformed(field, "expected TEXT, found INTEGER"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_preserves_emit_order() {
        let mut buf = ColumnBuffer::new();
        buf.write_number("id", 7);
        buf.write_string("name", "ada");
        buf.write_opt_string("email", None);

        let names: Vec<&str> = buf.columns().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["id", "name", "email"]);
    }

    #[test]
    fn null_stays_null_not_sentinel() {
        let mut buf = ColumnBuffer::new();
        buf.write_opt_string("email", None);
        assert_eq!(buf.get("email"), Some(&SqlValue::Null));
        assert_eq!(buf.read_opt_string("email").unwrap(), None);
    }

    #[test]
    fn rewrite_overwrites_in_place() {
        let mut buf = ColumnBuffer::new();
        buf.write_number("id", 1);
        buf.write_number("id", 2);
        assert_eq!(buf.columns().len(), 1);
        assert_eq!(buf.read_number("id").unwrap(), 2);
    }

    #[test]
    fn type_mismatch_is_malformed_row() {
        let mut buf = ColumnBuffer::new();
        buf.write_string("id", "seven");
        assert!(matches!(
            buf.read_opt_number("id"),
            Err(PersistenceError::MalformedRow { .. })
        ));
    }

    #[test]
    fn missing_required_field_is_malformed_row() {
        let buf = ColumnBuffer::new();
        assert!(buf.read_string("name").is_err());
    }
}
