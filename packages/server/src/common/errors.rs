//! Error taxonomy for the persistence core.
//!
//! Every fallible operation in the core surfaces one of these variants
//! unmodified; callers (managers/controllers) translate them into
//! user-facing messages. "Not found" is never an error; lookup paths
//! return `Option` instead.

use thiserror::Error;

/// Errors raised by the persistence core.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// A state-machine value was seeded with a tag outside its enumeration.
    #[error("invalid initial {machine} value: {value:?}")]
    InvalidInitialValue { machine: &'static str, value: String },

    /// A state change was attempted that the transition table does not allow.
    #[error("illegal {machine} transition: {from} -> {to}")]
    InvalidTransition {
        machine: &'static str,
        from: &'static str,
        to: &'static str,
    },

    /// The entity factory was asked for a kind it has no mapping for.
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// A child write was attempted before its parent carries an identity.
    #[error("cannot persist {child}: its {parent} reference has no identity")]
    MissingParentIdentity {
        child: &'static str,
        parent: &'static str,
    },

    /// Storage rejected a write due to a data-integrity rule (duplicate
    /// natural key, submission-date window breach, dependent rows on delete).
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Reconstruction found a field of unexpected shape: a schema/entity
    /// mapping mismatch, never silently coerced.
    #[error("malformed row: field {field:?}: {detail}")]
    MalformedRow { field: String, detail: String },

    /// Storage fault that is not a data-integrity rejection (I/O, pool).
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl PersistenceError {
    pub fn malformed(field: &str, detail: impl Into<String>) -> Self {
        Self::MalformedRow {
            field: field.to_string(),
            detail: detail.into(),
        }
    }

    /// Classify an sqlx error: SQLITE_CONSTRAINT family (unique, foreign
    /// key, NOT NULL, trigger RAISE(ABORT)) becomes `ConstraintViolation`,
    /// everything else passes through as `Database`.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let is_constraint = matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::UniqueViolation
                    | sqlx::error::ErrorKind::ForeignKeyViolation
                    | sqlx::error::ErrorKind::NotNullViolation
                    | sqlx::error::ErrorKind::CheckViolation
            ) || db_err
                .code()
                .and_then(|c| c.parse::<u32>().ok())
                // SQLite primary result code 19 = SQLITE_CONSTRAINT; extended
                // codes (trigger aborts included) keep it in the low byte.
                .is_some_and(|c| c & 0xff == 19);

            if is_constraint {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_transition() {
        let err = PersistenceError::InvalidTransition {
            machine: "Status",
            from: "removed",
            to: "confirmed",
        };
        assert_eq!(err.to_string(), "illegal Status transition: removed -> confirmed");
    }

    #[test]
    fn unknown_kind_displays_the_name_unquoted() {
        let err = PersistenceError::UnknownKind("Invoice".to_string());
        assert_eq!(err.to_string(), "unknown entity kind: Invoice");
    }

    #[test]
    fn malformed_row_carries_field_name() {
        let err = PersistenceError::malformed("email", "expected TEXT");
        assert!(err.to_string().contains("email"));
    }
}
