//! Root writer - the single owner of insert-vs-update decisions and write
//! order for an entity and its owned children.
//!
//! One `write_root` call is one transaction. Scalar writes are idempotent;
//! owned collections are idempotent through full-replace: the stored child
//! set is deleted and the in-memory set inserted, making the in-memory
//! graph authoritative (out-of-band child rows are discarded by design).

use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;

use crate::common::errors::PersistenceError;
use crate::persistence::entity::{Entity, EntityKind, Persistable};
use crate::persistence::fields::{ColumnBuffer, SqlValue};

pub struct RootWriter {
    pool: SqlitePool,
}

impl RootWriter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist `entity`'s current in-memory field values, inserting on
    /// first persist and updating afterwards, then full-replace any owned
    /// children. Storage-level rejections surface as `ConstraintViolation`;
    /// the transaction rolls back as one unit, no partial cleanup.
    pub async fn write_root(&self, entity: &Entity) -> Result<(), PersistenceError> {
        let root = entity.as_persistable();
        let kind = root.kind();

        if let Some(link) = root.parent_link() {
            if link.id.is_none() {
                return Err(PersistenceError::MissingParentIdentity {
                    child: kind.name(),
                    parent: link.parent.name(),
                });
            }
        }

        let mut tx = self.pool.begin().await.map_err(PersistenceError::from_sqlx)?;

        upsert_row(&mut tx, root).await?;

        if let Some(spec) = kind.owned_children() {
            replace_children(&mut tx, root, spec.kind, spec.fk_column).await?;
        }

        tx.commit().await.map_err(PersistenceError::from_sqlx)
    }

    /// Explicit removal. Dependent rows guarded by foreign keys (a term
    /// with courses, a course with projects) surface as
    /// `ConstraintViolation`; owned children cascade. Removing an absent
    /// row is a no-op.
    pub async fn remove_root(&self, kind: EntityKind, id: i64) -> Result<(), PersistenceError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        debug!(
            kind = kind.name(),
            id,
            removed = result.rows_affected(),
            "removed entity"
        );
        Ok(())
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Integer(n) => query.bind(*n),
        SqlValue::Text(s) => query.bind(s.as_str()),
        SqlValue::Null => query.bind(None::<i64>),
    }
}

async fn row_exists(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> Result<bool, PersistenceError> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", kind.table());
    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(PersistenceError::from_sqlx)?;
    Ok(count > 0)
}

async fn insert_row(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    columns: &ColumnBuffer,
) -> Result<(), PersistenceError> {
    let names: Vec<&str> = columns.columns().iter().map(|(n, _)| n.as_str()).collect();
    let placeholders = vec!["?"; names.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        kind.table(),
        names.join(", "),
        placeholders
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in columns.columns() {
        query = bind_value(query, value);
    }
    query
        .execute(conn)
        .await
        .map_err(PersistenceError::from_sqlx)?;
    Ok(())
}

async fn update_row(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
    columns: &ColumnBuffer,
) -> Result<(), PersistenceError> {
    let assignments: Vec<String> = columns
        .columns()
        .iter()
        .map(|(n, _)| format!("{n} = ?"))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?",
        kind.table(),
        assignments.join(", ")
    );

    let mut query = sqlx::query(&sql);
    for (_, value) in columns.columns() {
        query = bind_value(query, value);
    }
    query
        .bind(id)
        .execute(conn)
        .await
        .map_err(PersistenceError::from_sqlx)?;
    Ok(())
}

async fn upsert_row(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    entity: &dyn Persistable,
) -> Result<(), PersistenceError> {
    let kind = entity.kind();
    let id = entity.id();

    let mut columns = ColumnBuffer::new();
    entity.emit(&mut columns);

    if row_exists(&mut **tx, kind, id).await? {
        columns.remove("id");
        debug!(kind = kind.name(), id, "updating entity row");
        update_row(&mut **tx, kind, id, &columns).await
    } else {
        debug!(kind = kind.name(), id, "inserting entity row");
        insert_row(&mut **tx, kind, &columns).await
    }
}

/// Full-replace the stored child set of `parent` with its in-memory one.
async fn replace_children(
    tx: &mut sqlx::Transaction<'_, Sqlite>,
    parent: &dyn Persistable,
    child_kind: EntityKind,
    fk_column: &str,
) -> Result<(), PersistenceError> {
    let sql = format!("DELETE FROM {} WHERE {} = ?", child_kind.table(), fk_column);
    sqlx::query(&sql)
        .bind(parent.id())
        .execute(&mut **tx)
        .await
        .map_err(PersistenceError::from_sqlx)?;

    for child in parent.owned_rows() {
        if let Some(link) = child.parent_link() {
            if link.id.is_none() {
                return Err(PersistenceError::MissingParentIdentity {
                    child: child.kind().name(),
                    parent: link.parent.name(),
                });
            }
        }
        let mut columns = ColumnBuffer::new();
        child.emit(&mut columns);
        insert_row(&mut **tx, child_kind, &columns).await?;
    }
    Ok(())
}
