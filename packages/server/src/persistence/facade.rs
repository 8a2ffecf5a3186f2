//! Identity/lookup facade - the sanctioned read path for single entities.
//!
//! Every call re-reads from storage; there is no cache. Absence is `None`,
//! never an error.

use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::persistence::entity::{Entity, EntityKind};
use crate::persistence::reader::ResultReader;

pub struct Lookup {
    pool: SqlitePool,
}

impl Lookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch one entity by primary key.
    pub async fn get_by_id(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<Option<Entity>, PersistenceError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", kind.table());
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        row.map(|r| ResultReader::read_root(&r, kind)).transpose()
    }

    /// Fetch one entity by its natural unique key (email, termName,
    /// courseName, projectName). Kinds without a natural key resolve to
    /// `None`, same as any other miss.
    pub async fn get_by_natural_key(
        &self,
        kind: EntityKind,
        key: &str,
    ) -> Result<Option<Entity>, PersistenceError> {
        let Some(column) = kind.natural_key_column() else {
            return Ok(None);
        };
        let sql = format!("SELECT * FROM {} WHERE {} = ?", kind.table(), column);
        let row = sqlx::query(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        row.map(|r| ResultReader::read_root(&r, kind)).transpose()
    }

    /// Cheap volume check, used by callers deciding whether to seed
    /// default data.
    pub async fn count_of_kind(&self, kind: EntityKind) -> Result<i64, PersistenceError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(PersistenceError::from_sqlx)
    }
}
