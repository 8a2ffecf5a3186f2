//! Entity factory - mints identity-bearing empty instances.
//!
//! Identity comes from a per-kind sequence row bumped in a single atomic
//! UPSERT, so reservation is linearizable across concurrent callers without
//! any in-process counter, and ids are never reused after deletion. The
//! instance itself stays invisible to lookups until its first root write.

use sqlx::SqlitePool;
use tracing::debug;

use crate::common::errors::PersistenceError;
use crate::persistence::entity::{Entity, EntityKind};

pub struct EntityFactory {
    pool: SqlitePool,
}

impl EntityFactory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reserve an identity for `kind` and return a typed, empty instance
    /// with the id already set and every scalar at its type-correct default.
    pub async fn create(&self, kind: EntityKind) -> Result<Entity, PersistenceError> {
        let id = self.reserve_id(kind).await?;
        let mut entity = Entity::empty(kind);
        entity.as_persistable_mut().set_id(id);
        debug!(kind = kind.name(), id, "reserved entity identity");
        Ok(entity)
    }

    /// Kind-by-name entry point; unregistered names fail with `UnknownKind`.
    pub async fn create_named(&self, kind_name: &str) -> Result<Entity, PersistenceError> {
        self.create(EntityKind::parse(kind_name)?).await
    }

    async fn reserve_id(&self, kind: EntityKind) -> Result<i64, PersistenceError> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO entity_ids (kind, nextId) VALUES (?, 1)
             ON CONFLICT (kind) DO UPDATE SET nextId = nextId + 1
             RETURNING nextId",
        )
        .bind(kind.name())
        .fetch_one(&self.pool)
        .await
        .map_err(PersistenceError::from_sqlx)
    }
}
