//! Project membership - the `user_projects` join table.
//!
//! Membership rows are keyed by `(userId, projectId)` and are not one of
//! the factory-minted entity kinds; they are managed through these direct
//! model methods instead of the root-writer path.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;

/// One user's membership in one project.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMembership {
    #[sqlx(rename = "userId")]
    pub user_id: i64,
    #[sqlx(rename = "projectId")]
    pub project_id: i64,
    pub role: Option<String>,
    pub url: Option<String>,
}

impl ProjectMembership {
    /// Assign a user to a project. A duplicate assignment or a dangling
    /// user/project reference surfaces as `ConstraintViolation`.
    pub async fn assign(&self, pool: &SqlitePool) -> Result<(), PersistenceError> {
        sqlx::query(
            "INSERT INTO user_projects (userId, projectId, role, url) VALUES (?, ?, ?, ?)",
        )
        .bind(self.user_id)
        .bind(self.project_id)
        .bind(self.role.as_deref())
        .bind(self.url.as_deref())
        .execute(pool)
        .await
        .map_err(PersistenceError::from_sqlx)?;
        Ok(())
    }

    /// All memberships of a project.
    pub async fn list_for_project(
        project_id: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>, PersistenceError> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_projects WHERE projectId = ?")
            .bind(project_id)
            .fetch_all(pool)
            .await
            .map_err(PersistenceError::from_sqlx)
    }

    /// All memberships of a user.
    pub async fn list_for_user(
        user_id: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>, PersistenceError> {
        sqlx::query_as::<_, Self>("SELECT * FROM user_projects WHERE userId = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(PersistenceError::from_sqlx)
    }

    /// Remove one membership. Removing an absent membership is a no-op.
    pub async fn remove(
        user_id: i64,
        project_id: i64,
        pool: &SqlitePool,
    ) -> Result<(), PersistenceError> {
        sqlx::query("DELETE FROM user_projects WHERE userId = ? AND projectId = ?")
            .bind(user_id)
            .bind(project_id)
            .execute(pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        Ok(())
    }
}
