//! Course model (e.g. "ADAP" within a term).

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::domains::projects::models::project::Project;
use crate::persistence::entity::{Entity, EntityKind, ParentLink, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};
use crate::persistence::reader::ResultReader;

/// A course offered in one term. `term_id` is a parent reference: the root
/// writer refuses to persist a course whose term carries no identity yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub course_name: Option<String>,
    pub term_id: Option<i64>,
    /// Attached in memory only; never part of the course's own row write.
    #[serde(skip)]
    pub projects: Vec<Project>,
}

impl Course {
    /// Attach a reconstructed project to this course's in-memory graph.
    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
    }

    /// The explicit second query for this course's projects.
    pub async fn load_projects(&mut self, pool: &SqlitePool) -> Result<(), PersistenceError> {
        self.projects = Project::list_for_course(self.id, pool).await?;
        Ok(())
    }

    /// All courses referencing `term_id`, in storage order.
    pub async fn list_for_term(
        term_id: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Course>, PersistenceError> {
        let rows = sqlx::query("SELECT * FROM courses WHERE termId = ? ORDER BY id ASC")
            .bind(term_id)
            .fetch_all(pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        Ok(ResultReader::read_all(&rows, EntityKind::Course)?
            .into_iter()
            .filter_map(Entity::into_course)
            .collect())
    }
}

impl Serializable for Course {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.course_name = reader.read_opt_string("courseName")?;
        self.term_id = reader.read_opt_number("termId")?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_string("courseName", self.course_name.as_deref());
        writer.write_opt_number("termId", self.term_id);
    }
}

impl Persistable for Course {
    fn kind(&self) -> EntityKind {
        EntityKind::Course
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn parent_link(&self) -> Option<ParentLink> {
        Some(ParentLink {
            parent: EntityKind::Term,
            id: self.term_id,
        })
    }
}
