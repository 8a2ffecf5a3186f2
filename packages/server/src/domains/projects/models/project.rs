//! Project model.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::persistence::entity::{Entity, EntityKind, ParentLink, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};
use crate::persistence::reader::ResultReader;

/// A student project within a course. Membership rows live in
/// `user_projects` (see [`super::membership`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub project_name: Option<String>,
    pub course_id: Option<i64>,
}

impl Project {
    /// All projects referencing `course_id`, in storage order.
    pub async fn list_for_course(
        course_id: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Project>, PersistenceError> {
        let rows = sqlx::query("SELECT * FROM projects WHERE courseId = ? ORDER BY id ASC")
            .bind(course_id)
            .fetch_all(pool)
            .await
            .map_err(PersistenceError::from_sqlx)?;
        Ok(ResultReader::read_all(&rows, EntityKind::Project)?
            .into_iter()
            .filter_map(Entity::into_project)
            .collect())
    }
}

impl Serializable for Project {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.project_name = reader.read_opt_string("projectName")?;
        self.course_id = reader.read_opt_number("courseId")?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_string("projectName", self.project_name.as_deref());
        writer.write_opt_number("courseId", self.course_id);
    }
}

impl Persistable for Project {
    fn kind(&self) -> EntityKind {
        EntityKind::Project
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn parent_link(&self) -> Option<ParentLink> {
        Some(ParentLink {
            parent: EntityKind::Course,
            id: self.course_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::fields::ColumnBuffer;

    #[test]
    fn round_trip_reproduces_every_field() {
        let project = Project {
            id: 21,
            project_name: Some("group-7".to_string()),
            course_id: Some(9),
        };

        let mut emitted = ColumnBuffer::new();
        project.emit(&mut emitted);

        let mut rebuilt = Project::default();
        rebuilt.populate(&emitted).unwrap();

        let mut re_emitted = ColumnBuffer::new();
        rebuilt.emit(&mut re_emitted);
        assert_eq!(emitted.columns(), re_emitted.columns());
    }

    #[test]
    fn unparented_project_has_no_parent_identity() {
        let project = Project::default();
        assert_eq!(project.parent_link().unwrap().id, None);
    }
}
