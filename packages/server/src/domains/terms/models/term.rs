//! Term model (e.g. "WS2425").

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::errors::PersistenceError;
use crate::domains::courses::models::course::Course;
use crate::persistence::entity::{EntityKind, Persistable, Serializable};
use crate::persistence::fields::{FieldReader, FieldWriter};

/// An academic term. Courses are a reference relationship: they are loaded
/// by an explicit second query and attached via [`Term::add_course`], not
/// resolved automatically on reconstruction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Term {
    pub id: i64,
    pub term_name: Option<String>,
    pub display_name: Option<String>,
    /// Attached in memory only; never part of the term's own row write.
    #[serde(skip)]
    pub courses: Vec<Course>,
}

impl Term {
    /// Attach a reconstructed course to this term's in-memory graph.
    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    /// The explicit second query for this term's courses.
    pub async fn load_courses(&mut self, pool: &SqlitePool) -> Result<(), PersistenceError> {
        self.courses = Course::list_for_term(self.id, pool).await?;
        Ok(())
    }
}

impl Serializable for Term {
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError> {
        self.id = reader.read_number("id")?;
        self.term_name = reader.read_opt_string("termName")?;
        self.display_name = reader.read_opt_string("displayName")?;
        Ok(())
    }

    fn emit(&self, writer: &mut dyn FieldWriter) {
        writer.write_number("id", self.id);
        writer.write_opt_string("termName", self.term_name.as_deref());
        writer.write_opt_string("displayName", self.display_name.as_deref());
    }
}

impl Persistable for Term {
    fn kind(&self) -> EntityKind {
        EntityKind::Term
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
