//! The entity capability: what the factory, root writer, and result reader
//! need from any persisted domain type.
//!
//! Each entity struct implements [`Serializable`] (field-level mapping) and
//! [`Persistable`] (identity, kind, declared relationships). The [`Entity`]
//! tagged union lets the kind-keyed seams (factory, facade, reader) hand
//! back typed values through one algorithm, without per-kind code paths.

use crate::common::errors::PersistenceError;
use crate::domains::courses::models::course::Course;
use crate::domains::projects::models::project::Project;
use crate::domains::schedules::models::schedule::Schedule;
use crate::domains::schedules::models::submission::SubmissionDate;
use crate::domains::terms::models::term::Term;
use crate::domains::users::models::user::User;
use crate::persistence::fields::{FieldReader, FieldWriter};

// ============================================================================
// Entity kinds and table metadata
// ============================================================================

/// Closed set of persisted entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Term,
    Course,
    Project,
    Schedule,
    SubmissionDate,
}

/// Declared owned-child collection of a kind (full-replace on root write).
#[derive(Debug, Clone, Copy)]
pub struct ChildSpec {
    pub kind: EntityKind,
    pub fk_column: &'static str,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::User,
        Self::Term,
        Self::Course,
        Self::Project,
        Self::Schedule,
        Self::SubmissionDate,
    ];

    /// Resolve a kind name; unregistered names fail with `UnknownKind`.
    pub fn parse(name: &str) -> Result<Self, PersistenceError> {
        match name {
            "User" => Ok(Self::User),
            "Term" => Ok(Self::Term),
            "Course" => Ok(Self::Course),
            "Project" => Ok(Self::Project),
            "Schedule" => Ok(Self::Schedule),
            "SubmissionDate" => Ok(Self::SubmissionDate),
            other => Err(PersistenceError::UnknownKind(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Term => "Term",
            Self::Course => "Course",
            Self::Project => "Project",
            Self::Schedule => "Schedule",
            Self::SubmissionDate => "SubmissionDate",
        }
    }

    pub fn table(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Term => "terms",
            Self::Course => "courses",
            Self::Project => "projects",
            Self::Schedule => "schedules",
            Self::SubmissionDate => "submissions",
        }
    }

    /// Unique non-surrogate column used by natural-key lookups.
    pub fn natural_key_column(self) -> Option<&'static str> {
        match self {
            Self::User => Some("email"),
            Self::Term => Some("termName"),
            Self::Course => Some("courseName"),
            Self::Project => Some("projectName"),
            Self::Schedule | Self::SubmissionDate => None,
        }
    }

    /// Owned-child collection, if this kind has one.
    pub fn owned_children(self) -> Option<ChildSpec> {
        match self {
            Self::Schedule => Some(ChildSpec {
                kind: Self::SubmissionDate,
                fk_column: "scheduleId",
            }),
            _ => None,
        }
    }
}

// ============================================================================
// Capability traits
// ============================================================================

/// Field-level mapping between an entity and its row projection.
pub trait Serializable {
    /// Assign every declared field from the reader's typed accessors,
    /// re-deriving domain values (Email, Status, Role) from their stored
    /// primitives.
    fn populate(&mut self, reader: &dyn FieldReader) -> Result<(), PersistenceError>;

    /// Write every declared field's primitive projection, `id` included.
    fn emit(&self, writer: &mut dyn FieldWriter);
}

/// Declared reference to a parent entity, resolved at write time.
#[derive(Debug, Clone, Copy)]
pub struct ParentLink {
    pub parent: EntityKind,
    pub id: Option<i64>,
}

/// Identity and relationship declarations on top of [`Serializable`].
pub trait Persistable: Serializable {
    fn kind(&self) -> EntityKind;
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    /// Parent reference that must carry an identity before this entity may
    /// be written.
    fn parent_link(&self) -> Option<ParentLink> {
        None
    }

    /// In-memory owned children, replaced wholesale on each root write.
    fn owned_rows(&self) -> Vec<&dyn Persistable> {
        Vec::new()
    }
}

// ============================================================================
// Tagged union over all entity kinds
// ============================================================================

/// Any persisted entity, kind-tagged.
#[derive(Debug, Clone)]
pub enum Entity {
    User(User),
    Term(Term),
    Course(Course),
    Project(Project),
    Schedule(Schedule),
    SubmissionDate(SubmissionDate),
}

impl Entity {
    /// A fresh, identity-less instance of `kind` with type-correct defaults.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::User => Self::User(User::default()),
            EntityKind::Term => Self::Term(Term::default()),
            EntityKind::Course => Self::Course(Course::default()),
            EntityKind::Project => Self::Project(Project::default()),
            EntityKind::Schedule => Self::Schedule(Schedule::default()),
            EntityKind::SubmissionDate => Self::SubmissionDate(SubmissionDate::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.as_persistable().kind()
    }

    pub fn id(&self) -> i64 {
        self.as_persistable().id()
    }

    pub fn as_persistable(&self) -> &dyn Persistable {
        match self {
            Self::User(e) => e,
            Self::Term(e) => e,
            Self::Course(e) => e,
            Self::Project(e) => e,
            Self::Schedule(e) => e,
            Self::SubmissionDate(e) => e,
        }
    }

    pub fn as_persistable_mut(&mut self) -> &mut dyn Persistable {
        match self {
            Self::User(e) => e,
            Self::Term(e) => e,
            Self::Course(e) => e,
            Self::Project(e) => e,
            Self::Schedule(e) => e,
            Self::SubmissionDate(e) => e,
        }
    }

    pub fn into_user(self) -> Option<User> {
        match self {
            Self::User(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_term(self) -> Option<Term> {
        match self {
            Self::Term(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_course(self) -> Option<Course> {
        match self {
            Self::Course(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_project(self) -> Option<Project> {
        match self {
            Self::Project(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_schedule(self) -> Option<Schedule> {
        match self {
            Self::Schedule(e) => Some(e),
            _ => None,
        }
    }

    pub fn into_submission_date(self) -> Option<SubmissionDate> {
        match self {
            Self::SubmissionDate(e) => Some(e),
            _ => None,
        }
    }
}
