//! The object-relational persistence core.
//!
//! Entities cross the storage boundary through exactly these seams:
//! [`factory::EntityFactory`] mints identity, [`writer::RootWriter`]
//! persists an entity and its owned children, [`reader::ResultReader`]
//! reconstructs entities from rows, and [`facade::Lookup`] is the single
//! sanctioned single-entity read path.

pub mod db;
pub mod entity;
pub mod facade;
pub mod factory;
pub mod fields;
pub mod reader;
pub mod writer;

pub use entity::{Entity, EntityKind, Persistable, Serializable};
pub use facade::Lookup;
pub use factory::EntityFactory;
pub use reader::ResultReader;
pub use writer::RootWriter;
