//! Shared value types and errors used across domains and the persistence
//! core.

pub mod email;
pub mod errors;
pub mod time;

pub use email::Email;
pub use errors::PersistenceError;
