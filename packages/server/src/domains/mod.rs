//! Domain modules: one per aggregate, each with its models (and state
//! machines where the domain has them).

pub mod courses;
pub mod projects;
pub mod schedules;
pub mod terms;
pub mod users;
