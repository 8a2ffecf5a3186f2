pub mod membership;
pub mod project;

pub use membership::ProjectMembership;
pub use project::Project;
