pub mod schedule;
pub mod submission;

pub use schedule::Schedule;
pub use submission::SubmissionDate;
