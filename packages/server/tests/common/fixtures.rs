//! Test fixtures for creating persisted domain data.
//!
//! Fixtures go through the same seams production callers use: factory for
//! identity, root writer for persistence.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use classtrack_core::common::Email;
use classtrack_core::domains::courses::models::Course;
use classtrack_core::domains::projects::models::Project;
use classtrack_core::domains::schedules::models::{Schedule, SubmissionDate};
use classtrack_core::domains::terms::models::Term;
use classtrack_core::domains::users::models::User;
use classtrack_core::persistence::{Entity, EntityFactory, EntityKind, RootWriter};

pub async fn create_term(pool: &SqlitePool, name: &str) -> Result<Term> {
    let factory = EntityFactory::new(pool.clone());
    let mut term = factory
        .create(EntityKind::Term)
        .await?
        .into_term()
        .expect("factory returned wrong kind");
    term.term_name = Some(name.to_string());
    term.display_name = Some(name.to_string());
    RootWriter::new(pool.clone())
        .write_root(&Entity::Term(term.clone()))
        .await?;
    Ok(term)
}

pub async fn create_course(pool: &SqlitePool, name: &str, term_id: i64) -> Result<Course> {
    let factory = EntityFactory::new(pool.clone());
    let mut course = factory
        .create(EntityKind::Course)
        .await?
        .into_course()
        .expect("factory returned wrong kind");
    course.course_name = Some(name.to_string());
    course.term_id = Some(term_id);
    RootWriter::new(pool.clone())
        .write_root(&Entity::Course(course.clone()))
        .await?;
    Ok(course)
}

pub async fn create_project(pool: &SqlitePool, name: &str, course_id: i64) -> Result<Project> {
    let factory = EntityFactory::new(pool.clone());
    let mut project = factory
        .create(EntityKind::Project)
        .await?
        .into_project()
        .expect("factory returned wrong kind");
    project.project_name = Some(name.to_string());
    project.course_id = Some(course_id);
    RootWriter::new(pool.clone())
        .write_root(&Entity::Project(project.clone()))
        .await?;
    Ok(project)
}

pub async fn create_user(pool: &SqlitePool, email: &str) -> Result<User> {
    let factory = EntityFactory::new(pool.clone());
    let mut user = factory
        .create(EntityKind::User)
        .await?
        .into_user()
        .expect("factory returned wrong kind");
    user.email = Some(Email::new(email)?);
    user.name = Some("Test User".to_string());
    RootWriter::new(pool.clone())
        .write_root(&Entity::User(user.clone()))
        .await?;
    Ok(user)
}

/// Create a schedule with the given window and one submission row per date.
pub async fn create_schedule(
    pool: &SqlitePool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    dates: &[DateTime<Utc>],
) -> Result<Schedule> {
    let factory = EntityFactory::new(pool.clone());
    let mut schedule = factory
        .create(EntityKind::Schedule)
        .await?
        .into_schedule()
        .expect("factory returned wrong kind");
    schedule.start_date = Some(start);
    schedule.end_date = Some(end);

    for date in dates {
        let mut submission = factory
            .create(EntityKind::SubmissionDate)
            .await?
            .into_submission_date()
            .expect("factory returned wrong kind");
        submission.submission_date = Some(*date);
        schedule.add_submission(submission);
    }

    RootWriter::new(pool.clone())
        .write_root(&Entity::Schedule(schedule.clone()))
        .await?;
    Ok(schedule)
}

/// A factory-minted submission date not yet attached to any schedule.
pub async fn new_submission(pool: &SqlitePool, date: DateTime<Utc>) -> Result<SubmissionDate> {
    let factory = EntityFactory::new(pool.clone());
    let mut submission = factory
        .create(EntityKind::SubmissionDate)
        .await?
        .into_submission_date()
        .expect("factory returned wrong kind");
    submission.submission_date = Some(date);
    Ok(submission)
}
