// Classtrack - Course & Project Tracking Core
//
// This crate is the persistence core of a teaching web application managing
// terms, courses, projects, schedules, and users. HTTP handlers, email
// delivery, and auth token mechanics live in sibling services and consume
// this crate only through the persistence seams (factory, root writer,
// result reader, lookup facade) and the domain models.

pub mod common;
pub mod config;
pub mod data_migrations;
pub mod domains;
pub mod persistence;

pub use config::*;
