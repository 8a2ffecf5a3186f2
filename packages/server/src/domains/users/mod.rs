pub mod machines;
pub mod models;
