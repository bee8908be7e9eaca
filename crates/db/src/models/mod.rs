//! Row models and DTOs, one module per table (or table family).

pub mod artist;
pub mod list_entry;
pub mod mix;
pub mod track;
pub mod user;
