//! Storage layer for student records

mod student_store;

pub use student_store::{StudentStore, SEARCHED_FIELDS};
