//! Student Portal API - student records CRUD service backed by MongoDB

pub mod config;
pub mod error;
pub mod types;

pub mod api;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
