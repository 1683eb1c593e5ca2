//! HTTP surface of the course management backend.
//!
//! Routes live under `/api/courses`. Each request opens its own SQLite unit of
//! work on a blocking worker, runs one `CoursesService` call and drops it.

pub mod config;
pub mod error;
mod routes;

use courses_core::ServiceConfig;
use std::path::PathBuf;

pub use config::AppConfig;
pub use error::ApiError;
pub use routes::{configure, API_PATH};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub service_config: ServiceConfig,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>, service_config: ServiceConfig) -> Self {
        Self {
            db_path: db_path.into(),
            service_config,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.database.path.clone(), config.courses.clone())
    }
}
