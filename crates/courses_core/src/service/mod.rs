//! Core use-case services.
//!
//! # Responsibility
//! - Join and validate against unit-of-work state.
//! - Keep HTTP and CLI layers decoupled from storage details.

pub mod courses_service;
mod enrollment;
mod error;

pub use courses_service::CoursesService;
pub use error::{ServiceError, ServiceResult, ValidationCode};
