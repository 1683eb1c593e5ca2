//! Domain records, projections and request models for course management.
//!
//! # Responsibility
//! - Define the entity rows stored behind the unit of work.
//! - Define the DTO projections returned to callers.
//! - Define request models and their shape validation.
//!
//! # Invariants
//! - Entities carry data and identity only; business rules live in services.

pub mod course;
pub mod dto;
pub mod enrollment;
pub mod person;
pub mod request;
pub mod teacher;
