//! Core domain logic for the course management backend.
//! This crate is the single source of truth for enrollment and teaching rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ServiceConfig, DEFAULT_SEMESTER};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::course::{CourseInstance, CourseInstanceId, CourseTemplate};
pub use model::dto::{CourseDetailsDto, CourseInstanceDto, PersonDto};
pub use model::enrollment::{CourseStudent, WaitingListEntry};
pub use model::person::Person;
pub use model::request::{
    AddTeacherRequest, CreateCourseRequest, RequestError, StudentRequest, UpdateCourseRequest,
};
pub use model::teacher::{TeacherRegistration, TeacherType};
pub use repo::{
    Entity, MemoryUnitOfWork, RepoError, RepoResult, Repository, SqliteUnitOfWork, UnitOfWork,
};
pub use service::{CoursesService, ServiceError, ServiceResult, ValidationCode};
