//! Inbound request models and shape validation.
//!
//! Shape validation runs at the edges (HTTP, CLI) before a request reaches
//! `CoursesService`; the service itself only enforces business rules.

use crate::model::teacher::TeacherType;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SSN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("ssn regex should compile"));

/// Shape validation failure of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// SSN is not exactly ten digits.
    InvalidSsn(String),
    /// Required text field is blank after trim.
    BlankField(&'static str),
    /// `end_date` precedes `start_date`.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// Capacity must allow at least one student.
    InvalidCapacity(u32),
}

impl RequestError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidSsn(_) => "INVALID_SSN",
            Self::BlankField(_) => "MISSING_FIELD",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            Self::InvalidCapacity(_) => "INVALID_CAPACITY",
        }
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSsn(value) => write!(f, "ssn must be ten digits, got `{value}`"),
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::InvalidDateRange { start, end } => {
                write!(f, "end date {end} is earlier than start date {start}")
            }
            Self::InvalidCapacity(value) => {
                write!(f, "max_students must be at least 1, got {value}")
            }
        }
    }
}

impl Error for RequestError {}

fn validate_ssn(ssn: &str) -> Result<(), RequestError> {
    if SSN_RE.is_match(ssn) {
        Ok(())
    } else {
        Err(RequestError::InvalidSsn(ssn.to_string()))
    }
}

fn validate_not_blank(field: &'static str, value: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        Err(RequestError::BlankField(field))
    } else {
        Ok(())
    }
}

fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), RequestError> {
    if end < start {
        Err(RequestError::InvalidDateRange { start, end })
    } else {
        Ok(())
    }
}

/// Registers a person as teacher of a course instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTeacherRequest {
    pub ssn: String,
    #[serde(rename = "type")]
    pub kind: TeacherType,
}

impl AddTeacherRequest {
    pub fn new(ssn: impl Into<String>, kind: TeacherType) -> Self {
        Self {
            ssn: ssn.into(),
            kind,
        }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        validate_ssn(&self.ssn)
    }
}

/// Identifies a student for enrollment or waiting-list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRequest {
    pub ssn: String,
}

impl StudentRequest {
    pub fn new(ssn: impl Into<String>) -> Self {
        Self { ssn: ssn.into() }
    }

    pub fn validate(&self) -> Result<(), RequestError> {
        validate_ssn(&self.ssn)
    }
}

/// Creates a new course instance from an existing template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCourseRequest {
    pub template_id: String,
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub max_students: Option<u32>,
}

impl CreateCourseRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_not_blank("template_id", &self.template_id)?;
        validate_not_blank("semester", &self.semester)?;
        validate_date_range(self.start_date, self.end_date)?;
        match self.max_students {
            Some(0) => Err(RequestError::InvalidCapacity(0)),
            _ => Ok(()),
        }
    }
}

/// Replaces the teaching period of a course instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl UpdateCourseRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        validate_date_range(self.start_date, self.end_date)
    }
}
