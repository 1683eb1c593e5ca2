//! Course templates and their per-semester instances.
//!
//! # Invariants
//! - `CourseInstance::course_id` references an existing `CourseTemplate`.
//! - `end_date` is not earlier than `start_date` when both are set.
//! - `max_students = None` means the instance has no capacity limit.

use crate::repo::Entity;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric identifier of a course instance.
pub type CourseInstanceId = i64;

/// Reusable definition of a course, independent of when it is taught.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseTemplate {
    /// Course code, e.g. `T-514-VEFT`.
    pub course_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CourseTemplate {
    pub fn new(
        course_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

impl Entity for CourseTemplate {
    type Key = String;
    const NAME: &'static str = "course template";

    fn key(&self) -> String {
        self.course_id.clone()
    }
}

/// One offering of a template in a given semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInstance {
    /// Generated on insert when `0`.
    #[serde(default)]
    pub id: CourseInstanceId,
    /// Template course code.
    pub course_id: String,
    /// Opaque semester token, e.g. `20153`.
    pub semester_id: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub max_students: Option<u32>,
}

impl CourseInstance {
    /// Creates an undated instance without a capacity limit.
    pub fn new(
        id: CourseInstanceId,
        course_id: impl Into<String>,
        semester_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            course_id: course_id.into(),
            semester_id: semester_id.into(),
            start_date: None,
            end_date: None,
            max_students: None,
        }
    }

    /// Returns whether `enrolled` students already fill this instance.
    pub fn is_full(&self, enrolled: usize) -> bool {
        self.max_students
            .is_some_and(|capacity| enrolled >= capacity as usize)
    }
}

impl Entity for CourseInstance {
    type Key = CourseInstanceId;
    const NAME: &'static str = "course instance";

    fn key(&self) -> CourseInstanceId {
        self.id
    }

    fn surrogate_id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn set_surrogate_id(&mut self, id: i64) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::CourseInstance;

    #[test]
    fn instance_without_capacity_is_never_full() {
        let instance = CourseInstance::new(1, "T-111-PROG", "20153");
        assert!(!instance.is_full(10_000));
    }

    #[test]
    fn instance_is_full_once_capacity_is_reached() {
        let mut instance = CourseInstance::new(1, "T-111-PROG", "20153");
        instance.max_students = Some(2);
        assert!(!instance.is_full(1));
        assert!(instance.is_full(2));
    }
}
