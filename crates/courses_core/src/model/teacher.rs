//! Teacher registrations linking persons to course instances.
//!
//! # Invariants
//! - At most one `MainTeacher` registration per course instance.
//! - At most one registration (any role) per course instance and SSN.

use crate::model::course::CourseInstanceId;
use crate::repo::Entity;
use serde::{Deserialize, Serialize};

/// Role of a teacher within one course instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherType {
    /// Primary responsibility; at most one per instance.
    MainTeacher,
    /// Secondary role; several allowed.
    AssistantTeacher,
}

impl TeacherType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MainTeacher => "main_teacher",
            Self::AssistantTeacher => "assistant_teacher",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRegistration {
    /// Generated on insert when `0`.
    #[serde(default)]
    pub id: i64,
    pub course_instance_id: CourseInstanceId,
    pub ssn: String,
    #[serde(rename = "type")]
    pub kind: TeacherType,
}

impl TeacherRegistration {
    /// Creates a registration whose id is assigned on insert.
    pub fn new(
        course_instance_id: CourseInstanceId,
        ssn: impl Into<String>,
        kind: TeacherType,
    ) -> Self {
        Self {
            id: 0,
            course_instance_id,
            ssn: ssn.into(),
            kind,
        }
    }

    pub fn is_main_teacher_of(&self, course_instance_id: CourseInstanceId) -> bool {
        self.course_instance_id == course_instance_id && self.kind == TeacherType::MainTeacher
    }
}

impl Entity for TeacherRegistration {
    type Key = i64;
    const NAME: &'static str = "teacher registration";

    fn key(&self) -> i64 {
        self.id
    }

    fn surrogate_id(&self) -> Option<i64> {
        Some(self.id)
    }

    fn set_surrogate_id(&mut self, id: i64) {
        self.id = id;
    }
}
