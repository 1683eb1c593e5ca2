//! Student enrollment and waiting-list rows.

use crate::model::course::CourseInstanceId;
use crate::repo::Entity;
use serde::{Deserialize, Serialize};

/// A student enrolled in a course instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStudent {
    #[serde(default)]
    pub id: i64,
    pub course_instance_id: CourseInstanceId,
    pub ssn: String,
}

impl CourseStudent {
    pub fn new(course_instance_id: CourseInstanceId, ssn: impl Into<String>) -> Self {
        Self {
            id: 0,
            course_instance_id,
            ssn: ssn.into(),
        }
    }
}

impl Entity for CourseStudent {
    type Key = i64;
    const NAME: &'static str = "course student";

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

/// A person queued for a course instance they are not enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingListEntry {
    #[serde(default)]
    pub id: i64,
    pub course_instance_id: CourseInstanceId,
    pub ssn: String,
}

impl WaitingListEntry {
    pub fn new(course_instance_id: CourseInstanceId, ssn: impl Into<String>) -> Self {
        Self {
            id: 0,
            course_instance_id,
            ssn: ssn.into(),
        }
    }
}

impl Entity for WaitingListEntry {
    type Key = i64;
    const NAME: &'static str = "waiting list entry";

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
