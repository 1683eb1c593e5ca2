//! Read projections returned by `CoursesService`.
//!
//! DTOs have no lifecycle of their own; they are recomputed per call.

use crate::model::course::CourseInstanceId;
use crate::model::person::Person;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary row of the semester listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInstanceDto {
    pub course_instance_id: CourseInstanceId,
    pub template_id: String,
    pub name: String,
    /// Main teacher display name, empty when the instance has none.
    pub main_teacher: String,
}

/// Basic person information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDto {
    pub ssn: String,
    pub name: String,
}

impl From<&Person> for PersonDto {
    fn from(person: &Person) -> Self {
        Self {
            ssn: person.ssn.clone(),
            name: person.name.clone(),
        }
    }
}

/// Full view of one course instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetailsDto {
    pub course_instance_id: CourseInstanceId,
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub semester: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub max_students: Option<u32>,
    pub main_teacher: String,
    pub students: Vec<PersonDto>,
}
