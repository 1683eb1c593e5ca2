//! Student enrollment and waiting-list use-cases.
//!
//! # Invariants
//! - A person is enrolled at most once per course instance.
//! - A person is on a course's waiting list at most once, and never while
//!   enrolled in that course.
//! - Enrolling a waiting student removes their waiting-list entry in the same
//!   unit of work.

use crate::model::course::CourseInstanceId;
use crate::model::dto::PersonDto;
use crate::model::enrollment::{CourseStudent, WaitingListEntry};
use crate::model::person::Person;
use crate::model::request::StudentRequest;
use crate::repo::{Entity, UnitOfWork};
use crate::service::courses_service::{reject, CoursesService};
use crate::service::error::{ServiceError, ServiceResult, ValidationCode};
use log::{info, warn};
use std::collections::HashMap;

impl<U: UnitOfWork> CoursesService<U> {
    /// Lists the students enrolled in a course instance.
    pub fn students_in_course(
        &self,
        course_instance_id: CourseInstanceId,
    ) -> ServiceResult<Vec<PersonDto>> {
        let course = self.find_course(course_instance_id)?;
        let persons = self.all::<Person>()?;
        self.students_of(course.id, &persons)
    }

    /// Lists the persons waiting for a place in a course instance.
    pub fn waiting_list(
        &self,
        course_instance_id: CourseInstanceId,
    ) -> ServiceResult<Vec<PersonDto>> {
        let course = self.find_course(course_instance_id)?;
        let persons = self.all::<Person>()?;
        let waiting_ssns: Vec<String> = self
            .all::<WaitingListEntry>()?
            .into_iter()
            .filter(|entry| entry.course_instance_id == course.id)
            .map(|entry| entry.ssn)
            .collect();
        Ok(resolve_persons(&waiting_ssns, &persons))
    }

    /// Enrolls a person in a course instance.
    ///
    /// # Errors
    /// - `NotFound` when the course or the person does not exist.
    /// - `BadRequest(STUDENT_ALREADY_IN_COURSE)` when already enrolled.
    /// - `Validation(COURSE_IS_FULL)` when the capacity is reached.
    pub fn add_student_to_course(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &StudentRequest,
    ) -> ServiceResult<PersonDto> {
        let course = self.find_course(course_instance_id)?;
        let person = self.find_person(&request.ssn)?;
        let enrolled: Vec<CourseStudent> = self
            .all::<CourseStudent>()?
            .into_iter()
            .filter(|student| student.course_instance_id == course.id)
            .collect();

        if enrolled.iter().any(|student| student.ssn == person.ssn) {
            warn!(
                "event=student_enroll module=service status=rejected course_instance_id={} reason={}",
                course.id,
                ValidationCode::StudentAlreadyInCourse
            );
            return Err(ServiceError::BadRequest(
                ValidationCode::StudentAlreadyInCourse,
            ));
        }
        if course.is_full(enrolled.len()) {
            return Err(reject(
                "student_enroll",
                course.id,
                ValidationCode::CourseIsFull,
            ));
        }

        let waiting_entry = self
            .all::<WaitingListEntry>()?
            .into_iter()
            .find(|entry| entry.course_instance_id == course.id && entry.ssn == person.ssn);

        let student = self.stage_add(CourseStudent::new(course.id, &person.ssn))?;
        if let Some(entry) = &waiting_entry {
            self.stage_remove::<WaitingListEntry>(&entry.id)?;
        }
        self.uow.save()?;

        info!(
            "event=student_enroll module=service status=ok course_instance_id={} enrollment_id={} left_waiting_list={}",
            course.id,
            student.id,
            waiting_entry.is_some()
        );
        Ok(PersonDto::from(&person))
    }

    /// Puts a person on the waiting list of a course instance.
    ///
    /// # Errors
    /// - `NotFound` when the course or the person does not exist.
    /// - `Validation(STUDENT_ALREADY_IN_COURSE)` when already enrolled.
    /// - `Validation(STUDENT_ALREADY_ON_WAITING_LIST)` when already waiting.
    pub fn add_student_to_waiting_list(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &StudentRequest,
    ) -> ServiceResult<PersonDto> {
        let course = self.find_course(course_instance_id)?;
        let person = self.find_person(&request.ssn)?;

        let is_enrolled = self
            .all::<CourseStudent>()?
            .iter()
            .any(|student| student.course_instance_id == course.id && student.ssn == person.ssn);
        if is_enrolled {
            return Err(reject(
                "waiting_list_add",
                course.id,
                ValidationCode::StudentAlreadyInCourse,
            ));
        }

        let is_waiting = self
            .all::<WaitingListEntry>()?
            .iter()
            .any(|entry| entry.course_instance_id == course.id && entry.ssn == person.ssn);
        if is_waiting {
            return Err(reject(
                "waiting_list_add",
                course.id,
                ValidationCode::StudentAlreadyOnWaitingList,
            ));
        }

        let entry = self.stage_add(WaitingListEntry::new(course.id, &person.ssn))?;
        self.uow.save()?;

        info!(
            "event=waiting_list_add module=service status=ok course_instance_id={} entry_id={}",
            course.id, entry.id
        );
        Ok(PersonDto::from(&person))
    }

    /// Removes an enrolled student from a course instance.
    ///
    /// Fails with `NotFound` when the course does not exist or the person is
    /// not enrolled in it.
    pub fn remove_student_from_course(
        &mut self,
        course_instance_id: CourseInstanceId,
        ssn: &str,
    ) -> ServiceResult<()> {
        let course = self.find_course(course_instance_id)?;
        let student = self
            .all::<CourseStudent>()?
            .into_iter()
            .find(|student| student.course_instance_id == course.id && student.ssn == ssn)
            .ok_or_else(|| {
                ServiceError::not_found(CourseStudent::NAME, format!("{}/{ssn}", course.id))
            })?;

        self.stage_remove::<CourseStudent>(&student.id)?;
        self.uow.save()?;

        info!(
            "event=student_remove module=service status=ok course_instance_id={} enrollment_id={}",
            course.id, student.id
        );
        Ok(())
    }

    pub(super) fn students_of(
        &self,
        course_instance_id: CourseInstanceId,
        persons: &[Person],
    ) -> ServiceResult<Vec<PersonDto>> {
        let student_ssns: Vec<String> = self
            .all::<CourseStudent>()?
            .into_iter()
            .filter(|student| student.course_instance_id == course_instance_id)
            .map(|student| student.ssn)
            .collect();
        Ok(resolve_persons(&student_ssns, persons))
    }
}

/// Resolves SSNs to person projections, keeping order and skipping unknowns.
fn resolve_persons(ssns: &[String], persons: &[Person]) -> Vec<PersonDto> {
    let persons_by_ssn: HashMap<&str, &Person> = persons
        .iter()
        .map(|person| (person.ssn.as_str(), person))
        .collect();
    ssns.iter()
        .filter_map(|ssn| persons_by_ssn.get(ssn.as_str()))
        .map(|person| PersonDto::from(*person))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::resolve_persons;
    use crate::model::person::Person;

    #[test]
    fn resolve_persons_keeps_order_and_skips_unknown_ssns() {
        let persons = vec![
            Person::new("1111111111", "First", ""),
            Person::new("2222222222", "Second", ""),
        ];
        let ssns = vec![
            "2222222222".to_string(),
            "9999999999".to_string(),
            "1111111111".to_string(),
        ];

        let names: Vec<String> = resolve_persons(&ssns, &persons)
            .into_iter()
            .map(|person| person.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }
}
