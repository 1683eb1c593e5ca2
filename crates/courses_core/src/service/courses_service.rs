//! Course use-case service.
//!
//! # Responsibility
//! - Join course instances, templates, teacher registrations and persons into
//!   caller-facing projections.
//! - Enforce teacher-registration and course lifecycle rules before staging
//!   any change on the unit of work.
//!
//! # Invariants
//! - Every precondition is checked before the first staged write, so a failed
//!   call leaves the unit of work untouched.
//! - A successful mutating call ends with exactly one `save()`.
//! - `main_teacher` is never absent; it is empty when no main teacher resolves.

use crate::config::ServiceConfig;
use crate::model::course::{CourseInstance, CourseInstanceId, CourseTemplate};
use crate::model::dto::{CourseDetailsDto, CourseInstanceDto, PersonDto};
use crate::model::enrollment::{CourseStudent, WaitingListEntry};
use crate::model::person::Person;
use crate::model::request::{AddTeacherRequest, CreateCourseRequest, UpdateCourseRequest};
use crate::model::teacher::{TeacherRegistration, TeacherType};
use crate::repo::{Entity, Repository, UnitOfWork};
use crate::service::error::{ServiceError, ServiceResult, ValidationCode};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Course management facade over a unit of work.
pub struct CoursesService<U: UnitOfWork> {
    pub(super) uow: U,
    config: ServiceConfig,
}

impl<U: UnitOfWork> CoursesService<U> {
    /// Creates a service with default configuration.
    pub fn new(uow: U) -> Self {
        Self::with_config(uow, ServiceConfig::default())
    }

    pub fn with_config(uow: U, config: ServiceConfig) -> Self {
        Self { uow, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn unit_of_work(&self) -> &U {
        &self.uow
    }

    pub fn into_unit_of_work(self) -> U {
        self.uow
    }

    /// Lists the course instances taught in `semester`.
    ///
    /// An absent or empty semester resolves to the configured default.
    /// Instances whose template is missing are left out.
    pub fn list_course_instances(
        &self,
        semester: Option<&str>,
    ) -> ServiceResult<Vec<CourseInstanceDto>> {
        let semester = self.config.resolve_semester(semester);

        let instances = self.all::<CourseInstance>()?;
        let templates = self.all::<CourseTemplate>()?;
        let registrations = self.all::<TeacherRegistration>()?;
        let persons = self.all::<Person>()?;

        let templates_by_code: HashMap<&str, &CourseTemplate> = templates
            .iter()
            .map(|template| (template.course_id.as_str(), template))
            .collect();
        let main_teachers = main_teacher_names(&registrations, &persons);

        let courses: Vec<CourseInstanceDto> = instances
            .iter()
            .filter(|instance| instance.semester_id == semester)
            .filter_map(|instance| {
                let template = templates_by_code.get(instance.course_id.as_str())?;
                Some(CourseInstanceDto {
                    course_instance_id: instance.id,
                    template_id: template.course_id.clone(),
                    name: template.name.clone(),
                    main_teacher: main_teachers.get(&instance.id).cloned().unwrap_or_default(),
                })
            })
            .collect();

        debug!(
            "event=course_list module=service status=ok semester={} count={}",
            semester,
            courses.len()
        );
        Ok(courses)
    }

    /// Registers a person as main or assistant teacher of a course instance.
    ///
    /// # Errors
    /// - `NotFound` when the course instance or the person does not exist
    ///   (the course is checked first).
    /// - `COURSE_ALREADY_HAS_A_MAIN_TEACHER` when a main teacher is requested
    ///   and the course already has one, whoever it is.
    /// - `PERSON_ALREADY_REGISTERED_TEACHER_IN_COURSE` when the person already
    ///   teaches this course in any role.
    pub fn add_teacher_to_course(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &AddTeacherRequest,
    ) -> ServiceResult<PersonDto> {
        let course = self.find_course(course_instance_id)?;
        let person = self.find_person(&request.ssn)?;
        let registrations = self.all::<TeacherRegistration>()?;

        if request.kind == TeacherType::MainTeacher
            && registrations
                .iter()
                .any(|registration| registration.is_main_teacher_of(course.id))
        {
            return Err(reject(
                "teacher_register",
                course.id,
                ValidationCode::CourseAlreadyHasAMainTeacher,
            ));
        }

        if registrations.iter().any(|registration| {
            registration.course_instance_id == course.id && registration.ssn == person.ssn
        }) {
            return Err(reject(
                "teacher_register",
                course.id,
                ValidationCode::PersonAlreadyRegisteredTeacherInCourse,
            ));
        }

        let registration =
            self.stage_add(TeacherRegistration::new(course.id, &person.ssn, request.kind))?;
        self.uow.save()?;

        info!(
            "event=teacher_register module=service status=ok course_instance_id={} registration_id={} type={}",
            course.id,
            registration.id,
            registration.kind.as_str()
        );
        Ok(PersonDto::from(&person))
    }

    /// Returns the full view of one course instance.
    pub fn get_course_by_id(
        &self,
        course_instance_id: CourseInstanceId,
    ) -> ServiceResult<CourseDetailsDto> {
        let course = self.find_course(course_instance_id)?;
        self.course_details(&course)
    }

    /// Creates a course instance of an existing template.
    ///
    /// Returns the generated instance id with its detail view.
    pub fn create_course(
        &mut self,
        request: &CreateCourseRequest,
    ) -> ServiceResult<(CourseInstanceId, CourseDetailsDto)> {
        let template = self.find_template(&request.template_id)?;

        let course = self.stage_add(CourseInstance {
            id: 0,
            course_id: template.course_id,
            semester_id: request.semester.clone(),
            start_date: Some(request.start_date),
            end_date: Some(request.end_date),
            max_students: request.max_students,
        })?;
        self.uow.save()?;

        info!(
            "event=course_create module=service status=ok course_instance_id={} semester={}",
            course.id, course.semester_id
        );
        let details = self.course_details(&course)?;
        Ok((course.id, details))
    }

    /// Replaces the start and end dates of a course instance.
    pub fn update_course(
        &mut self,
        course_instance_id: CourseInstanceId,
        request: &UpdateCourseRequest,
    ) -> ServiceResult<CourseDetailsDto> {
        let mut course = self.find_course(course_instance_id)?;
        course.start_date = Some(request.start_date);
        course.end_date = Some(request.end_date);

        self.stage_update(course.clone())?;
        self.uow.save()?;

        info!(
            "event=course_update module=service status=ok course_instance_id={}",
            course.id
        );
        self.course_details(&course)
    }

    /// Deletes a course instance with its teachers, students and waiting list.
    pub fn delete_course(&mut self, course_instance_id: CourseInstanceId) -> ServiceResult<()> {
        let course = self.find_course(course_instance_id)?;

        let registration_ids: Vec<i64> = self
            .all::<TeacherRegistration>()?
            .into_iter()
            .filter(|registration| registration.course_instance_id == course.id)
            .map(|registration| registration.id)
            .collect();
        let student_ids: Vec<i64> = self
            .all::<CourseStudent>()?
            .into_iter()
            .filter(|student| student.course_instance_id == course.id)
            .map(|student| student.id)
            .collect();
        let waiting_ids: Vec<i64> = self
            .all::<WaitingListEntry>()?
            .into_iter()
            .filter(|entry| entry.course_instance_id == course.id)
            .map(|entry| entry.id)
            .collect();

        for id in &registration_ids {
            self.stage_remove::<TeacherRegistration>(id)?;
        }
        for id in &student_ids {
            self.stage_remove::<CourseStudent>(id)?;
        }
        for id in &waiting_ids {
            self.stage_remove::<WaitingListEntry>(id)?;
        }
        self.stage_remove::<CourseInstance>(&course.id)?;
        self.uow.save()?;

        info!(
            "event=course_delete module=service status=ok course_instance_id={} teachers={} students={} waiting={}",
            course.id,
            registration_ids.len(),
            student_ids.len(),
            waiting_ids.len()
        );
        Ok(())
    }

    pub(super) fn all<T: Entity>(&self) -> ServiceResult<Vec<T>>
    where
        U: Repository<T>,
    {
        Ok(Repository::<T>::all(&self.uow)?)
    }

    pub(super) fn stage_add<T: Entity>(&mut self, item: T) -> ServiceResult<T>
    where
        U: Repository<T>,
    {
        Ok(Repository::<T>::add(&mut self.uow, item)?)
    }

    pub(super) fn stage_update<T: Entity>(&mut self, item: T) -> ServiceResult<()>
    where
        U: Repository<T>,
    {
        Ok(Repository::<T>::update(&mut self.uow, item)?)
    }

    pub(super) fn stage_remove<T: Entity>(&mut self, key: &T::Key) -> ServiceResult<()>
    where
        U: Repository<T>,
    {
        Ok(Repository::<T>::remove(&mut self.uow, key)?)
    }

    pub(super) fn find_course(
        &self,
        course_instance_id: CourseInstanceId,
    ) -> ServiceResult<CourseInstance> {
        self.all::<CourseInstance>()?
            .into_iter()
            .find(|course| course.id == course_instance_id)
            .ok_or_else(|| ServiceError::not_found(CourseInstance::NAME, course_instance_id))
    }

    pub(super) fn find_person(&self, ssn: &str) -> ServiceResult<Person> {
        self.all::<Person>()?
            .into_iter()
            .find(|person| person.ssn == ssn)
            .ok_or_else(|| ServiceError::not_found(Person::NAME, ssn))
    }

    fn find_template(&self, course_id: &str) -> ServiceResult<CourseTemplate> {
        self.all::<CourseTemplate>()?
            .into_iter()
            .find(|template| template.course_id == course_id)
            .ok_or_else(|| ServiceError::not_found(CourseTemplate::NAME, course_id))
    }

    fn course_details(&self, course: &CourseInstance) -> ServiceResult<CourseDetailsDto> {
        let template = self.find_template(&course.course_id)?;
        let persons = self.all::<Person>()?;
        let registrations = self.all::<TeacherRegistration>()?;
        let main_teacher = main_teacher_names(&registrations, &persons)
            .remove(&course.id)
            .unwrap_or_default();
        let students = self.students_of(course.id, &persons)?;

        Ok(CourseDetailsDto {
            course_instance_id: course.id,
            template_id: template.course_id,
            name: template.name,
            description: template.description,
            semester: course.semester_id.clone(),
            start_date: course.start_date,
            end_date: course.end_date,
            max_students: course.max_students,
            main_teacher,
            students,
        })
    }
}

/// Maps each course instance to the name of its main teacher.
///
/// The first main-teacher registration of an instance wins. A registration
/// whose person cannot be resolved maps to an empty name.
fn main_teacher_names(
    registrations: &[TeacherRegistration],
    persons: &[Person],
) -> HashMap<CourseInstanceId, String> {
    let names_by_ssn: HashMap<&str, &str> = persons
        .iter()
        .map(|person| (person.ssn.as_str(), person.name.as_str()))
        .collect();

    let mut main_teachers = HashMap::new();
    for registration in registrations
        .iter()
        .filter(|registration| registration.kind == TeacherType::MainTeacher)
    {
        main_teachers
            .entry(registration.course_instance_id)
            .or_insert_with(|| {
                names_by_ssn
                    .get(registration.ssn.as_str())
                    .map(|name| name.to_string())
                    .unwrap_or_default()
            });
    }
    main_teachers
}

pub(super) fn reject(
    event: &str,
    course_instance_id: CourseInstanceId,
    code: ValidationCode,
) -> ServiceError {
    warn!(
        "event={} module=service status=rejected course_instance_id={} reason={}",
        event, course_instance_id, code
    );
    ServiceError::Validation(code)
}
