//! Reference-data import from a JSON document.
//!
//! # Invariants
//! - Rows are staged parents first and committed with a single `save()`.
//! - A failed import leaves the database unchanged.

use courses_core::{
    CourseInstance, CourseTemplate, Entity, Person, RepoResult, Repository, SqliteUnitOfWork,
    TeacherRegistration, UnitOfWork,
};
use log::info;
use serde::{Deserialize, Serialize};

/// Seed document layout; every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub persons: Vec<Person>,
    pub course_templates: Vec<CourseTemplate>,
    pub course_instances: Vec<CourseInstance>,
    pub teacher_registrations: Vec<TeacherRegistration>,
}

/// Row counts written by one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub persons: usize,
    pub course_templates: usize,
    pub course_instances: usize,
    pub teacher_registrations: usize,
}

pub fn apply_seed(uow: &mut SqliteUnitOfWork, data: SeedData) -> RepoResult<SeedSummary> {
    let summary = SeedSummary {
        persons: data.persons.len(),
        course_templates: data.course_templates.len(),
        course_instances: data.course_instances.len(),
        teacher_registrations: data.teacher_registrations.len(),
    };

    if let Err(err) = stage_and_save(uow, data) {
        uow.discard();
        return Err(err);
    }

    info!(
        "event=seed_import module=cli status=ok persons={} templates={} instances={} registrations={}",
        summary.persons,
        summary.course_templates,
        summary.course_instances,
        summary.teacher_registrations
    );
    Ok(summary)
}

fn stage_and_save(uow: &mut SqliteUnitOfWork, data: SeedData) -> RepoResult<()> {
    stage_all(uow, data.persons)?;
    stage_all(uow, data.course_templates)?;
    stage_all(uow, data.course_instances)?;
    stage_all(uow, data.teacher_registrations)?;
    uow.save()
}

fn stage_all<T: Entity>(uow: &mut SqliteUnitOfWork, rows: Vec<T>) -> RepoResult<()>
where
    SqliteUnitOfWork: Repository<T>,
{
    for row in rows {
        Repository::<T>::add(uow, row)?;
    }
    Ok(())
}
