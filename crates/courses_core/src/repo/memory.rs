//! In-memory unit of work.
//!
//! # Responsibility
//! - Back service tests with plain vectors per entity type.
//! - Record how many times `save()` was requested.
//!
//! # Invariants
//! - Changes apply to the vectors immediately; `save()` only counts calls.

use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::enrollment::{CourseStudent, WaitingListEntry};
use crate::model::person::Person;
use crate::model::teacher::TeacherRegistration;
use crate::repo::unit_of_work::{
    ensure_exists, prepare_insert, Entity, RepoResult, Repository, Staged, UnitOfWork,
};

/// Access to the row vector of one entity type.
pub trait MemoryTable<T: Entity> {
    fn rows(&self) -> &Vec<T>;
    fn rows_mut(&mut self) -> &mut Vec<T>;
}

/// Vector-backed unit of work for tests.
#[derive(Debug, Default)]
pub struct MemoryUnitOfWork {
    persons: Vec<Person>,
    course_templates: Vec<CourseTemplate>,
    course_instances: Vec<CourseInstance>,
    teacher_registrations: Vec<TeacherRegistration>,
    course_students: Vec<CourseStudent>,
    waiting_list: Vec<WaitingListEntry>,
    save_calls: usize,
}

impl MemoryUnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all rows of one entity type.
    pub fn set_rows<T: Entity>(&mut self, rows: Vec<T>)
    where
        Self: MemoryTable<T>,
    {
        *MemoryTable::<T>::rows_mut(self) = rows;
    }

    /// Builder-style variant of [`MemoryUnitOfWork::set_rows`].
    pub fn with_rows<T: Entity>(mut self, rows: Vec<T>) -> Self
    where
        Self: MemoryTable<T>,
    {
        self.set_rows(rows);
        self
    }

    /// Number of `save()` calls so far.
    pub fn save_count(&self) -> usize {
        self.save_calls
    }
}

macro_rules! memory_table {
    ($entity:ty, $field:ident) => {
        impl MemoryTable<$entity> for MemoryUnitOfWork {
            fn rows(&self) -> &Vec<$entity> {
                &self.$field
            }

            fn rows_mut(&mut self) -> &mut Vec<$entity> {
                &mut self.$field
            }
        }
    };
}

memory_table!(Person, persons);
memory_table!(CourseTemplate, course_templates);
memory_table!(CourseInstance, course_instances);
memory_table!(TeacherRegistration, teacher_registrations);
memory_table!(CourseStudent, course_students);
memory_table!(WaitingListEntry, waiting_list);

impl<T: Entity> Repository<T> for MemoryUnitOfWork
where
    MemoryUnitOfWork: MemoryTable<T>,
{
    fn all(&self) -> RepoResult<Vec<T>> {
        Ok(MemoryTable::<T>::rows(self).clone())
    }

    fn add(&mut self, item: T) -> RepoResult<T> {
        let item = prepare_insert(MemoryTable::<T>::rows(self), item)?;
        Staged::Insert(item.clone()).apply_to(MemoryTable::<T>::rows_mut(self));
        Ok(item)
    }

    fn update(&mut self, item: T) -> RepoResult<()> {
        ensure_exists(MemoryTable::<T>::rows(self), &item.key())?;
        Staged::Update(item).apply_to(MemoryTable::<T>::rows_mut(self));
        Ok(())
    }

    fn remove(&mut self, key: &T::Key) -> RepoResult<()> {
        ensure_exists(MemoryTable::<T>::rows(self), key)?;
        Staged::<T>::Delete(key.clone()).apply_to(MemoryTable::<T>::rows_mut(self));
        Ok(())
    }
}

impl UnitOfWork for MemoryUnitOfWork {
    fn save(&mut self) -> RepoResult<()> {
        self.save_calls += 1;
        Ok(())
    }
}
