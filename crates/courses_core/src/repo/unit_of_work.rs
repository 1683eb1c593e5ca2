//! Entity, repository and unit-of-work contracts.

use crate::db::DbError;
use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::enrollment::{CourseStudent, WaitingListEntry};
use crate::model::person::Person;
use crate::model::teacher::TeacherRegistration;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all unit-of-work implementations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { entity: &'static str, key: String },
    DuplicateKey { entity: &'static str, key: String },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::DuplicateKey { entity, key } => write!(f, "{entity} already exists: {key}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// A stored record with a stable identity.
pub trait Entity: Clone + Debug {
    type Key: Clone + PartialEq + Display + Debug;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    fn key(&self) -> Self::Key;

    /// Numeric surrogate id for entities whose ids are generated on insert.
    fn surrogate_id(&self) -> Option<i64> {
        None
    }

    fn set_surrogate_id(&mut self, _id: i64) {}
}

/// Per-entity repository contract.
pub trait Repository<T: Entity> {
    /// Returns every row of the working set, staged changes included.
    fn all(&self) -> RepoResult<Vec<T>>;
    /// Stages an insert and returns the row as stored.
    ///
    /// A surrogate id of `0` is replaced with the next free id.
    fn add(&mut self, item: T) -> RepoResult<T>;
    /// Stages a full replacement of the row with the same key.
    fn update(&mut self, item: T) -> RepoResult<()>;
    /// Stages removal of the row with `key`.
    fn remove(&mut self, key: &T::Key) -> RepoResult<()>;
}

/// Transactional boundary across all course-management repositories.
pub trait UnitOfWork:
    Repository<Person>
    + Repository<CourseTemplate>
    + Repository<CourseInstance>
    + Repository<TeacherRegistration>
    + Repository<CourseStudent>
    + Repository<WaitingListEntry>
{
    /// Commits staged changes. Calling it with nothing staged is a no-op.
    fn save(&mut self) -> RepoResult<()>;
}

/// One pending change against a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Staged<T: Entity> {
    Insert(T),
    Update(T),
    Delete(T::Key),
}

impl<T: Entity> Staged<T> {
    /// Replays this change on an in-memory row set.
    pub fn apply_to(&self, rows: &mut Vec<T>) {
        match self {
            Self::Insert(item) => rows.push(item.clone()),
            Self::Update(item) => {
                let key = item.key();
                if let Some(row) = rows.iter_mut().find(|row| row.key() == key) {
                    *row = item.clone();
                }
            }
            Self::Delete(key) => rows.retain(|row| row.key() != *key),
        }
    }
}

/// Assigns a generated id when needed and rejects duplicate keys.
pub(crate) fn prepare_insert<T: Entity>(existing: &[T], mut item: T) -> RepoResult<T> {
    if item.surrogate_id() == Some(0) {
        let next_id = existing
            .iter()
            .filter_map(|row| row.surrogate_id())
            .max()
            .unwrap_or(0)
            + 1;
        item.set_surrogate_id(next_id);
    }

    let key = item.key();
    if existing.iter().any(|row| row.key() == key) {
        return Err(RepoError::DuplicateKey {
            entity: T::NAME,
            key: key.to_string(),
        });
    }

    Ok(item)
}

/// Fails with `NotFound` unless a row with `key` exists.
pub(crate) fn ensure_exists<T: Entity>(existing: &[T], key: &T::Key) -> RepoResult<()> {
    if existing.iter().any(|row| row.key() == *key) {
        Ok(())
    } else {
        Err(RepoError::NotFound {
            entity: T::NAME,
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_exists, prepare_insert, RepoError, Staged};
    use crate::model::person::Person;
    use crate::model::teacher::{TeacherRegistration, TeacherType};

    #[test]
    fn prepare_insert_assigns_next_surrogate_id() {
        let mut existing = TeacherRegistration::new(1, "1203735289", TeacherType::MainTeacher);
        existing.id = 104;

        let prepared = prepare_insert(
            &[existing],
            TeacherRegistration::new(1, "1234567890", TeacherType::AssistantTeacher),
        )
        .expect("insert should be prepared");
        assert_eq!(prepared.id, 105);
    }

    #[test]
    fn prepare_insert_keeps_explicit_ids_and_rejects_duplicates() {
        let person = Person::new("1203735289", "Daníel B. Sigurgeirsson", "dabs@ru.is");
        let err = prepare_insert(&[person.clone()], person).expect_err("duplicate must fail");
        assert!(matches!(err, RepoError::DuplicateKey { entity: "person", .. }));
    }

    #[test]
    fn staged_changes_replay_in_order() {
        let mut rows = vec![Person::new("1", "one", "")];
        Staged::Insert(Person::new("2", "two", "")).apply_to(&mut rows);
        Staged::Update(Person::new("1", "uno", "")).apply_to(&mut rows);
        Staged::<Person>::Delete("2".to_string()).apply_to(&mut rows);

        assert_eq!(rows, vec![Person::new("1", "uno", "")]);
        assert!(ensure_exists(&rows, &"1".to_string()).is_ok());
        assert!(ensure_exists(&rows, &"2".to_string()).is_err());
    }
}
