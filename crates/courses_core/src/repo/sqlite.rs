//! SQLite-backed unit of work.
//!
//! # Responsibility
//! - Stage inserts, updates and removals in an ordered change journal.
//! - Apply the whole journal in one transaction on `save()`.
//!
//! # Invariants
//! - `all()` returns persisted rows with the journal replayed on top.
//! - Journal order is preserved on commit, so callers stage child removals
//!   before parent removals and parent inserts before child inserts.
//! - The journal is cleared only after a successful commit.

use crate::db::{open_db, open_db_in_memory};
use crate::model::course::{CourseInstance, CourseTemplate};
use crate::model::enrollment::{CourseStudent, WaitingListEntry};
use crate::model::person::Person;
use crate::model::teacher::{TeacherRegistration, TeacherType};
use crate::repo::unit_of_work::{
    ensure_exists, prepare_insert, Entity, RepoError, RepoResult, Repository, Staged, UnitOfWork,
};
use log::{error, info};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::time::Instant;

/// One journal entry, tagged with its table.
#[derive(Debug, Clone)]
pub enum Change {
    Person(Staged<Person>),
    CourseTemplate(Staged<CourseTemplate>),
    CourseInstance(Staged<CourseInstance>),
    TeacherRegistration(Staged<TeacherRegistration>),
    CourseStudent(Staged<CourseStudent>),
    WaitingListEntry(Staged<WaitingListEntry>),
}

impl Change {
    fn execute(&self, conn: &Connection) -> RepoResult<()> {
        match self {
            Self::Person(staged) => execute_staged(conn, staged),
            Self::CourseTemplate(staged) => execute_staged(conn, staged),
            Self::CourseInstance(staged) => execute_staged(conn, staged),
            Self::TeacherRegistration(staged) => execute_staged(conn, staged),
            Self::CourseStudent(staged) => execute_staged(conn, staged),
            Self::WaitingListEntry(staged) => execute_staged(conn, staged),
        }
    }
}

/// SQL mapping of one entity table.
pub trait SqliteTable: Entity + Sized {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>>;
    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()>;
    /// Returns the number of changed rows.
    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize>;
    /// Returns the number of deleted rows.
    fn delete_row(conn: &Connection, key: &Self::Key) -> RepoResult<usize>;
    fn into_change(staged: Staged<Self>) -> Change;
    fn from_change(change: &Change) -> Option<&Staged<Self>>;
}

fn execute_staged<T: SqliteTable>(conn: &Connection, staged: &Staged<T>) -> RepoResult<()> {
    let (changed, key) = match staged {
        Staged::Insert(row) => return T::insert_row(conn, row),
        Staged::Update(row) => (T::update_row(conn, row)?, row.key()),
        Staged::Delete(key) => (T::delete_row(conn, key)?, key.clone()),
    };

    if changed == 0 {
        return Err(RepoError::NotFound {
            entity: T::NAME,
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Unit of work over one migrated SQLite connection.
pub struct SqliteUnitOfWork {
    conn: Connection,
    journal: Vec<Change>,
}

impl SqliteUnitOfWork {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps a connection that already has migrations applied.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            journal: Vec::new(),
        }
    }

    /// Number of staged changes not yet saved.
    pub fn pending_changes(&self) -> usize {
        self.journal.len()
    }

    /// Drops all staged changes.
    pub fn discard(&mut self) {
        self.journal.clear();
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl<T: SqliteTable> Repository<T> for SqliteUnitOfWork {
    fn all(&self) -> RepoResult<Vec<T>> {
        let mut rows = T::load_all(&self.conn)?;
        for staged in self.journal.iter().filter_map(T::from_change) {
            staged.apply_to(&mut rows);
        }
        Ok(rows)
    }

    fn add(&mut self, item: T) -> RepoResult<T> {
        let existing = Repository::<T>::all(self)?;
        let item = prepare_insert(&existing, item)?;
        self.journal.push(T::into_change(Staged::Insert(item.clone())));
        Ok(item)
    }

    fn update(&mut self, item: T) -> RepoResult<()> {
        let existing = Repository::<T>::all(self)?;
        ensure_exists(&existing, &item.key())?;
        self.journal.push(T::into_change(Staged::Update(item)));
        Ok(())
    }

    fn remove(&mut self, key: &T::Key) -> RepoResult<()> {
        let existing = Repository::<T>::all(self)?;
        ensure_exists(&existing, key)?;
        self.journal.push(T::into_change(Staged::Delete(key.clone())));
        Ok(())
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    fn save(&mut self) -> RepoResult<()> {
        if self.journal.is_empty() {
            return Ok(());
        }

        let started_at = Instant::now();
        let change_count = self.journal.len();
        match commit_journal(&mut self.conn, &self.journal) {
            Ok(()) => {
                self.journal.clear();
                info!(
                    "event=uow_save module=repo status=ok changes={} duration_ms={}",
                    change_count,
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=uow_save module=repo status=error changes={} duration_ms={} error={}",
                    change_count,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn commit_journal(conn: &mut Connection, journal: &[Change]) -> RepoResult<()> {
    let tx = conn.transaction()?;
    for change in journal {
        change.execute(&tx)?;
    }
    tx.commit()?;
    Ok(())
}

fn collect_rows<T>(
    conn: &Connection,
    sql: &str,
    parse: impl Fn(&Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([])?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}

impl SqliteTable for Person {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT ssn, name, email FROM persons ORDER BY rowid;",
            |row| {
                Ok(Person {
                    ssn: row.get("ssn")?,
                    name: row.get("name")?,
                    email: row.get("email")?,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO persons (ssn, name, email) VALUES (?1, ?2, ?3);",
            params![row.ssn, row.name, row.email],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE persons SET name = ?2, email = ?3 WHERE ssn = ?1;",
            params![row.ssn, row.name, row.email],
        )?)
    }

    fn delete_row(conn: &Connection, key: &String) -> RepoResult<usize> {
        Ok(conn.execute("DELETE FROM persons WHERE ssn = ?1;", [key])?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::Person(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::Person(staged) => Some(staged),
            _ => None,
        }
    }
}

impl SqliteTable for CourseTemplate {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT course_id, name, description FROM course_templates ORDER BY rowid;",
            |row| {
                Ok(CourseTemplate {
                    course_id: row.get("course_id")?,
                    name: row.get("name")?,
                    description: row.get("description")?,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO course_templates (course_id, name, description) VALUES (?1, ?2, ?3);",
            params![row.course_id, row.name, row.description],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE course_templates SET name = ?2, description = ?3 WHERE course_id = ?1;",
            params![row.course_id, row.name, row.description],
        )?)
    }

    fn delete_row(conn: &Connection, key: &String) -> RepoResult<usize> {
        Ok(conn.execute(
            "DELETE FROM course_templates WHERE course_id = ?1;",
            [key],
        )?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::CourseTemplate(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::CourseTemplate(staged) => Some(staged),
            _ => None,
        }
    }
}

impl SqliteTable for CourseInstance {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT
                id,
                course_id,
                semester_id,
                start_date,
                end_date,
                max_students
             FROM course_instances
             ORDER BY id;",
            |row| {
                Ok(CourseInstance {
                    id: row.get("id")?,
                    course_id: row.get("course_id")?,
                    semester_id: row.get("semester_id")?,
                    start_date: row.get("start_date")?,
                    end_date: row.get("end_date")?,
                    max_students: row.get("max_students")?,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO course_instances (
                id,
                course_id,
                semester_id,
                start_date,
                end_date,
                max_students
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                row.id,
                row.course_id,
                row.semester_id,
                row.start_date,
                row.end_date,
                row.max_students,
            ],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE course_instances
             SET
                course_id = ?2,
                semester_id = ?3,
                start_date = ?4,
                end_date = ?5,
                max_students = ?6
             WHERE id = ?1;",
            params![
                row.id,
                row.course_id,
                row.semester_id,
                row.start_date,
                row.end_date,
                row.max_students,
            ],
        )?)
    }

    fn delete_row(conn: &Connection, key: &i64) -> RepoResult<usize> {
        Ok(conn.execute("DELETE FROM course_instances WHERE id = ?1;", [key])?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::CourseInstance(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::CourseInstance(staged) => Some(staged),
            _ => None,
        }
    }
}

impl SqliteTable for TeacherRegistration {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT id, course_instance_id, ssn, type
             FROM teacher_registrations
             ORDER BY id;",
            |row| {
                let type_value: i64 = row.get("type")?;
                let kind = parse_teacher_type(type_value).ok_or_else(|| {
                    RepoError::InvalidData(format!(
                        "invalid teacher type `{type_value}` in teacher_registrations.type"
                    ))
                })?;
                Ok(TeacherRegistration {
                    id: row.get("id")?,
                    course_instance_id: row.get("course_instance_id")?,
                    ssn: row.get("ssn")?,
                    kind,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO teacher_registrations (id, course_instance_id, ssn, type)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                row.id,
                row.course_instance_id,
                row.ssn,
                teacher_type_to_db(row.kind)
            ],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE teacher_registrations
             SET course_instance_id = ?2, ssn = ?3, type = ?4
             WHERE id = ?1;",
            params![
                row.id,
                row.course_instance_id,
                row.ssn,
                teacher_type_to_db(row.kind)
            ],
        )?)
    }

    fn delete_row(conn: &Connection, key: &i64) -> RepoResult<usize> {
        Ok(conn.execute(
            "DELETE FROM teacher_registrations WHERE id = ?1;",
            [key],
        )?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::TeacherRegistration(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::TeacherRegistration(staged) => Some(staged),
            _ => None,
        }
    }
}

impl SqliteTable for CourseStudent {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT id, course_instance_id, ssn FROM course_students ORDER BY id;",
            |row| {
                Ok(CourseStudent {
                    id: row.get("id")?,
                    course_instance_id: row.get("course_instance_id")?,
                    ssn: row.get("ssn")?,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO course_students (id, course_instance_id, ssn) VALUES (?1, ?2, ?3);",
            params![row.id, row.course_instance_id, row.ssn],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE course_students SET course_instance_id = ?2, ssn = ?3 WHERE id = ?1;",
            params![row.id, row.course_instance_id, row.ssn],
        )?)
    }

    fn delete_row(conn: &Connection, key: &i64) -> RepoResult<usize> {
        Ok(conn.execute("DELETE FROM course_students WHERE id = ?1;", [key])?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::CourseStudent(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::CourseStudent(staged) => Some(staged),
            _ => None,
        }
    }
}

impl SqliteTable for WaitingListEntry {
    fn load_all(conn: &Connection) -> RepoResult<Vec<Self>> {
        collect_rows(
            conn,
            "SELECT id, course_instance_id, ssn FROM waiting_list_entries ORDER BY id;",
            |row| {
                Ok(WaitingListEntry {
                    id: row.get("id")?,
                    course_instance_id: row.get("course_instance_id")?,
                    ssn: row.get("ssn")?,
                })
            },
        )
    }

    fn insert_row(conn: &Connection, row: &Self) -> RepoResult<()> {
        conn.execute(
            "INSERT INTO waiting_list_entries (id, course_instance_id, ssn) VALUES (?1, ?2, ?3);",
            params![row.id, row.course_instance_id, row.ssn],
        )?;
        Ok(())
    }

    fn update_row(conn: &Connection, row: &Self) -> RepoResult<usize> {
        Ok(conn.execute(
            "UPDATE waiting_list_entries SET course_instance_id = ?2, ssn = ?3 WHERE id = ?1;",
            params![row.id, row.course_instance_id, row.ssn],
        )?)
    }

    fn delete_row(conn: &Connection, key: &i64) -> RepoResult<usize> {
        Ok(conn.execute(
            "DELETE FROM waiting_list_entries WHERE id = ?1;",
            [key],
        )?)
    }

    fn into_change(staged: Staged<Self>) -> Change {
        Change::WaitingListEntry(staged)
    }

    fn from_change(change: &Change) -> Option<&Staged<Self>> {
        match change {
            Change::WaitingListEntry(staged) => Some(staged),
            _ => None,
        }
    }
}

fn teacher_type_to_db(kind: TeacherType) -> i64 {
    match kind {
        TeacherType::MainTeacher => 1,
        TeacherType::AssistantTeacher => 2,
    }
}

fn parse_teacher_type(value: i64) -> Option<TeacherType> {
    match value {
        1 => Some(TeacherType::MainTeacher),
        2 => Some(TeacherType::AssistantTeacher),
        _ => None,
    }
}
