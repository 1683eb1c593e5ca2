//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the per-entity repository contract and the unit of work that
//!   groups all entity repositories behind a single `save()`.
//! - Provide an in-memory unit of work for tests and a SQLite-backed one for
//!   production use.
//!
//! # Invariants
//! - Reads reflect the working set, including staged changes not yet saved.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateKey`) in
//!   addition to storage transport errors.

pub mod memory;
pub mod sqlite;
mod unit_of_work;

pub use memory::{MemoryTable, MemoryUnitOfWork};
pub use sqlite::SqliteUnitOfWork;
pub use unit_of_work::{Entity, RepoError, RepoResult, Repository, Staged, UnitOfWork};
