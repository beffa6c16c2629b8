//! Repository contracts and storage implementations.
//!
//! # Responsibility
//! - Define the load/find/save/update/delete contract shared by all entities.
//! - Keep XML file details inside the persistence boundary.
//!
//! # Invariants
//! - Ids are unique per repository: `save` never overwrites a stored record.
//! - Repositories store what they are given; field rules are enforced by the
//!   service layer before any write.
//! - Read paths reject malformed stored data instead of masking it.

pub mod memory_repo;
pub mod xml_repo;

use crate::model::Entity;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use memory_repo::InMemoryRepository;
pub use xml_repo::{
    AssignmentXmlRepository, GradeXmlRepository, StudentXmlRepository, XmlRecord, XmlRepository,
};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure raised by repository implementations.
#[derive(Debug)]
pub enum RepoError {
    /// Backing file could not be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Backing file holds content that does not decode, or a record failed
    /// to encode.
    Xml { path: PathBuf, message: String },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "store i/o failed for `{}`: {source}", path.display())
            }
            Self::Xml { path, message } => {
                write!(f, "invalid xml store `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xml { .. } => None,
        }
    }
}

/// Repository interface for one entity type.
///
/// Mutating methods return the record that was already stored (for `save`)
/// or the record that was replaced/removed (for `update`/`delete`), so
/// callers can tell inserts from no-ops without a second lookup.
pub trait Repository<E: Entity> {
    /// Returns every stored record in insertion order.
    fn find_all(&self) -> RepoResult<Vec<E>>;
    /// Looks one record up by id.
    fn find_one(&self, id: &str) -> RepoResult<Option<E>>;
    /// Inserts `entity`. Returns `Some(existing)` without writing when the id
    /// is already taken, `None` when the record was stored.
    fn save(&self, entity: &E) -> RepoResult<Option<E>>;
    /// Replaces the record with the same id. Returns the previous record, or
    /// `None` when no record has that id.
    fn update(&self, entity: &E) -> RepoResult<Option<E>>;
    /// Removes a record by id and returns it.
    fn delete(&self, id: &str) -> RepoResult<Option<E>>;
}
