//! Core domain logic for the gradebook.
//! This crate is the single source of truth for record and reference rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{StoreConfig, XmlStores};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{Assignment, Entity, Grade, SemesterCalendar, Student, WEEK_MAX, WEEK_MIN};
pub use repo::{
    AssignmentXmlRepository, GradeXmlRepository, InMemoryRepository, RepoError, RepoResult,
    Repository, StudentXmlRepository, XmlRepository,
};
pub use service::{CatalogService, ServiceError, ServiceResult};
pub use validation::{
    late_penalty, AssignmentValidator, GradeValidator, StudentValidator, ValidationError,
    Validator,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
