//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validators and repositories into use-case level APIs.
//! - Keep CLI callers decoupled from storage details.

pub mod catalog_service;

pub use catalog_service::{CatalogService, ServiceError, ServiceResult};
