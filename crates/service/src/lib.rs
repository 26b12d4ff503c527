//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
#[cfg(test)]
pub mod test_support;

pub mod region_service;
pub mod subject_service;
pub mod field_service;
pub mod center_service;
pub mod branch_service;
pub mod course_service;
pub mod comment_service;
pub mod like_service;
pub mod resource_service;
pub mod reception_service;
pub mod user_service;
