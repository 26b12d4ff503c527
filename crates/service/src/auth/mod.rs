//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes registration, OTP verification and login business logic
//! under the service crate.

pub mod domain;
pub mod errors;
pub mod otp;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
