//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration lives with the portal services; this module owns password
//! hashing, credential verification and token issuance.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
