#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Academy admin policy core.
//!
//! Resolves which academy an admin request operates on, lists tenant-scoped
//! resources, refuses deletes that would orphan related records, and applies
//! approval / activation / trash transitions to single records and selections.

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;
pub mod telemetry;

pub use config::AdminConfig;
pub use domain::error::DomainError;
pub use module::AcademyAdmin;
