#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Database access for the Itqan admin core.
//!
//! Everything tenant-owned goes through [`secure`]: queries are built from a
//! resolved [`itqan_security::AccessScope`] and cannot run unscoped.

mod config;
pub mod secure;

pub use config::{DbConfig, connect};
pub use sea_orm::{DatabaseConnection, DbErr};
