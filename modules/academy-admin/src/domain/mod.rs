// The repository port and the sea-orm adapter share the scope and trash
// types from itqan-db, so the domain layer names them directly.

pub mod dependency_guard;
pub mod error;
pub mod repo;
pub mod resource;
pub mod service;
pub mod tenant_context;
pub mod workflow;
