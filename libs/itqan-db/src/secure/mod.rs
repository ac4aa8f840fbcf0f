//! Secure ORM layer for tenant-scoped database access.
//!
//! Wraps `SeaORM` so that access control scoping is enforced with the
//! typestate pattern: a query becomes executable only after a scope has been
//! applied, and later filters are AND-combined with it.
//!
//! Tenant ownership is declared per entity as a dot-delimited relationship
//! path (`"academy"`, `"course.academy"`, `"teacher.academy"`), resolved
//! against a statically declared [`RelationGraph`].
//!
//! ```rust,ignore
//! use itqan_db::secure::{AccessScope, SecureConn};
//!
//! let db = SecureConn::new(conn, graph);
//! let lessons = db
//!     .find::<lesson::Entity>(&AccessScope::tenant(academy_id))?
//!     .filter(Condition::all().add(lesson::Column::Title.contains("Tajweed")))
//!     .all(db.conn())
//!     .await?;
//! ```
//!
//! # Policy
//!
//! | Scope | Behavior |
//! |-------|----------|
//! | Empty | Deny all (`WHERE 1=0`) |
//! | Root | No tenant predicate (global view) |
//! | Tenants | Predicate along the entity's tenant path |
//! | Resources | Filter by ID column |
//! | Both | AND them together |
//!
//! An unresolvable tenant path is an error in every mode, never a missing filter.

mod cond;
mod db_ops;
mod entity_traits;
mod error;
mod relation_graph;
mod secure_conn;
mod select;

pub use cond::build_scope_condition;
pub use db_ops::{SecureDeleteExt, SecureDeleteMany, SecureUpdateExt, SecureUpdateMany};
pub use entity_traits::ScopableEntity;
pub use error::{ScopeError, TxError};
pub use relation_graph::{RelationGraph, RelationLink, ResolvedPath};
pub use secure_conn::SecureConn;
pub use select::{Scoped, SecureEntityExt, SecureSelect, Trashed, Unscoped};

pub use itqan_security::AccessScope;
