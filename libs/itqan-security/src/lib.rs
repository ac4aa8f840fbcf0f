#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod access_scope;
pub mod actor;
pub mod tenant;

pub use access_scope::AccessScope;
pub use actor::{Actor, ActorBuilder, Role, UnknownRole};
pub use tenant::{TenantContext, TenantId};
