#![allow(clippy::unwrap_used, clippy::expect_used)]

use itqan_security::{AccessScope, TenantContext};
use uuid::Uuid;

#[test]
fn scoped_context_maps_to_single_tenant_scope() {
    let t = Uuid::new_v4();
    let ctx = TenantContext::Scoped(t);
    assert_eq!(ctx.tenant_id(), Some(t));
    assert_eq!(ctx.to_scope(), AccessScope::tenant(t));
    assert!(!ctx.is_global());
}

#[test]
fn global_context_maps_to_root_scope() {
    let ctx = TenantContext::from(None);
    assert!(ctx.is_global());
    assert_eq!(ctx.tenant_id(), None);
    assert!(ctx.to_scope().is_root());
}

#[test]
fn option_round_trips_through_context() {
    let t = Uuid::new_v4();
    assert_eq!(TenantContext::from(Some(t)).tenant_id(), Some(t));
}

#[test]
fn context_serializes_with_mode_tag() {
    let t = Uuid::nil();
    let json = serde_json::to_value(TenantContext::Scoped(t)).unwrap();
    assert_eq!(json["mode"], "scoped");
    assert_eq!(json["tenant_id"], t.to_string());

    let global = serde_json::to_value(TenantContext::Global).unwrap();
    assert_eq!(global["mode"], "global");
}
