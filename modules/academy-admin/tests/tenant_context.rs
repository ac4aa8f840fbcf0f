#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Tenant context resolution against the academies table.

mod support;

use academy_admin::DomainError;
use academy_admin::domain::tenant_context::TenantSelection;
use itqan_security::{Actor, Role, TenantContext};
use support::{NewAcademy, academy, admin, admin_of, conn, super_admin};
use time::{Duration, OffsetDateTime};
use tracing_test::traced_test;
use uuid::Uuid;

#[tokio::test]
async fn super_admin_lands_on_the_configured_default_academy() {
    let admin = admin().await;
    let db = conn(&admin);
    let older = NewAcademy {
        created_at: OffsetDateTime::now_utc().saturating_sub(Duration::days(30)),
        ..NewAcademy::new("Noor Academy", "noor")
    }
    .insert(db)
    .await;
    let preferred = academy(db, "Itqan Academy", "itqan-academy").await;

    let ctx = admin
        .tenants()
        .resolve(&super_admin(), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(ctx, TenantContext::Scoped(preferred));
    assert_ne!(ctx, TenantContext::Scoped(older));

    let info = admin
        .tenants()
        .context_info(&super_admin(), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(info.academy.unwrap().name, "Itqan Academy");
    assert!(!info.global_view);
    assert!(info.can_switch);
}

#[tokio::test]
async fn default_falls_back_to_the_oldest_usable_academy() {
    let admin = admin().await;
    let db = conn(&admin);
    let now = OffsetDateTime::now_utc();
    NewAcademy {
        maintenance_mode: true,
        created_at: now.saturating_sub(Duration::days(90)),
        ..NewAcademy::new("Itqan Academy", "itqan-academy")
    }
    .insert(db)
    .await;
    NewAcademy {
        is_active: false,
        created_at: now.saturating_sub(Duration::days(60)),
        ..NewAcademy::new("Closed Academy", "closed")
    }
    .insert(db)
    .await;
    let oldest_usable = NewAcademy {
        created_at: now.saturating_sub(Duration::days(30)),
        ..NewAcademy::new("Noor Academy", "noor")
    }
    .insert(db)
    .await;
    academy(db, "Huda Academy", "huda").await;

    let ctx = admin
        .tenants()
        .resolve(&super_admin(), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(ctx, TenantContext::Scoped(oldest_usable));
}

#[tokio::test]
async fn super_admin_without_any_usable_academy_gets_global_view() {
    let admin = admin().await;
    let db = conn(&admin);
    NewAcademy {
        maintenance_mode: true,
        ..NewAcademy::new("Itqan Academy", "itqan-academy")
    }
    .insert(db)
    .await;

    let ctx = admin
        .tenants()
        .resolve_tenant_context(&super_admin(), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(ctx, None);
}

#[tokio::test]
async fn super_admin_selection_and_global_view_round_trip() {
    let admin = admin().await;
    let db = conn(&admin);
    let itqan = academy(db, "Itqan Academy", "itqan-academy").await;
    let noor = academy(db, "Noor Academy", "noor").await;
    let actor = super_admin();
    let tenants = admin.tenants();

    let selection = tenants
        .select_academy(&actor, &TenantSelection::default(), noor)
        .await
        .unwrap();
    assert_eq!(
        tenants.resolve(&actor, &selection).await.unwrap(),
        TenantContext::Scoped(noor)
    );

    let global = selection.enable_global_view(&actor).unwrap();
    assert!(tenants.resolve(&actor, &global).await.unwrap().is_global());

    // Global view forgets the selection; leaving it lands on the default.
    let left = global.disable_global_view(&actor).unwrap();
    assert_eq!(
        tenants.resolve(&actor, &left).await.unwrap(),
        TenantContext::Scoped(itqan)
    );

    // Selecting an academy leaves global view.
    let back = tenants.select_academy(&actor, &global, noor).await.unwrap();
    assert!(!back.global_view);

    let err = tenants
        .select_academy(&actor, &back, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "got {err:?}");

    let cleared = TenantSelection::clear(&actor).unwrap();
    assert_eq!(cleared, TenantSelection::default());
}

#[tokio::test]
#[traced_test]
async fn academy_admin_is_kept_in_own_academy() {
    let admin = admin().await;
    let db = conn(&admin);
    let own = academy(db, "Itqan Academy", "itqan-academy").await;
    let other = academy(db, "Noor Academy", "noor").await;
    let actor = admin_of(own);

    let tampered = TenantSelection {
        selected_academy: Some(other),
        global_view: true,
    };
    let ctx = admin.tenants().resolve(&actor, &tampered).await.unwrap();
    assert_eq!(ctx, TenantContext::Scoped(own));
    assert!(logs_contain("keeping own academy"));

    let err = admin
        .tenants()
        .select_academy(&actor, &TenantSelection::default(), other)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }), "got {err:?}");
    let err = TenantSelection::default()
        .enable_global_view(&actor)
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }), "got {err:?}");

    let info = admin
        .tenants()
        .context_info(&actor, &TenantSelection::default())
        .await
        .unwrap();
    assert!(!info.can_switch);
}

#[tokio::test]
async fn scoped_roles_without_a_valid_academy_are_configuration_errors() {
    let admin = admin().await;
    let db = conn(&admin);
    academy(db, "Itqan Academy", "itqan-academy").await;

    let unassigned = Actor::builder(Role::Supervisor).build();
    let err = admin
        .tenants()
        .resolve(&unassigned, &TenantSelection::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Configuration { .. }), "got {err:?}");

    let dangling = admin_of(Uuid::new_v4());
    let err = admin
        .tenants()
        .resolve(&dangling, &TenantSelection::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Configuration { .. }), "got {err:?}");
}

#[tokio::test]
async fn assigned_academy_in_maintenance_still_scopes_its_admin() {
    let admin = admin().await;
    let db = conn(&admin);
    let own = NewAcademy {
        maintenance_mode: true,
        ..NewAcademy::new("Itqan Academy", "itqan-academy")
    }
    .insert(db)
    .await;

    let ctx = admin
        .tenants()
        .resolve(&admin_of(own), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(ctx, TenantContext::Scoped(own));
}

#[tokio::test]
async fn switcher_lists_every_academy_by_name() {
    let admin = admin().await;
    let db = conn(&admin);
    let zebra = academy(db, "Zebra Academy", "zebra").await;
    let closed = NewAcademy {
        is_active: false,
        ..NewAcademy::new("Closed Academy", "closed")
    }
    .insert(db)
    .await;
    let maintenance = NewAcademy {
        maintenance_mode: true,
        ..NewAcademy::new("Maintenance Academy", "maintenance")
    }
    .insert(db)
    .await;
    let alpha = academy(db, "Alpha Academy", "alpha").await;

    let listed = admin.tenants().available_academies(&super_admin()).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, [alpha, closed, maintenance, zebra]);

    let err = admin
        .tenants()
        .available_academies(&admin_of(alpha))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden { .. }), "got {err:?}");
}
