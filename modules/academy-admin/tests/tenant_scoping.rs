#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Listing and mutating tenant-owned resources through the composed admin core.

mod support;

use academy_admin::DomainError;
use academy_admin::domain::resource::{ListFilter, ListQuery, PageRequest};
use academy_admin::domain::tenant_context::TenantSelection;
use academy_admin::domain::workflow::{ApprovalStatus, StatusAction};
use itqan_security::TenantContext;
use support::{
    academy, admin, admin_of, conn, course, lesson, payout, review, student, super_admin, teacher,
};

#[tokio::test]
async fn scoped_lists_only_see_own_academy_across_multi_hop_paths() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let b = academy(db, "Noor Academy", "noor").await;

    let course_a = course(db, a, None, "Tajweed I").await;
    let course_b = course(db, b, None, "Arabic Basics").await;
    lesson(db, course_a, "Makharij", 1).await;
    lesson(db, course_a, "Sifaat", 2).await;
    lesson(db, course_b, "Alphabet", 1).await;

    let teacher_a = teacher(db, a, None, "Ustadh Omar").await;
    let teacher_b = teacher(db, b, None, "Ustadha Mariam").await;
    payout(db, teacher_a, "2026-09").await;
    payout(db, teacher_b, "2026-09").await;
    payout(db, teacher_b, "2026-10").await;

    student(db, a, None, "ST-001").await;
    student(db, b, None, "ST-002").await;

    let ctx = admin
        .tenants()
        .resolve(&admin_of(a), &TenantSelection::default())
        .await
        .unwrap();
    assert_eq!(ctx, TenantContext::Scoped(a));

    let lessons = admin.lessons().list(&ctx, &ListQuery::default()).await.unwrap();
    assert_eq!(lessons.total, 2);
    assert!(lessons.items.iter().all(|l| l.row.course_id == course_a));
    assert!(lessons.items.iter().all(|l| l.academy.is_none()));

    let payouts = admin
        .teacher_payouts()
        .count(&ctx, &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(payouts, 1);

    let students = admin
        .student_profiles()
        .list(&ctx, &ListQuery::default())
        .await
        .unwrap();
    assert_eq!(students.items.len(), 1);
    assert_eq!(students.items[0].row.student_code, "ST-001");
}

#[tokio::test]
async fn global_view_lists_everything_and_names_the_academy() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let b = academy(db, "Noor Academy", "noor").await;
    let course_a = course(db, a, None, "Tajweed I").await;
    let course_b = course(db, b, None, "Arabic Basics").await;
    lesson(db, course_a, "Makharij", 1).await;
    lesson(db, course_b, "Alphabet", 1).await;

    let selection = TenantSelection::default()
        .enable_global_view(&super_admin())
        .unwrap();
    let ctx = admin.tenants().resolve(&super_admin(), &selection).await.unwrap();
    assert!(ctx.is_global());

    let page = admin.lessons().list(&ctx, &ListQuery::default()).await.unwrap();
    assert_eq!(page.total, 2);
    for item in &page.items {
        let academy = item.academy.as_ref().expect("global rows carry their academy");
        if item.row.course_id == course_a {
            assert_eq!((academy.id, academy.name.as_str()), (a, "Itqan Academy"));
        } else {
            assert_eq!((academy.id, academy.name.as_str()), (b, "Noor Academy"));
        }
    }
}

#[tokio::test]
async fn paging_clamps_to_the_configured_maximum() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let course_a = course(db, a, None, "Hifz").await;
    for position in 0..5 {
        lesson(db, course_a, &format!("Juz {position}"), position).await;
    }
    let ctx = TenantContext::Scoped(a);

    let query = ListQuery {
        page: PageRequest {
            offset: 3,
            limit: Some(10_000),
        },
        ..ListQuery::default()
    };
    let page = admin.lessons().list(&ctx, &query).await.unwrap();
    assert_eq!(page.limit, 100);
    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
}

#[tokio::test]
async fn records_of_another_academy_are_not_found() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let b = academy(db, "Noor Academy", "noor").await;
    let course_b = course(db, b, None, "Arabic Basics").await;
    let student_b = student(db, b, None, "ST-100").await;
    let review_b = review(db, course_b, student_b, 5).await;

    let ctx_a = TenantContext::Scoped(a);
    let actor = admin_of(a);
    let reviews = admin.course_reviews();

    let err = reviews
        .transition(&ctx_a, &actor, review_b, &StatusAction::Approve)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "got {err:?}");

    let err = reviews.can_delete(&ctx_a, review_b).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "got {err:?}");

    let pending_in_b = reviews
        .count(&TenantContext::Scoped(b), &ListFilter::approval(ApprovalStatus::Pending))
        .await
        .unwrap();
    assert_eq!(pending_in_b, 1, "the foreign review must stay untouched");
    assert_eq!(reviews.pending_badge(&ctx_a).await.unwrap(), None);
    assert_eq!(
        reviews.pending_badge(&TenantContext::Scoped(b)).await.unwrap(),
        Some(1)
    );
}

#[tokio::test]
async fn filters_on_missing_axes_are_rejected() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let ctx = TenantContext::Scoped(a);

    let err = admin
        .lessons()
        .count(&ctx, &ListFilter::approval(ApprovalStatus::Pending))
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Validation { ref field, .. } if field == "approval"),
        "got {err:?}"
    );
    assert_eq!(admin.lessons().pending_badge(&ctx).await.unwrap(), None);
}
