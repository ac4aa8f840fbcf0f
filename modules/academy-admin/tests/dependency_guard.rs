#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Dependency-guarded deletes against the real schema.

mod support;

use academy_admin::DomainError;
use academy_admin::domain::dependency_guard::DependencyCount;
use academy_admin::domain::resource::{ListFilter, ListQuery, Trashed};
use academy_admin::domain::workflow::{StatusAction, TransitionOutcome};
use academy_admin::infra::storage::entity::grade_level;
use itqan_security::TenantContext;
use sea_orm::EntityTrait;
use support::{
    academy, admin, admin_of, conn, course, grade_level, lesson, package, student, teacher,
};

#[tokio::test]
async fn grade_level_with_students_and_teachers_cannot_be_deleted() {
    let admin = admin().await;
    let db = conn(&admin);
    let academy_a = academy(db, "Itqan Academy", "itqan-academy").await;
    let academy_b = academy(db, "Noor Academy", "noor").await;
    let grade_a = grade_level(db, academy_a, "Grade 5").await;
    let grade_b = grade_level(db, academy_b, "Grade 6").await;
    for code in ["ST-1", "ST-2", "ST-3"] {
        student(db, academy_a, Some(grade_a), code).await;
    }
    teacher(db, academy_a, Some(grade_a), "Ustadh Bilal").await;

    let ctx = TenantContext::Scoped(academy_a);
    let actor = admin_of(academy_a);
    let grades = admin.grade_levels();

    let check = grades.can_delete(&ctx, grade_a).await.unwrap();
    assert!(!check.allowed);
    assert_eq!(
        check.reasons,
        vec![
            DependencyCount::new("students", 3),
            DependencyCount::new("teachers", 1),
        ]
    );

    let err = grades.delete(&ctx, &actor, grade_a).await.unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, DomainError::DependencyBlocked(_)), "got {err:?}");
    assert!(message.contains("Grade 5"), "{message}");
    assert!(message.contains("students (3)"), "{message}");
    assert!(message.contains("teachers (1)"), "{message}");
    assert!(!message.contains("interactive courses"), "{message}");
    assert!(
        grade_level::Entity::find_by_id(grade_a).one(db).await.unwrap().is_some(),
        "blocked record must survive"
    );

    // Academy A cannot even see the other academy's grade level.
    let err = grades.can_delete(&ctx, grade_b).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "got {err:?}");

    let ctx_b = TenantContext::Scoped(academy_b);
    let actor_b = admin_of(academy_b);
    assert!(grades.can_delete(&ctx_b, grade_b).await.unwrap().allowed);
    let outcome = grades.delete(&ctx_b, &actor_b, grade_b).await.unwrap();
    assert_eq!(outcome, TransitionOutcome::Purged);
    assert!(grade_level::Entity::find_by_id(grade_b).one(db).await.unwrap().is_none());
}

#[tokio::test]
async fn bulk_delete_is_refused_when_any_selected_record_has_dependents() {
    let admin = admin().await;
    let db = conn(&admin);
    let academy_id = academy(db, "Itqan Academy", "itqan-academy").await;
    let busy = grade_level(db, academy_id, "Grade 1").await;
    let empty = grade_level(db, academy_id, "Grade 2").await;
    let also_busy = grade_level(db, academy_id, "Grade 3").await;
    student(db, academy_id, Some(busy), "ST-10").await;
    teacher(db, academy_id, Some(also_busy), "Ustadha Huda").await;

    let ctx = TenantContext::Scoped(academy_id);
    let grades = admin.grade_levels();

    let err = grades
        .bulk_delete(&ctx, &admin_of(academy_id), &[busy, empty, also_busy])
        .await
        .unwrap_err();
    let DomainError::DependencyBlocked(blocked) = &err else {
        panic!("expected a dependency block, got {err:?}");
    };
    let mut names: Vec<&str> = blocked.records.iter().map(|r| r.record.label.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, ["Grade 1", "Grade 3"]);
    let message = err.to_string();
    assert!(message.contains("students (1)"), "{message}");
    assert!(message.contains("teachers (1)"), "{message}");

    let remaining = grades.count(&ctx, &ListFilter::default()).await.unwrap();
    assert_eq!(remaining, 3, "nothing is deleted when the batch is refused");

    let outcomes = grades
        .bulk_delete(&ctx, &admin_of(academy_id), &[empty])
        .await
        .unwrap();
    assert!(outcomes.iter().all(|o| o.is_ok()));
    assert_eq!(grades.count(&ctx, &ListFilter::default()).await.unwrap(), 2);
}

#[tokio::test]
async fn bulk_delete_reports_ids_outside_the_tenant_as_not_found() {
    let admin = admin().await;
    let db = conn(&admin);
    let a = academy(db, "Itqan Academy", "itqan-academy").await;
    let b = academy(db, "Noor Academy", "noor").await;
    let own = package(db, a, "Monthly Hifz").await;
    let foreign = package(db, b, "Weekend Arabic").await;

    let outcomes = admin
        .packages()
        .bulk_delete(&TenantContext::Scoped(a), &admin_of(a), &[own, foreign])
        .await
        .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].result.as_ref().unwrap(), &TransitionOutcome::Purged);
    assert!(matches!(
        outcomes[1].result,
        Err(DomainError::NotFound { .. })
    ));

    let left_in_b = admin
        .packages()
        .count(&TenantContext::Scoped(b), &ListFilter::default())
        .await
        .unwrap();
    assert_eq!(left_in_b, 1);
}

#[tokio::test]
async fn trashed_course_with_lessons_cannot_be_force_deleted() {
    let admin = admin().await;
    let db = conn(&admin);
    let academy_id = academy(db, "Itqan Academy", "itqan-academy").await;
    let course_id = course(db, academy_id, None, "Tajweed II").await;
    lesson(db, course_id, "Idgham", 1).await;
    lesson(db, course_id, "Ikhfa", 2).await;

    let ctx = TenantContext::Scoped(academy_id);
    let actor = admin_of(academy_id);
    let courses = admin.interactive_courses();

    // Moving to the trash is not guarded.
    let trashed = courses.delete(&ctx, &actor, course_id).await.unwrap();
    assert!(trashed.state().unwrap().is_trashed());

    let err = courses
        .transition(&ctx, &actor, course_id, &StatusAction::ForceDelete)
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Tajweed II"), "{message}");
    assert!(message.contains("lessons (2)"), "{message}");

    let err = courses
        .bulk_transition(&ctx, &actor, &[course_id], &StatusAction::ForceDelete)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::DependencyBlocked(_)), "got {err:?}");

    let in_trash = courses
        .list(
            &ctx,
            &ListQuery {
                filter: ListFilter {
                    trashed: Trashed::Only,
                    ..ListFilter::default()
                },
                ..ListQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(in_trash.total, 1);
}

#[tokio::test]
async fn foreign_keys_restrict_deletes_that_bypass_the_guard() {
    let admin = admin().await;
    let db = conn(&admin);
    let academy_id = academy(db, "Itqan Academy", "itqan-academy").await;
    let grade = grade_level(db, academy_id, "Grade 9").await;
    student(db, academy_id, Some(grade), "ST-900").await;

    let res = grade_level::Entity::delete_by_id(grade).exec(db).await;
    assert!(res.is_err(), "RESTRICT foreign key must refuse the delete");
    assert!(grade_level::Entity::find_by_id(grade).one(db).await.unwrap().is_some());
}
