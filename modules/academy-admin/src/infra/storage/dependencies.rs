//! Dependency rules: which relationships must be empty before a record of a
//! given type may be purged.
//!
//! Counts include soft-deleted rows, which still hold their foreign keys.

use futures::future::BoxFuture;
use sea_orm::{ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

use crate::infra::storage::entity::{
    course_review, interactive_course, lesson, student_profile, subscription, teacher_payout,
    teacher_profile,
};

/// Counts rows referencing the record with the given id.
pub type CountFn = for<'a> fn(&'a DatabaseTransaction, Uuid) -> BoxFuture<'a, Result<u64, DbErr>>;

/// One named relationship checked by the dependency guard.
#[derive(Clone, Copy)]
pub struct DependencyRule {
    pub label: &'static str,
    pub count: CountFn,
}

impl std::fmt::Debug for DependencyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

macro_rules! count_where {
    ($name:ident, $entity:ident, $col:ident) => {
        fn $name(tx: &DatabaseTransaction, id: Uuid) -> BoxFuture<'_, Result<u64, DbErr>> {
            Box::pin(async move {
                $entity::Entity::find()
                    .filter($entity::Column::$col.eq(id))
                    .count(tx)
                    .await
            })
        }
    };
}

count_where!(students_in_grade, student_profile, GradeLevelId);
count_where!(courses_in_grade, interactive_course, GradeLevelId);
count_where!(teachers_in_grade, teacher_profile, GradeLevelId);
count_where!(courses_of_teacher, interactive_course, TeacherId);
count_where!(payouts_of_teacher, teacher_payout, TeacherId);
count_where!(lessons_of_course, lesson, CourseId);
count_where!(reviews_of_course, course_review, CourseId);
count_where!(subscriptions_of_package, subscription, PackageId);

pub const GRADE_LEVEL: &[DependencyRule] = &[
    DependencyRule {
        label: "students",
        count: students_in_grade,
    },
    DependencyRule {
        label: "interactive courses",
        count: courses_in_grade,
    },
    DependencyRule {
        label: "teachers",
        count: teachers_in_grade,
    },
];

pub const TEACHER_PROFILE: &[DependencyRule] = &[
    DependencyRule {
        label: "interactive courses",
        count: courses_of_teacher,
    },
    DependencyRule {
        label: "payouts",
        count: payouts_of_teacher,
    },
];

pub const INTERACTIVE_COURSE: &[DependencyRule] = &[
    DependencyRule {
        label: "lessons",
        count: lessons_of_course,
    },
    DependencyRule {
        label: "reviews",
        count: reviews_of_course,
    },
];

pub const PACKAGE: &[DependencyRule] = &[DependencyRule {
    label: "subscriptions",
    count: subscriptions_of_package,
}];
