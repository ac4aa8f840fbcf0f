//! Statically declared relationship table for tenant path resolution.
//!
//! Each entry mirrors a foreign key created by the migrations. A tenant path
//! such as `"course.academy"` is resolved hop by hop through these links.

use itqan_db::secure::{RelationGraph, RelationLink};

pub const TENANT_TABLE: &str = "academies";

const USERS: &[RelationLink] = &[RelationLink::belongs_to("academy", "academy_id", TENANT_TABLE)];

const GRADE_LEVELS: &[RelationLink] =
    &[RelationLink::belongs_to("academy", "academy_id", TENANT_TABLE)];

const STUDENT_PROFILES: &[RelationLink] = &[
    RelationLink::belongs_to("user", "user_id", "users"),
    RelationLink::belongs_to("grade_level", "grade_level_id", "grade_levels"),
];

const TEACHER_PROFILES: &[RelationLink] = &[
    RelationLink::belongs_to("academy", "academy_id", TENANT_TABLE),
    RelationLink::belongs_to("user", "user_id", "users"),
    RelationLink::belongs_to("grade_level", "grade_level_id", "grade_levels"),
];

const INTERACTIVE_COURSES: &[RelationLink] = &[
    RelationLink::belongs_to("academy", "academy_id", TENANT_TABLE),
    RelationLink::belongs_to("teacher", "teacher_id", "teacher_profiles"),
    RelationLink::belongs_to("grade_level", "grade_level_id", "grade_levels"),
];

const LESSONS: &[RelationLink] =
    &[RelationLink::belongs_to("course", "course_id", "interactive_courses")];

const PACKAGES: &[RelationLink] = &[RelationLink::belongs_to("academy", "academy_id", TENANT_TABLE)];

const SUBSCRIPTIONS: &[RelationLink] = &[
    RelationLink::belongs_to("package", "package_id", "packages"),
    RelationLink::belongs_to("student", "student_id", "student_profiles"),
];

const COURSE_REVIEWS: &[RelationLink] = &[
    RelationLink::belongs_to("course", "course_id", "interactive_courses"),
    RelationLink::belongs_to("student", "student_id", "student_profiles"),
];

const TEACHER_PAYOUTS: &[RelationLink] =
    &[RelationLink::belongs_to("teacher", "teacher_id", "teacher_profiles")];

/// Relationship graph of the academy schema.
#[must_use]
pub fn relation_graph() -> RelationGraph {
    RelationGraph::new(TENANT_TABLE)
        .with_table("users", USERS)
        .with_table("grade_levels", GRADE_LEVELS)
        .with_table("student_profiles", STUDENT_PROFILES)
        .with_table("teacher_profiles", TEACHER_PROFILES)
        .with_table("interactive_courses", INTERACTIVE_COURSES)
        .with_table("lessons", LESSONS)
        .with_table("packages", PACKAGES)
        .with_table("subscriptions", SUBSCRIPTIONS)
        .with_table("course_reviews", COURSE_REVIEWS)
        .with_table("teacher_payouts", TEACHER_PAYOUTS)
}
