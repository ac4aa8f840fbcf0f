#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures: an in-memory admin core plus seed helpers that insert rows
//! straight through sea-orm, bypassing the admin services under test.

use academy_admin::infra::storage::entity::{
    academy, course_review, grade_level, interactive_course, lesson, package, student_profile,
    subscription, teacher_payout, teacher_profile, user,
};
use academy_admin::{AcademyAdmin, AdminConfig};
use itqan_security::{Actor, Role};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use time::OffsetDateTime;
use uuid::Uuid;

pub async fn admin() -> AcademyAdmin {
    admin_with(AdminConfig::default()).await
}

pub async fn admin_with(cfg: AdminConfig) -> AcademyAdmin {
    AcademyAdmin::connect(&cfg).await.expect("in-memory admin core")
}

pub fn conn(admin: &AcademyAdmin) -> &DatabaseConnection {
    admin.db().conn()
}

pub fn super_admin() -> Actor {
    Actor::builder(Role::SuperAdmin).build()
}

pub fn admin_of(academy_id: Uuid) -> Actor {
    Actor::builder(Role::Admin).academy_id(academy_id).build()
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub struct NewAcademy<'a> {
    pub name: &'a str,
    pub subdomain: &'a str,
    pub is_active: bool,
    pub maintenance_mode: bool,
    pub created_at: OffsetDateTime,
}

impl<'a> NewAcademy<'a> {
    pub fn new(name: &'a str, subdomain: &'a str) -> Self {
        Self {
            name,
            subdomain,
            is_active: true,
            maintenance_mode: false,
            created_at: now(),
        }
    }

    pub async fn insert(self, db: &DatabaseConnection) -> Uuid {
        let id = Uuid::new_v4();
        academy::ActiveModel {
            id: Set(id),
            name: Set(self.name.to_owned()),
            subdomain: Set(self.subdomain.to_owned()),
            is_active: Set(self.is_active),
            maintenance_mode: Set(self.maintenance_mode),
            created_at: Set(self.created_at),
            updated_at: Set(self.created_at),
        }
        .insert(db)
        .await
        .unwrap();
        id
    }
}

pub async fn academy(db: &DatabaseConnection, name: &str, subdomain: &str) -> Uuid {
    NewAcademy::new(name, subdomain).insert(db).await
}

pub async fn user(db: &DatabaseConnection, academy_id: Option<Uuid>, role: Role) -> Uuid {
    let id = Uuid::new_v4();
    user::ActiveModel {
        id: Set(id),
        academy_id: Set(academy_id),
        name: Set(format!("{role} {}", id.simple())),
        email: Set(format!("{}@itqan.test", id.simple())),
        role: Set(role.as_str().to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn grade_level(db: &DatabaseConnection, academy_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    grade_level::ActiveModel {
        id: Set(id),
        academy_id: Set(academy_id),
        name: Set(name.to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn student(
    db: &DatabaseConnection,
    academy_id: Uuid,
    grade_level_id: Option<Uuid>,
    code: &str,
) -> Uuid {
    let user_id = user(db, Some(academy_id), Role::Student).await;
    let id = Uuid::new_v4();
    student_profile::ActiveModel {
        id: Set(id),
        user_id: Set(user_id),
        grade_level_id: Set(grade_level_id),
        student_code: Set(code.to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn teacher(
    db: &DatabaseConnection,
    academy_id: Uuid,
    grade_level_id: Option<Uuid>,
    full_name: &str,
) -> Uuid {
    let user_id = user(db, Some(academy_id), Role::Teacher).await;
    let id = Uuid::new_v4();
    teacher_profile::ActiveModel {
        id: Set(id),
        academy_id: Set(academy_id),
        user_id: Set(user_id),
        grade_level_id: Set(grade_level_id),
        full_name: Set(full_name.to_owned()),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn course(
    db: &DatabaseConnection,
    academy_id: Uuid,
    teacher_id: Option<Uuid>,
    title: &str,
) -> Uuid {
    let id = Uuid::new_v4();
    interactive_course::ActiveModel {
        id: Set(id),
        academy_id: Set(academy_id),
        teacher_id: Set(teacher_id),
        grade_level_id: Set(None),
        title: Set(title.to_owned()),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
        deleted_at: Set(None),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn lesson(db: &DatabaseConnection, course_id: Uuid, title: &str, position: i32) -> Uuid {
    let id = Uuid::new_v4();
    lesson::ActiveModel {
        id: Set(id),
        course_id: Set(course_id),
        title: Set(title.to_owned()),
        position: Set(position),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn package(db: &DatabaseConnection, academy_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    package::ActiveModel {
        id: Set(id),
        academy_id: Set(academy_id),
        name: Set(name.to_owned()),
        monthly_price_cents: Set(15_000),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn subscription(
    db: &DatabaseConnection,
    package_id: Uuid,
    student_id: Uuid,
    reference: &str,
) -> Uuid {
    let id = Uuid::new_v4();
    subscription::ActiveModel {
        id: Set(id),
        package_id: Set(package_id),
        student_id: Set(student_id),
        reference: Set(reference.to_owned()),
        is_active: Set(true),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn review(db: &DatabaseConnection, course_id: Uuid, student_id: Uuid, rating: i32) -> Uuid {
    let id = Uuid::new_v4();
    course_review::ActiveModel {
        id: Set(id),
        course_id: Set(course_id),
        student_id: Set(student_id),
        rating: Set(rating),
        comment: Set(None),
        status: Set("pending".to_owned()),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}

pub async fn payout(db: &DatabaseConnection, teacher_id: Uuid, period: &str) -> Uuid {
    let id = Uuid::new_v4();
    teacher_payout::ActiveModel {
        id: Set(id),
        teacher_id: Set(teacher_id),
        period: Set(period.to_owned()),
        amount_cents: Set(250_000),
        status: Set("pending".to_owned()),
        approved_by: Set(None),
        approved_at: Set(None),
        rejected_by: Set(None),
        rejected_at: Set(None),
        rejection_reason: Set(None),
        created_at: Set(now()),
        updated_at: Set(now()),
    }
    .insert(db)
    .await
    .unwrap();
    id
}
