use itqan_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::resource::{ApprovalAxis, ResourceKind};
use crate::infra::storage::admin_entity::AdminEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    /// `pending`, `approved` or `rejected`.
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::interactive_course::Entity",
        from = "Column::CourseId",
        to = "super::interactive_course::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::student_profile::Entity",
        from = "Column::StudentId",
        to = "super::student_profile::Column::Id"
    )]
    Student,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::interactive_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ScopableEntity for Entity {
    fn tenant_path() -> Option<&'static str> {
        Some("course.academy")
    }

    fn resource_col() -> Option<Column> {
        Some(Column::Id)
    }

    fn soft_delete_col() -> Option<Column> {
        None
    }
}

impl AdminEntity for Entity {
    const KIND: ResourceKind = ResourceKind::new("course review").with_approval(ApprovalAxis::Simple);

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn label_of(model: &Model) -> String {
        model
            .comment
            .clone()
            .unwrap_or_else(|| format!("{}-star review", model.rating))
    }

    fn approval_col() -> Option<Column> {
        Some(Column::Status)
    }

    fn created_at_col() -> Column {
        Column::CreatedAt
    }

    fn updated_at_col() -> Column {
        Column::UpdatedAt
    }
}
