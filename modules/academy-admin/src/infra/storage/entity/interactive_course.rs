use itqan_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::resource::ResourceKind;
use crate::infra::storage::admin_entity::AdminEntity;
use crate::infra::storage::dependencies::{self, DependencyRule};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "interactive_courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub academy_id: Uuid,
    pub teacher_id: Option<Uuid>,
    pub grade_level_id: Option<Uuid>,
    pub title: String,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academy::Entity",
        from = "Column::AcademyId",
        to = "super::academy::Column::Id"
    )]
    Academy,
    #[sea_orm(
        belongs_to = "super::teacher_profile::Entity",
        from = "Column::TeacherId",
        to = "super::teacher_profile::Column::Id"
    )]
    Teacher,
    #[sea_orm(has_many = "super::lesson::Entity")]
    Lessons,
    #[sea_orm(has_many = "super::course_review::Entity")]
    Reviews,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::teacher_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lessons.def()
    }
}

impl Related<super::course_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ScopableEntity for Entity {
    fn tenant_path() -> Option<&'static str> {
        Some("academy")
    }

    fn resource_col() -> Option<Column> {
        Some(Column::Id)
    }

    fn soft_delete_col() -> Option<Column> {
        Some(Column::DeletedAt)
    }
}

impl AdminEntity for Entity {
    const KIND: ResourceKind = ResourceKind::new("interactive course")
        .with_active_flag()
        .with_soft_delete();

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn label_of(model: &Model) -> String {
        model.title.clone()
    }

    fn active_col() -> Option<Column> {
        Some(Column::IsActive)
    }

    fn created_at_col() -> Column {
        Column::CreatedAt
    }

    fn updated_at_col() -> Column {
        Column::UpdatedAt
    }

    fn dependencies() -> &'static [DependencyRule] {
        dependencies::INTERACTIVE_COURSE
    }
}
