use itqan_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::resource::ResourceKind;
use crate::infra::storage::admin_entity::AdminEntity;
use crate::infra::storage::dependencies::{self, DependencyRule};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub academy_id: Uuid,
    pub user_id: Uuid,
    pub grade_level_id: Option<Uuid>,
    pub full_name: String,
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
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::interactive_course::Entity")]
    InteractiveCourses,
    #[sea_orm(has_many = "super::teacher_payout::Entity")]
    Payouts,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::interactive_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InteractiveCourses.def()
    }
}

impl Related<super::teacher_payout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payouts.def()
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
    const KIND: ResourceKind = ResourceKind::new("teacher")
        .with_active_flag()
        .with_soft_delete();

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn label_of(model: &Model) -> String {
        model.full_name.clone()
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
        dependencies::TEACHER_PROFILE
    }
}
