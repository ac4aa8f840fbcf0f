use itqan_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::resource::ResourceKind;
use crate::infra::storage::admin_entity::AdminEntity;
use crate::infra::storage::dependencies::{self, DependencyRule};

/// Subscription package (monthly plan) offered by one academy.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub academy_id: Uuid,
    pub name: String,
    pub monthly_price_cents: i64,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::academy::Entity",
        from = "Column::AcademyId",
        to = "super::academy::Column::Id"
    )]
    Academy,
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::academy::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Academy.def()
    }
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
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
        None
    }
}

impl AdminEntity for Entity {
    const KIND: ResourceKind = ResourceKind::new("package").with_active_flag();

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn label_of(model: &Model) -> String {
        model.name.clone()
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
        dependencies::PACKAGE
    }
}
