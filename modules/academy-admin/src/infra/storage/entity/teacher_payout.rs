use itqan_db::secure::ScopableEntity;
use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::resource::{ApprovalAxis, ResourceKind};
use crate::infra::storage::admin_entity::{AdminEntity, ApprovalAudit};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "teacher_payouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub teacher_id: Uuid,
    /// Billing month, `YYYY-MM`.
    pub period: String,
    pub amount_cents: i64,
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<OffsetDateTime>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<OffsetDateTime>,
    pub rejection_reason: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teacher_profile::Entity",
        from = "Column::TeacherId",
        to = "super::teacher_profile::Column::Id"
    )]
    Teacher,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::teacher_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ScopableEntity for Entity {
    fn tenant_path() -> Option<&'static str> {
        Some("teacher.academy")
    }

    fn resource_col() -> Option<Column> {
        Some(Column::Id)
    }

    fn soft_delete_col() -> Option<Column> {
        None
    }
}

impl AdminEntity for Entity {
    const KIND: ResourceKind = ResourceKind::new("teacher payout").with_approval(ApprovalAxis::Audited);

    fn id_of(model: &Model) -> Uuid {
        model.id
    }

    fn label_of(model: &Model) -> String {
        format!("payout {}", model.period)
    }

    fn approval_col() -> Option<Column> {
        Some(Column::Status)
    }

    fn approval_audit() -> Option<ApprovalAudit<Column>> {
        Some(ApprovalAudit {
            approved_by: Column::ApprovedBy,
            approved_at: Column::ApprovedAt,
            rejected_by: Column::RejectedBy,
            rejected_at: Column::RejectedAt,
            rejection_reason: Column::RejectionReason,
        })
    }

    fn created_at_col() -> Column {
        Column::CreatedAt
    }

    fn updated_at_col() -> Column {
        Column::UpdatedAt
    }
}
