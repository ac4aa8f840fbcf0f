use itqan_db::secure::ScopableEntity;
use uuid::Uuid;

use crate::domain::resource::ResourceKind;
use crate::infra::storage::dependencies::DependencyRule;

/// Columns written when an approval decision is recorded.
#[derive(Debug, Clone, Copy)]
pub struct ApprovalAudit<C> {
    pub approved_by: C,
    pub approved_at: C,
    pub rejected_by: C,
    pub rejected_at: C,
    pub rejection_reason: C,
}

/// Per-entity admin wiring: which columns carry each workflow axis and which
/// relationships guard a purge.
///
/// Axis columns must agree with `KIND`: an approval column exactly when the
/// kind has approval, an active column exactly when it has an active flag,
/// and a soft-delete column exactly when it supports the trash.
pub trait AdminEntity: ScopableEntity {
    const KIND: ResourceKind;

    fn id_of(model: &Self::Model) -> Uuid;

    /// How a record is named in refusal messages.
    fn label_of(model: &Self::Model) -> String;

    /// `pending` / `approved` / `rejected` string column.
    fn approval_col() -> Option<Self::Column> {
        None
    }

    fn active_col() -> Option<Self::Column> {
        None
    }

    fn approval_audit() -> Option<ApprovalAudit<Self::Column>> {
        None
    }

    fn created_at_col() -> Self::Column;

    fn updated_at_col() -> Self::Column;

    fn dependencies() -> &'static [DependencyRule] {
        &[]
    }
}
