use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use itqan_db::secure::Trashed;

use crate::domain::error::DomainError;
use crate::domain::workflow::{ApprovalStatus, TransitionOutcome};

/// How a resource tracks approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAxis {
    None,
    /// Status column only.
    Simple,
    /// Status plus who/when columns and a rejection reason.
    Audited,
}

/// Static description of a resource type. Resources differ only by
/// composition of these capabilities and their dependency rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    /// Display name used in messages, e.g. `"grade level"`.
    pub name: &'static str,
    pub approval: ApprovalAxis,
    pub active_flag: bool,
    pub soft_delete: bool,
}

impl ResourceKind {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            approval: ApprovalAxis::None,
            active_flag: false,
            soft_delete: false,
        }
    }

    #[must_use]
    pub const fn with_approval(mut self, approval: ApprovalAxis) -> Self {
        self.approval = approval;
        self
    }

    #[must_use]
    pub const fn with_active_flag(mut self) -> Self {
        self.active_flag = true;
        self
    }

    #[must_use]
    pub const fn with_soft_delete(mut self) -> Self {
        self.soft_delete = true;
        self
    }

    #[must_use]
    pub const fn has_approval(&self) -> bool {
        !matches!(self.approval, ApprovalAxis::None)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFilter {
    pub approval: Option<ApprovalStatus>,
    pub active: Option<bool>,
    pub trashed: Trashed,
}

impl ListFilter {
    #[must_use]
    pub fn approval(status: ApprovalStatus) -> Self {
        Self {
            approval: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn active(active: bool) -> Self {
        Self {
            active: Some(active),
            ..Self::default()
        }
    }

    /// Reject filters on axes the resource does not have.
    ///
    /// # Errors
    /// `DomainError::Validation` naming the offending filter.
    pub fn validate(&self, kind: &ResourceKind) -> Result<(), DomainError> {
        if self.approval.is_some() && !kind.has_approval() {
            return Err(DomainError::validation(
                "approval",
                format!("{} has no approval status", kind.name),
            ));
        }
        if self.active.is_some() && !kind.active_flag {
            return Err(DomainError::validation(
                "active",
                format!("{} has no active flag", kind.name),
            ));
        }
        if self.trashed != Trashed::Without && !kind.soft_delete {
            return Err(DomainError::validation(
                "trashed",
                format!("{} does not support the trash", kind.name),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    pub offset: u64,
    /// Clamped to the configured maximum; `None` uses the default page size.
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub filter: ListFilter,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademyRef {
    pub id: Uuid,
    pub name: String,
}

/// A listed row; `academy` is filled in global mode only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listed<T> {
    pub row: T,
    pub academy: Option<AcademyRef>,
}

/// Per-record result of a bulk operation.
#[derive(Debug)]
pub struct RecordOutcome {
    pub id: Uuid,
    pub result: Result<TransitionOutcome, DomainError>,
}

impl RecordOutcome {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
