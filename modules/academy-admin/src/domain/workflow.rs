//! Status transitions for reviewable, toggleable and trashable records.
//!
//! A record has up to three independent axes: approval
//! (`pending`/`approved`/`rejected`), an active flag, and soft-delete.
//! [`plan`] decides what an action does to a given state without touching
//! storage, so the same rules apply to single and bulk invocations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::database(format!(
                "unknown approval status '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StatusAction {
    Approve,
    Reject { reason: Option<String> },
    Activate,
    Deactivate,
    ToggleActive,
    SoftDelete,
    Restore,
    ForceDelete,
}

impl StatusAction {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::ToggleActive => "toggle active",
            Self::SoftDelete => "delete",
            Self::Restore => "restore",
            Self::ForceDelete => "force delete",
        }
    }

    /// Whether the action removes the record permanently.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::ForceDelete)
    }
}

/// Current state of a record. `None` marks an axis the resource does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecordState {
    pub approval: Option<ApprovalStatus>,
    pub active: Option<bool>,
    pub trashed: Option<bool>,
}

impl RecordState {
    #[must_use]
    pub fn is_trashed(&self) -> bool {
        self.trashed == Some(true)
    }

    /// State after `change` has been written.
    #[must_use]
    pub fn after(self, change: &StateChange) -> Self {
        match change {
            StateChange::Approval { status, .. } => Self {
                approval: Some(*status),
                ..self
            },
            StateChange::Active(active) => Self {
                active: Some(*active),
                ..self
            },
            StateChange::SoftDelete => Self {
                trashed: Some(true),
                ..self
            },
            StateChange::Restore => Self {
                trashed: Some(false),
                ..self
            },
        }
    }
}

/// A single-axis write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Approval {
        status: ApprovalStatus,
        reason: Option<String>,
    },
    Active(bool),
    SoftDelete,
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Already in the requested state; succeed without writing.
    Unchanged,
    Apply(StateChange),
    /// Remove the row; the caller must clear the dependency guard first.
    Purge,
}

/// Result of applying an action to one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "state", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Unchanged(RecordState),
    Changed(RecordState),
    Purged,
}

impl TransitionOutcome {
    #[must_use]
    pub fn state(&self) -> Option<&RecordState> {
        match self {
            Self::Unchanged(s) | Self::Changed(s) => Some(s),
            Self::Purged => None,
        }
    }
}

/// Decide what `action` does to a record in `state`.
///
/// # Errors
/// `DomainError::InvalidTransition` when the resource lacks the axis the
/// action works on, when a status action targets a trashed record, or when a
/// force delete targets a live record.
pub fn plan(state: RecordState, action: &StatusAction) -> Result<Plan, DomainError> {
    let name = action.name();

    let lifecycle = matches!(
        action,
        StatusAction::SoftDelete | StatusAction::Restore | StatusAction::ForceDelete
    );
    if state.is_trashed() && !lifecycle {
        return Err(DomainError::invalid_transition(
            name,
            "record is in the trash; restore it first",
        ));
    }

    match action {
        StatusAction::Approve | StatusAction::Reject { .. } => {
            let current = state
                .approval
                .ok_or_else(|| DomainError::invalid_transition(name, "resource has no approval status"))?;
            let (target, reason) = match action {
                StatusAction::Reject { reason } => (ApprovalStatus::Rejected, reason.clone()),
                _ => (ApprovalStatus::Approved, None),
            };
            if current == target {
                Ok(Plan::Unchanged)
            } else {
                Ok(Plan::Apply(StateChange::Approval {
                    status: target,
                    reason,
                }))
            }
        }
        StatusAction::Activate | StatusAction::Deactivate | StatusAction::ToggleActive => {
            let current = state
                .active
                .ok_or_else(|| DomainError::invalid_transition(name, "resource has no active flag"))?;
            let target = match action {
                StatusAction::Activate => true,
                StatusAction::Deactivate => false,
                _ => !current,
            };
            if current == target {
                Ok(Plan::Unchanged)
            } else {
                Ok(Plan::Apply(StateChange::Active(target)))
            }
        }
        StatusAction::SoftDelete => match state.trashed {
            None => Err(DomainError::invalid_transition(
                name,
                "resource does not support the trash",
            )),
            Some(true) => Ok(Plan::Unchanged),
            Some(false) => Ok(Plan::Apply(StateChange::SoftDelete)),
        },
        StatusAction::Restore => match state.trashed {
            None => Err(DomainError::invalid_transition(
                name,
                "resource does not support the trash",
            )),
            Some(false) => Ok(Plan::Unchanged),
            Some(true) => Ok(Plan::Apply(StateChange::Restore)),
        },
        StatusAction::ForceDelete => match state.trashed {
            None => Err(DomainError::invalid_transition(
                name,
                "resource does not support the trash",
            )),
            Some(false) => Err(DomainError::invalid_transition(
                name,
                "only records in the trash can be permanently deleted",
            )),
            Some(true) => Ok(Plan::Purge),
        },
    }
}
