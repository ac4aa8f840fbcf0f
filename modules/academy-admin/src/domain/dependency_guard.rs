//! Pre-delete dependency checks.
//!
//! Every deletable resource declares a fixed list of named relationships that
//! reference it. A record with any non-empty relationship cannot be purged;
//! the refusal always names the relationships and their counts.
//!
//! The database's `ON DELETE RESTRICT` foreign keys stay the authoritative
//! backstop; this module exists so the actor learns *why*.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Number of rows referencing a record through one named relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyCount {
    pub label: &'static str,
    pub count: u64,
}

impl DependencyCount {
    #[must_use]
    pub const fn new(label: &'static str, count: u64) -> Self {
        Self { label, count }
    }
}

/// Identity and display label of a record, for refusal messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRef {
    pub id: Uuid,
    pub label: String,
}

/// All dependency counts of one record, in rule declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub record: RecordRef,
    pub counts: Vec<DependencyCount>,
}

impl DependencyReport {
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.counts.iter().any(|c| c.count > 0)
    }

    /// Non-empty relationships only: `"students (3), teachers (1)"`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.blocking()
            .map(|c| format!("{} ({})", c.label, c.count))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn blocking(&self) -> impl Iterator<Item = &DependencyCount> {
        self.counts.iter().filter(|c| c.count > 0)
    }
}

/// Answer to "may this record be deleted?".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteCheck {
    pub allowed: bool,
    pub reasons: Vec<DependencyCount>,
}

impl From<&DependencyReport> for DeleteCheck {
    fn from(report: &DependencyReport) -> Self {
        let reasons: Vec<_> = report.blocking().cloned().collect();
        Self {
            allowed: reasons.is_empty(),
            reasons,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedRecord {
    pub record: RecordRef,
    pub summary: String,
}

/// A destructive operation refused because related records exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyBlocked {
    pub resource: &'static str,
    pub records: Vec<BlockedRecord>,
}

impl std::error::Error for DependencyBlocked {}

impl fmt::Display for DependencyBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.records.as_slice() {
            [single] => write!(
                f,
                "cannot delete {} \"{}\": it still has {}",
                self.resource, single.record.label, single.summary
            ),
            many => {
                write!(
                    f,
                    "cannot delete {} selected {} records that still have dependents: ",
                    many.len(),
                    self.resource
                )?;
                let listed = many
                    .iter()
                    .map(|b| format!("\"{}\" ({})", b.record.label, b.summary))
                    .collect::<Vec<_>>()
                    .join("; ");
                f.write_str(&listed)
            }
        }
    }
}

/// Refuse the whole selection if any record still has dependents.
///
/// # Errors
/// `DomainError::DependencyBlocked` naming every blocked record.
pub fn ensure_deletable(
    resource: &'static str,
    reports: &[DependencyReport],
) -> Result<(), DomainError> {
    let records: Vec<BlockedRecord> = reports
        .iter()
        .filter(|r| r.is_blocking())
        .map(|r| BlockedRecord {
            record: r.record.clone(),
            summary: r.summary(),
        })
        .collect();

    if records.is_empty() {
        Ok(())
    } else {
        Err(DependencyBlocked { resource, records }.into())
    }
}
