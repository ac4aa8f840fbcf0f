use std::collections::HashMap;

use async_trait::async_trait;
use itqan_security::{AccessScope, Actor};
use uuid::Uuid;

use crate::domain::dependency_guard::DependencyReport;
use crate::domain::error::DomainError;
use crate::domain::resource::{AcademyRef, ListFilter, ResourceKind};
use crate::domain::workflow::{RecordState, StatusAction, TransitionOutcome};

/// Storage port for one resource type.
///
/// Every method takes the caller's resolved scope; implementations must never
/// read or write rows outside it.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    type Row: Send + Sync + 'static;

    fn kind(&self) -> &ResourceKind;

    fn row_id(row: &Self::Row) -> Uuid;

    /// Page of rows matching `filter`, newest first.
    async fn list(
        &self,
        scope: &AccessScope,
        filter: &ListFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self::Row>, DomainError>;

    async fn count(&self, scope: &AccessScope, filter: &ListFilter) -> Result<u64, DomainError>;

    /// Owning academy of each id, resolved in one query. Missing ids are absent.
    async fn academies_of(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, AcademyRef>, DomainError>;

    /// Dependency counts of one record; `None` if it is not visible in `scope`.
    async fn dependency_report(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<DependencyReport>, DomainError>;

    /// Current workflow state of one record, trashed or not; `None` if it is
    /// not visible in `scope`.
    async fn state(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<RecordState>, DomainError>;

    /// Hard-delete `ids` in one transaction after the dependency guard clears
    /// every one of them. Returns the ids actually deleted.
    async fn delete_guarded(
        &self,
        scope: &AccessScope,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, DomainError>;

    /// Read, plan and write one record's transition in one transaction.
    async fn transition(
        &self,
        scope: &AccessScope,
        actor: &Actor,
        id: Uuid,
        action: &StatusAction,
    ) -> Result<TransitionOutcome, DomainError>;
}
