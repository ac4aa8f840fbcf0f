use std::collections::HashSet;
use std::sync::Arc;

use itqan_security::{Actor, TenantContext};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::dependency_guard::{DeleteCheck, ensure_deletable};
use crate::domain::error::DomainError;
use crate::domain::repo::ResourceRepository;
use crate::domain::resource::{
    ApprovalAxis, ListFilter, ListQuery, Listed, Page, RecordOutcome, ResourceKind,
};
use crate::domain::workflow::{self, ApprovalStatus, Plan, StatusAction, TransitionOutcome};

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_bulk_selection: usize,
    pub require_rejection_reason: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
            max_bulk_selection: 500,
            require_rejection_reason: true,
        }
    }
}

/// Admin operations for one resource type, always within a resolved tenant context.
pub struct ResourceService<R: ResourceRepository> {
    repo: Arc<R>,
    cfg: ServiceConfig,
}

impl<R: ResourceRepository> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            cfg: self.cfg.clone(),
        }
    }
}

impl<R: ResourceRepository> ResourceService<R> {
    #[must_use]
    pub fn new(repo: Arc<R>, cfg: ServiceConfig) -> Self {
        Self { repo, cfg }
    }

    #[must_use]
    pub fn kind(&self) -> &ResourceKind {
        self.repo.kind()
    }
}

// Read operations
impl<R: ResourceRepository> ResourceService<R> {
    /// One page of rows. In global mode each row carries its academy,
    /// loaded for the whole page at once.
    ///
    /// # Errors
    /// `Validation` for a filter on an axis the resource lacks; storage errors.
    #[instrument(skip(self, query), fields(resource = self.kind().name, global = ctx.is_global()))]
    pub async fn list(
        &self,
        ctx: &TenantContext,
        query: &ListQuery,
    ) -> Result<Page<Listed<R::Row>>, DomainError> {
        query.filter.validate(self.kind())?;

        let limit = query
            .page
            .limit
            .unwrap_or(self.cfg.default_page_size)
            .clamp(1, self.cfg.max_page_size.max(1));
        let offset = query.page.offset;
        let scope = ctx.to_scope();

        let rows = self.repo.list(&scope, &query.filter, offset, limit).await?;
        let total = self.repo.count(&scope, &query.filter).await?;

        let items = if ctx.is_global() {
            let ids: Vec<Uuid> = rows.iter().map(R::row_id).collect();
            let mut academies = self.repo.academies_of(&ids).await?;
            rows.into_iter()
                .map(|row| {
                    let academy = academies.remove(&R::row_id(&row));
                    Listed { row, academy }
                })
                .collect()
        } else {
            rows.into_iter()
                .map(|row| Listed { row, academy: None })
                .collect::<Vec<_>>()
        };

        debug!(returned = items.len(), total, "Listed rows");
        Ok(Page {
            items,
            offset,
            limit,
            total,
        })
    }

    /// # Errors
    /// `Validation` for a filter on an axis the resource lacks; storage errors.
    #[instrument(skip(self, filter), fields(resource = self.kind().name))]
    pub async fn count(&self, ctx: &TenantContext, filter: &ListFilter) -> Result<u64, DomainError> {
        filter.validate(self.kind())?;
        self.repo.count(&ctx.to_scope(), filter).await
    }

    /// Pending-review counter for the navigation badge; `None` when there is
    /// nothing to review or the resource has no approval status.
    ///
    /// # Errors
    /// Storage errors.
    pub async fn pending_badge(&self, ctx: &TenantContext) -> Result<Option<u64>, DomainError> {
        if !self.kind().has_approval() {
            return Ok(None);
        }
        let pending = self
            .count(ctx, &ListFilter::approval(ApprovalStatus::Pending))
            .await?;
        Ok((pending > 0).then_some(pending))
    }

    /// Live records, or live active records when the resource has an active flag.
    ///
    /// # Errors
    /// Storage errors.
    pub async fn active_badge(&self, ctx: &TenantContext) -> Result<u64, DomainError> {
        let filter = if self.kind().active_flag {
            ListFilter::active(true)
        } else {
            ListFilter::default()
        };
        self.count(ctx, &filter).await
    }

    /// # Errors
    /// `NotFound` if the record is not visible in `ctx`; storage errors.
    #[instrument(skip(self), fields(resource = self.kind().name))]
    pub async fn can_delete(&self, ctx: &TenantContext, id: Uuid) -> Result<DeleteCheck, DomainError> {
        let report = self
            .repo
            .dependency_report(&ctx.to_scope(), id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.kind().name, id))?;
        Ok(DeleteCheck::from(&report))
    }
}

// Mutations
impl<R: ResourceRepository> ResourceService<R> {
    /// Delete one record: moved to the trash when the resource supports it,
    /// otherwise purged after the dependency guard clears.
    ///
    /// # Errors
    /// `DependencyBlocked`, `NotFound`; storage errors.
    #[instrument(skip(self, actor), fields(resource = self.kind().name, actor_id = %actor.id()))]
    pub async fn delete(
        &self,
        ctx: &TenantContext,
        actor: &Actor,
        id: Uuid,
    ) -> Result<TransitionOutcome, DomainError> {
        if self.kind().soft_delete {
            return self.transition(ctx, actor, id, &StatusAction::SoftDelete).await;
        }

        let deleted = self
            .repo
            .delete_guarded(&ctx.to_scope(), &[id])
            .await
            .inspect_err(|e| warn!(error = %e, "Delete refused"))?;
        if deleted.is_empty() {
            return Err(DomainError::not_found(self.kind().name, id));
        }
        info!("Deleted record");
        Ok(TransitionOutcome::Purged)
    }

    /// Delete a selection. Trash-capable resources are handled per record;
    /// purges are all-or-nothing: one blocked record refuses the whole batch.
    ///
    /// # Errors
    /// `Validation` for an oversized selection; `DependencyBlocked` naming
    /// every blocked record; storage errors.
    #[instrument(skip(self, actor, ids), fields(resource = self.kind().name, selected = ids.len()))]
    pub async fn bulk_delete(
        &self,
        ctx: &TenantContext,
        actor: &Actor,
        ids: &[Uuid],
    ) -> Result<Vec<RecordOutcome>, DomainError> {
        let ids = self.selection(ids)?;
        if self.kind().soft_delete {
            return self
                .bulk_transition(ctx, actor, &ids, &StatusAction::SoftDelete)
                .await;
        }

        let deleted: HashSet<Uuid> = self
            .repo
            .delete_guarded(&ctx.to_scope(), &ids)
            .await
            .inspect_err(|e| warn!(error = %e, "Bulk delete refused"))?
            .into_iter()
            .collect();
        info!(deleted = deleted.len(), "Bulk delete applied");

        Ok(ids
            .into_iter()
            .map(|id| RecordOutcome {
                id,
                result: if deleted.contains(&id) {
                    Ok(TransitionOutcome::Purged)
                } else {
                    Err(DomainError::not_found(self.kind().name, id))
                },
            })
            .collect())
    }

    /// Apply a status action to one record.
    ///
    /// # Errors
    /// `InvalidTransition`, `Validation` (missing rejection reason),
    /// `DependencyBlocked` (force delete), `NotFound`; storage errors.
    #[instrument(
        skip(self, actor, action),
        fields(resource = self.kind().name, action = action.name(), actor_id = %actor.id())
    )]
    pub async fn transition(
        &self,
        ctx: &TenantContext,
        actor: &Actor,
        id: Uuid,
        action: &StatusAction,
    ) -> Result<TransitionOutcome, DomainError> {
        self.validate_action(action)?;
        let outcome = self
            .repo
            .transition(&ctx.to_scope(), actor, id, action)
            .await
            .inspect_err(|e| warn!(error = %e, "Transition refused"))?;
        match &outcome {
            TransitionOutcome::Unchanged(_) => debug!("Record already in requested state"),
            TransitionOutcome::Changed(_) => info!("Record transitioned"),
            TransitionOutcome::Purged => info!("Record permanently deleted"),
        }
        Ok(outcome)
    }

    /// Apply one action to every selected record. Each record succeeds or
    /// fails on its own, except that a force delete first checks every
    /// selected record in the trash and refuses the call if any of them
    /// still has dependents. Live records fail on their own.
    ///
    /// # Errors
    /// Whole-call errors only: oversized selection, missing rejection reason,
    /// blocked force delete. Per-record failures are in the outcomes.
    #[instrument(
        skip(self, actor, ids, action),
        fields(resource = self.kind().name, action = action.name(), selected = ids.len())
    )]
    pub async fn bulk_transition(
        &self,
        ctx: &TenantContext,
        actor: &Actor,
        ids: &[Uuid],
        action: &StatusAction,
    ) -> Result<Vec<RecordOutcome>, DomainError> {
        let ids = self.selection(ids)?;
        self.validate_action(action)?;
        let scope = ctx.to_scope();

        if action.is_destructive() {
            let mut reports = Vec::with_capacity(ids.len());
            for id in &ids {
                let Some(state) = self.repo.state(&scope, *id).await? else {
                    continue;
                };
                if !matches!(workflow::plan(state, action), Ok(Plan::Purge)) {
                    continue;
                }
                if let Some(report) = self.repo.dependency_report(&scope, *id).await? {
                    reports.push(report);
                }
            }
            ensure_deletable(self.kind().name, &reports)
                .inspect_err(|e| warn!(error = %e, "Bulk force delete refused"))?;
        }

        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            let result = self.repo.transition(&scope, actor, id, action).await;
            if let Err(e) = &result {
                debug!(record_id = %id, error = %e, "Record skipped");
            }
            outcomes.push(RecordOutcome { id, result });
        }

        let applied = outcomes.iter().filter(|o| o.is_ok()).count();
        info!(applied, failed = outcomes.len() - applied, "Bulk action finished");
        Ok(outcomes)
    }

    /// De-duplicated selection within the configured cap.
    fn selection(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, DomainError> {
        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        if unique.len() > self.cfg.max_bulk_selection {
            return Err(DomainError::validation(
                "ids",
                format!(
                    "selection of {} records exceeds the limit of {}",
                    unique.len(),
                    self.cfg.max_bulk_selection
                ),
            ));
        }
        Ok(unique)
    }

    fn validate_action(&self, action: &StatusAction) -> Result<(), DomainError> {
        if let StatusAction::Reject { reason } = action {
            let blank = reason.as_deref().is_none_or(|r| r.trim().is_empty());
            if blank
                && self.cfg.require_rejection_reason
                && self.kind().approval == ApprovalAxis::Audited
            {
                return Err(DomainError::validation(
                    "reason",
                    format!("rejecting a {} requires a reason", self.kind().name),
                ));
            }
        }
        Ok(())
    }
}
