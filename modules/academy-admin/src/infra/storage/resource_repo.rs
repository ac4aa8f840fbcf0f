//! Generic sea-orm repository serving every admin resource.
//!
//! Behavior differs between resources only through their [`AdminEntity`]
//! wiring. All reads and writes go through [`SecureConn`], so a row outside
//! the caller's scope can be neither seen nor changed.

use std::collections::{HashMap, HashSet};
use std::marker::PhantomData;

use async_trait::async_trait;
use itqan_db::secure::{AccessScope, Scoped, SecureConn, SecureSelect, SecureUpdateMany, Trashed};
use itqan_security::Actor;
use sea_orm::sea_query::{Expr, IntoCondition};
use sea_orm::{
    ColumnTrait, Condition, DatabaseTransaction, EntityTrait, IdenStatic, ModelTrait, Order,
    QueryFilter,
};
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::domain::dependency_guard::{
    DependencyCount, DependencyReport, RecordRef, ensure_deletable,
};
use crate::domain::error::DomainError;
use crate::domain::repo::ResourceRepository;
use crate::domain::resource::{AcademyRef, ListFilter, ResourceKind};
use crate::domain::workflow::{
    self, ApprovalStatus, Plan, RecordState, StateChange, StatusAction, TransitionOutcome,
};
use crate::infra::storage::admin_entity::AdminEntity;
use crate::infra::storage::entity::academy;

pub struct OrmResourceRepository<E> {
    db: SecureConn,
    kind: ResourceKind,
    _entity: PhantomData<fn() -> E>,
}

impl<E: AdminEntity> OrmResourceRepository<E> {
    #[must_use]
    pub fn new(db: SecureConn) -> Self {
        Self {
            db,
            kind: E::KIND,
            _entity: PhantomData,
        }
    }

    fn select(
        &self,
        scope: &AccessScope,
        filter: &ListFilter,
    ) -> Result<SecureSelect<E, Scoped>, DomainError> {
        filter.validate(&self.kind)?;
        let mut query = self.db.find::<E>(scope)?.trashed(filter.trashed);
        if let (Some(status), Some(col)) = (filter.approval, E::approval_col()) {
            query = query.filter(col.eq(status.as_str()).into_condition());
        }
        if let (Some(active), Some(col)) = (filter.active, E::active_col()) {
            query = query.filter(col.eq(active).into_condition());
        }
        Ok(query)
    }
}

fn id_col<E: AdminEntity>() -> Result<E::Column, DomainError> {
    E::resource_col().ok_or_else(|| {
        DomainError::query_construction(format!("{} has no resource id column", E::KIND.name))
    })
}

fn read<E, T>(model: &E::Model, col: E::Column) -> Result<T, DomainError>
where
    E: AdminEntity,
    T: sea_orm::sea_query::ValueType,
{
    <T as sea_orm::sea_query::ValueType>::try_from(model.get(col)).map_err(|_| {
        DomainError::database(format!(
            "unexpected value in {}.{}",
            E::KIND.name,
            col.as_str()
        ))
    })
}

fn state_of<E: AdminEntity>(model: &E::Model) -> Result<RecordState, DomainError> {
    let approval = E::approval_col()
        .map(|col| read::<E, String>(model, col)?.parse::<ApprovalStatus>())
        .transpose()?;
    let active = E::active_col()
        .map(|col| read::<E, bool>(model, col))
        .transpose()?;
    let trashed = E::soft_delete_col()
        .map(|col| read::<E, Option<OffsetDateTime>>(model, col).map(|at| at.is_some()))
        .transpose()?;
    Ok(RecordState {
        approval,
        active,
        trashed,
    })
}

async fn report_for<E: AdminEntity>(
    tx: &DatabaseTransaction,
    model: &E::Model,
) -> Result<DependencyReport, DomainError>
where
    E::Model: Sync,
{
    let id = E::id_of(model);
    let mut counts = Vec::with_capacity(E::dependencies().len());
    for rule in E::dependencies() {
        let count = (rule.count)(tx, id).await?;
        counts.push(DependencyCount::new(rule.label, count));
    }
    Ok(DependencyReport {
        record: RecordRef {
            id,
            label: E::label_of(model),
        },
        counts,
    })
}

fn write_change<E: AdminEntity>(
    mut update: SecureUpdateMany<E, Scoped>,
    change: &StateChange,
    actor_id: Uuid,
    now: OffsetDateTime,
) -> Result<SecureUpdateMany<E, Scoped>, DomainError> {
    let missing = |axis: &str| {
        DomainError::query_construction(format!("{} has no {axis} column", E::KIND.name))
    };

    match change {
        StateChange::Approval { status, reason } => {
            let col = E::approval_col().ok_or_else(|| missing("approval"))?;
            update = update.col_expr(col, Expr::value(status.as_str()));
            if let Some(audit) = E::approval_audit() {
                update = match status {
                    ApprovalStatus::Approved => update
                        .col_expr(audit.approved_by, Expr::value(actor_id))
                        .col_expr(audit.approved_at, Expr::value(now)),
                    ApprovalStatus::Rejected => update
                        .col_expr(audit.rejected_by, Expr::value(actor_id))
                        .col_expr(audit.rejected_at, Expr::value(now))
                        .col_expr(audit.rejection_reason, Expr::value(reason.clone())),
                    ApprovalStatus::Pending => update,
                };
            }
        }
        StateChange::Active(active) => {
            let col = E::active_col().ok_or_else(|| missing("active"))?;
            update = update.col_expr(col, Expr::value(*active));
        }
        StateChange::SoftDelete => {
            let col = E::soft_delete_col().ok_or_else(|| missing("soft-delete"))?;
            update = update.col_expr(col, Expr::value(now));
        }
        StateChange::Restore => {
            let col = E::soft_delete_col().ok_or_else(|| missing("soft-delete"))?;
            update = update.col_expr(col, Expr::value(Option::<OffsetDateTime>::None));
        }
    }
    Ok(update)
}

#[async_trait]
impl<E> ResourceRepository for OrmResourceRepository<E>
where
    E: AdminEntity + Send + Sync,
    E::Model: Sync,
{
    type Row = E::Model;

    fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    fn row_id(row: &E::Model) -> Uuid {
        E::id_of(row)
    }

    async fn list(
        &self,
        scope: &AccessScope,
        filter: &ListFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<E::Model>, DomainError> {
        let rows = self
            .select(scope, filter)?
            .order_by(E::created_at_col(), Order::Desc)
            .order_by(id_col::<E>()?, Order::Asc)
            .offset(offset)
            .limit(limit)
            .all(self.db.conn())
            .await?;
        Ok(rows)
    }

    async fn count(&self, scope: &AccessScope, filter: &ListFilter) -> Result<u64, DomainError> {
        Ok(self.select(scope, filter)?.count(self.db.conn()).await?)
    }

    async fn academies_of(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, AcademyRef>, DomainError> {
        let index = self.db.tenant_index::<E, _>(self.db.conn(), ids).await?;
        if index.is_empty() {
            return Ok(HashMap::new());
        }

        let tenant_ids: HashSet<Uuid> = index.values().copied().collect();
        let names: HashMap<Uuid, String> = academy::Entity::find()
            .filter(academy::Column::Id.is_in(tenant_ids))
            .all(self.db.conn())
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect();

        Ok(index
            .into_iter()
            .filter_map(|(row_id, academy_id)| {
                names.get(&academy_id).map(|name| {
                    (
                        row_id,
                        AcademyRef {
                            id: academy_id,
                            name: name.clone(),
                        },
                    )
                })
            })
            .collect())
    }

    async fn dependency_report(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<DependencyReport>, DomainError> {
        let db = self.db.clone();
        let scope = scope.clone();
        self.db
            .in_transaction_mapped(move |tx| {
                Box::pin(async move {
                    let Some(model) = db.find_by_id::<E>(&scope, id)?.one(tx).await? else {
                        return Ok(None);
                    };
                    Ok(Some(report_for::<E>(tx, &model).await?))
                })
            })
            .await
    }

    async fn state(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<Option<RecordState>, DomainError> {
        self.db
            .find_by_id::<E>(scope, id)?
            .one(self.db.conn())
            .await?
            .map(|model| state_of::<E>(&model))
            .transpose()
    }

    async fn delete_guarded(
        &self,
        scope: &AccessScope,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let id_col = id_col::<E>()?;
        let db = self.db.clone();
        let scope = scope.clone();
        let ids = ids.to_vec();

        self.db
            .in_transaction_mapped(move |tx| {
                Box::pin(async move {
                    let models = db
                        .find::<E>(&scope)?
                        .trashed(Trashed::With)
                        .filter(Condition::all().add(id_col.is_in(ids)))
                        .all(tx)
                        .await?;

                    let mut reports = Vec::with_capacity(models.len());
                    for model in &models {
                        reports.push(report_for::<E>(tx, model).await?);
                    }
                    ensure_deletable(E::KIND.name, &reports)?;

                    let found: Vec<Uuid> = models.iter().map(E::id_of).collect();
                    if found.is_empty() {
                        return Ok(found);
                    }
                    let result = db
                        .delete_many::<E>(&scope)?
                        .filter(Condition::all().add(id_col.is_in(found.clone())))
                        .exec(tx)
                        .await?;
                    debug!(deleted = result.rows_affected, "Purged records");
                    Ok(found)
                })
            })
            .await
    }

    async fn transition(
        &self,
        scope: &AccessScope,
        actor: &Actor,
        id: Uuid,
        action: &StatusAction,
    ) -> Result<TransitionOutcome, DomainError> {
        let id_col = id_col::<E>()?;
        let db = self.db.clone();
        let scope = scope.clone();
        let action = action.clone();
        let actor_id = actor.id();

        self.db
            .in_transaction_mapped(move |tx| {
                Box::pin(async move {
                    let model = db
                        .find_by_id::<E>(&scope, id)?
                        .one(tx)
                        .await?
                        .ok_or_else(|| DomainError::not_found(E::KIND.name, id))?;
                    let state = state_of::<E>(&model)?;
                    let only_this = Condition::all().add(id_col.eq(id));

                    match workflow::plan(state, &action)? {
                        Plan::Unchanged => Ok(TransitionOutcome::Unchanged(state)),
                        Plan::Apply(change) => {
                            let now = OffsetDateTime::now_utc();
                            let update = db
                                .update_many::<E>(&scope)?
                                .filter(only_this)
                                .col_expr(E::updated_at_col(), Expr::value(now));
                            write_change::<E>(update, &change, actor_id, now)?
                                .exec(tx)
                                .await?;
                            Ok(TransitionOutcome::Changed(state.after(&change)))
                        }
                        Plan::Purge => {
                            let report = report_for::<E>(tx, &model).await?;
                            ensure_deletable(E::KIND.name, std::slice::from_ref(&report))?;
                            db.delete_many::<E>(&scope)?
                                .filter(only_this)
                                .exec(tx)
                                .await?;
                            Ok(TransitionOutcome::Purged)
                        }
                    }
                })
            })
            .await
    }
}
