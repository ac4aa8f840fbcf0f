use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};
use std::marker::PhantomData;

use crate::secure::cond::build_scope_condition;
use crate::secure::error::ScopeError;
use crate::secure::relation_graph::RelationGraph;
use crate::secure::{AccessScope, ScopableEntity};

/// Typestate marker: query has not yet been scoped.
/// Cannot execute queries in this state.
#[derive(Debug, Clone, Copy)]
pub struct Unscoped;

/// Typestate marker: query has been scoped with access control.
#[derive(Debug, Clone, Copy)]
pub struct Scoped;

/// Which soft-deleted rows a query should see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trashed {
    /// Live rows only.
    #[default]
    Without,
    /// Live and soft-deleted rows.
    With,
    /// Soft-deleted rows only.
    Only,
}

/// A type-safe wrapper around `SeaORM`'s `Select` that enforces scoping.
///
/// Scoped selects see live rows only until [`trashed`](SecureSelect::trashed)
/// says otherwise. The visibility rule is applied when the query runs, so a
/// later call replaces an earlier one instead of stacking with it.
///
/// ```rust,ignore
/// let scope = AccessScope::tenant(academy_id);
/// let reviews = course_review::Entity::find()
///     .secure()                      // SecureSelect<E, Unscoped>
///     .scope_with(&scope, &graph)?   // SecureSelect<E, Scoped>
///     .all(conn)
///     .await?;
/// ```
#[must_use]
#[derive(Clone, Debug)]
pub struct SecureSelect<E: EntityTrait, S> {
    pub(crate) inner: sea_orm::Select<E>,
    pub(crate) trashed: Trashed,
    pub(crate) _state: PhantomData<S>,
}

/// Extension trait to convert a regular `SeaORM` `Select` into a `SecureSelect`.
pub trait SecureEntityExt<E: EntityTrait>: Sized {
    /// Convert this select query into a secure (unscoped) select.
    /// You must call `.scope_with()` before executing the query.
    fn secure(self) -> SecureSelect<E, Unscoped>;
}

impl<E> SecureEntityExt<E> for sea_orm::Select<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureSelect<E, Unscoped> {
        SecureSelect {
            inner: self,
            trashed: Trashed::default(),
            _state: PhantomData,
        }
    }
}

impl<E> SecureSelect<E, Unscoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Apply access control scope to this query, transitioning to the `Scoped` state.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if the entity's tenant path does
    /// not resolve against `graph`.
    pub fn scope_with(
        self,
        scope: &AccessScope,
        graph: &RelationGraph,
    ) -> Result<SecureSelect<E, Scoped>, ScopeError> {
        let cond = build_scope_condition::<E>(scope, graph)?;
        Ok(SecureSelect {
            inner: self.inner.filter(cond),
            trashed: self.trashed,
            _state: PhantomData,
        })
    }
}

impl<E> SecureSelect<E, Scoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Execute the query and return all matching results.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn all<C>(self, conn: &C) -> Result<Vec<E::Model>, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.into_select().all(conn).await?)
    }

    /// Execute the query and return at most one result.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn one<C>(self, conn: &C) -> Result<Option<E::Model>, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.into_select().one(conn).await?)
    }

    /// Execute the query and return the number of matching rows.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database query fails.
    pub async fn count<C>(self, conn: &C) -> Result<u64, ScopeError>
    where
        C: ConnectionTrait + Send + Sync,
        E::Model: sea_orm::FromQueryResult + Send + Sync,
    {
        Ok(self.into_select().count(conn).await?)
    }

    /// Narrow the scoped query to a single resource.
    ///
    /// # Errors
    /// Returns `ScopeError::Invalid` if the entity doesn't have a resource column.
    pub fn and_id(self, id: uuid::Uuid) -> Result<Self, ScopeError> {
        let resource_col = E::resource_col().ok_or(ScopeError::Invalid(
            "Entity must have a resource_col to use and_id()",
        ))?;
        Ok(self.filter(Condition::all().add(Expr::col(resource_col).eq(id))))
    }

    /// Choose which soft-deleted rows the query sees. Replaces any earlier
    /// choice; the default is [`Trashed::Without`].
    ///
    /// Entities without a soft-delete column have no trashed rows, so
    /// `Trashed::Only` matches nothing for them.
    pub fn trashed(mut self, trashed: Trashed) -> Self {
        self.trashed = trashed;
        self
    }

    fn into_select(self) -> sea_orm::Select<E> {
        let visibility = match (self.trashed, E::soft_delete_col()) {
            (Trashed::With, _) | (Trashed::Without, None) => return self.inner,
            (Trashed::Without, Some(col)) => Expr::col(col).is_null(),
            (Trashed::Only, Some(col)) => Expr::col(col).is_not_null(),
            (Trashed::Only, None) => Expr::value(false),
        };
        QueryFilter::filter(self.inner, Condition::all().add(visibility))
    }

    /// Add additional filters to the scoped query.
    /// The scope conditions remain in place.
    pub fn filter(mut self, filter: Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    /// Add ordering to the scoped query.
    pub fn order_by<C>(mut self, col: C, order: sea_orm::Order) -> Self
    where
        C: sea_orm::IntoSimpleExpr,
    {
        self.inner = QueryOrder::order_by(self.inner, col, order);
        self
    }

    /// Add a limit to the scoped query.
    pub fn limit(mut self, limit: u64) -> Self {
        self.inner = QuerySelect::limit(self.inner, limit);
        self
    }

    /// Add an offset to the scoped query.
    pub fn offset(mut self, offset: u64) -> Self {
        self.inner = QuerySelect::offset(self.inner, offset);
        self
    }
}
