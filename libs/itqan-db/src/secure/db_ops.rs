use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use std::marker::PhantomData;

use crate::secure::cond::build_scope_condition;
use crate::secure::error::ScopeError;
use crate::secure::relation_graph::RelationGraph;
use crate::secure::{AccessScope, ScopableEntity, Scoped, Unscoped};

/// A type-safe wrapper around `SeaORM`'s `UpdateMany` that enforces scoping.
///
/// ```rust,ignore
/// let result = course_review::Entity::update_many()
///     .col_expr(course_review::Column::Status, Expr::value("approved"))
///     .secure()
///     .scope_with(&scope, &graph)?
///     .exec(conn)
///     .await?;
/// ```
#[derive(Clone, Debug)]
pub struct SecureUpdateMany<E: EntityTrait, S> {
    pub(crate) inner: sea_orm::UpdateMany<E>,
    pub(crate) _state: PhantomData<S>,
}

/// Extension trait to convert a regular `SeaORM` `UpdateMany` into a `SecureUpdateMany`.
pub trait SecureUpdateExt<E: EntityTrait>: Sized {
    fn secure(self) -> SecureUpdateMany<E, Unscoped>;
}

impl<E> SecureUpdateExt<E> for sea_orm::UpdateMany<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureUpdateMany<E, Unscoped> {
        SecureUpdateMany {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> SecureUpdateMany<E, Unscoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Apply access control scope to this update.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if the tenant path does not resolve.
    pub fn scope_with(
        self,
        scope: &AccessScope,
        graph: &RelationGraph,
    ) -> Result<SecureUpdateMany<E, Scoped>, ScopeError> {
        let cond = build_scope_condition::<E>(scope, graph)?;
        Ok(SecureUpdateMany {
            inner: self.inner.filter(cond),
            _state: PhantomData,
        })
    }
}

impl<E> SecureUpdateMany<E, Scoped>
where
    E: EntityTrait,
{
    /// Set a column to an expression.
    #[must_use]
    pub fn col_expr<C>(mut self, col: C, expr: sea_orm::sea_query::SimpleExpr) -> Self
    where
        C: sea_orm::sea_query::IntoIden,
    {
        self.inner = self.inner.col_expr(col, expr);
        self
    }

    /// Add a filter on top of the scope.
    #[must_use]
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    /// Execute the update operation.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database operation fails.
    pub async fn exec<C: ConnectionTrait + Send + Sync>(
        self,
        conn: &C,
    ) -> Result<sea_orm::UpdateResult, ScopeError> {
        Ok(self.inner.exec(conn).await?)
    }
}

/// A type-safe wrapper around `SeaORM`'s `DeleteMany` that enforces scoping.
#[derive(Clone, Debug)]
pub struct SecureDeleteMany<E: EntityTrait, S> {
    pub(crate) inner: sea_orm::DeleteMany<E>,
    pub(crate) _state: PhantomData<S>,
}

/// Extension trait to convert a regular `SeaORM` `DeleteMany` into a `SecureDeleteMany`.
pub trait SecureDeleteExt<E: EntityTrait>: Sized {
    fn secure(self) -> SecureDeleteMany<E, Unscoped>;
}

impl<E> SecureDeleteExt<E> for sea_orm::DeleteMany<E>
where
    E: EntityTrait,
{
    fn secure(self) -> SecureDeleteMany<E, Unscoped> {
        SecureDeleteMany {
            inner: self,
            _state: PhantomData,
        }
    }
}

impl<E> SecureDeleteMany<E, Unscoped>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    /// Apply access control scope to this delete.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if the tenant path does not resolve.
    pub fn scope_with(
        self,
        scope: &AccessScope,
        graph: &RelationGraph,
    ) -> Result<SecureDeleteMany<E, Scoped>, ScopeError> {
        let cond = build_scope_condition::<E>(scope, graph)?;
        Ok(SecureDeleteMany {
            inner: self.inner.filter(cond),
            _state: PhantomData,
        })
    }
}

impl<E> SecureDeleteMany<E, Scoped>
where
    E: EntityTrait,
{
    /// Add a filter on top of the scope.
    #[must_use]
    pub fn filter(mut self, filter: sea_orm::Condition) -> Self {
        self.inner = QueryFilter::filter(self.inner, filter);
        self
    }

    /// Execute the delete operation.
    ///
    /// # Errors
    /// Returns `ScopeError::Db` if the database operation fails.
    pub async fn exec<C: ConnectionTrait + Send + Sync>(
        self,
        conn: &C,
    ) -> Result<sea_orm::DeleteResult, ScopeError> {
        Ok(self.inner.exec(conn).await?)
    }
}
