//! High-level secure database wrapper.
//!
//! Module code receives a `SecureConn` instead of a raw connection. Every
//! builder it hands out is already scoped, and the relation graph used for
//! tenant paths travels with it.

use std::collections::HashMap;
use std::sync::Arc;
use std::{future::Future, pin::Pin};

use sea_orm::sea_query::{Alias, Expr, JoinType, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    TransactionTrait,
};
use uuid::Uuid;

use crate::secure::cond::resolve_tenant_path;
use crate::secure::db_ops::{SecureDeleteExt, SecureDeleteMany, SecureUpdateExt, SecureUpdateMany};
use crate::secure::relation_graph::RelationGraph;
use crate::secure::{
    AccessScope, ScopableEntity, ScopeError, Scoped, SecureEntityExt, SecureSelect, Trashed,
    TxError,
};

/// Secure database connection wrapper.
///
/// Cheap to clone: the connection is pooled and the graph is shared.
#[derive(Clone, Debug)]
pub struct SecureConn {
    conn: DatabaseConnection,
    graph: Arc<RelationGraph>,
}

impl SecureConn {
    #[must_use]
    pub fn new(conn: DatabaseConnection, graph: RelationGraph) -> Self {
        Self {
            conn,
            graph: Arc::new(graph),
        }
    }

    /// Underlying connection, for executing already-scoped builders and for
    /// infrastructure code that reads global tables.
    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    #[must_use]
    pub fn graph(&self) -> &RelationGraph {
        &self.graph
    }

    /// Database engine identifier for tracing.
    #[must_use]
    pub fn db_engine(&self) -> &'static str {
        use sea_orm::DatabaseBackend;

        match self.conn.get_database_backend() {
            DatabaseBackend::Postgres => "postgres",
            DatabaseBackend::MySql => "mysql",
            DatabaseBackend::Sqlite => "sqlite",
        }
    }

    /// Scoped select for `E`, live rows only unless narrowed with
    /// [`SecureSelect::trashed`].
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if `E`'s tenant path does not resolve.
    pub fn find<E>(&self, scope: &AccessScope) -> Result<SecureSelect<E, Scoped>, ScopeError>
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
    {
        E::find().secure().scope_with(scope, &self.graph)
    }

    /// Scoped select narrowed to one resource id. Sees the row whether or not
    /// it is in the trash.
    ///
    /// # Errors
    /// Returns `ScopeError` if the entity has no resource column or the tenant
    /// path does not resolve.
    pub fn find_by_id<E>(
        &self,
        scope: &AccessScope,
        id: Uuid,
    ) -> Result<SecureSelect<E, Scoped>, ScopeError>
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
    {
        self.find::<E>(scope)?.trashed(Trashed::With).and_id(id)
    }

    /// Scoped update for `E`.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if `E`'s tenant path does not resolve.
    pub fn update_many<E>(
        &self,
        scope: &AccessScope,
    ) -> Result<SecureUpdateMany<E, Scoped>, ScopeError>
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
    {
        E::update_many().secure().scope_with(scope, &self.graph)
    }

    /// Scoped delete for `E`.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` if `E`'s tenant path does not resolve.
    pub fn delete_many<E>(
        &self,
        scope: &AccessScope,
    ) -> Result<SecureDeleteMany<E, Scoped>, ScopeError>
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
    {
        E::delete_many().secure().scope_with(scope, &self.graph)
    }

    /// Map resource ids of `E` to the tenant each one resolves to.
    ///
    /// Walks the tenant path with inner joins in a single query, so callers
    /// can decorate a page of rows without per-row lookups. Ids that do not
    /// resolve (dangling parents) are absent from the map.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` for an unresolvable path,
    /// `ScopeError::Invalid` for an entity without tenant path or resource
    /// column, and `ScopeError::Db` on query failure.
    pub async fn tenant_index<E, C>(
        &self,
        conn: &C,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Uuid>, ScopeError>
    where
        E: ScopableEntity + EntityTrait,
        E::Column: ColumnTrait + Copy,
        C: ConnectionTrait + Send + Sync,
    {
        let path = resolve_tenant_path::<E>(&self.graph)?
            .ok_or(ScopeError::Invalid("entity has no tenant path"))?;
        let resource_col = E::resource_col()
            .ok_or(ScopeError::Invalid("entity must have a resource_col for tenant_index()"))?;
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let root = Alias::new("t0");
        let mut query = Query::select();
        query
            .expr_as(Expr::col((root.clone(), resource_col)), Alias::new("resource_id"))
            .from_as(E::default(), root.clone());

        let mut prev = root.clone();
        for (i, hop) in path.hops.iter().enumerate() {
            if i + 1 == path.hops.len() {
                query.expr_as(
                    Expr::col((prev.clone(), Alias::new(hop.from_col))),
                    Alias::new("tenant_id"),
                );
                break;
            }
            let alias = Alias::new(format!("t{}", i + 1));
            query.join_as(
                JoinType::InnerJoin,
                Alias::new(hop.to_table),
                alias.clone(),
                Expr::col((prev.clone(), Alias::new(hop.from_col)))
                    .equals((alias.clone(), Alias::new(hop.to_col))),
            );
            prev = alias;
        }
        query.and_where(Expr::col((root, resource_col)).is_in(ids.iter().copied()));

        let stmt = conn.get_database_backend().build(&query);
        let rows = conn.query_all(stmt).await?;

        let mut index = HashMap::with_capacity(rows.len());
        for row in rows {
            let resource_id: Uuid = row.try_get("", "resource_id")?;
            let tenant_id: Option<Uuid> = row.try_get("", "tenant_id")?;
            if let Some(tenant_id) = tenant_id {
                index.insert(resource_id, tenant_id);
            }
        }
        Ok(index)
    }

    /// Execute a closure inside a database transaction.
    ///
    /// The transaction commits when the closure returns `Ok` and rolls back
    /// when it returns an error or the database fails.
    ///
    /// ```ignore
    /// let db = self.db.clone();
    /// self.db
    ///     .in_transaction(move |tx| Box::pin(async move {
    ///         let blockers = count_blockers(tx, id).await?;
    ///         if !blockers.is_empty() {
    ///             return Err(DomainError::dependency_blocked(blockers));
    ///         }
    ///         db.delete_many::<E>(&scope)?.exec(tx).await?;
    ///         Ok(())
    ///     }))
    ///     .await
    /// ```
    ///
    /// # Errors
    /// Returns `TxError::Domain` with the closure's error or `TxError::Scope`
    /// if the transaction cannot be started or committed.
    pub async fn in_transaction<T, E, F>(&self, f: F) -> Result<T, TxError<E>>
    where
        T: Send + 'static,
        E: std::fmt::Debug + std::fmt::Display + Send + 'static,
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
    {
        self.conn
            .transaction::<_, T, TxError<E>>(|txn| {
                let fut = f(txn);
                Box::pin(async move { fut.await.map_err(TxError::Domain) })
            })
            .await
            .map_err(|e| match e {
                sea_orm::TransactionError::Transaction(tx_err) => tx_err,
                sea_orm::TransactionError::Connection(db_err) => ScopeError::Db(db_err).into(),
            })
    }

    /// [`in_transaction`](Self::in_transaction) for bodies whose error type
    /// absorbs `ScopeError`, so a failed commit surfaces as that type.
    ///
    /// # Errors
    /// Returns the closure's error, or the converted `ScopeError`.
    pub async fn in_transaction_mapped<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<ScopeError> + std::fmt::Debug + std::fmt::Display + Send + 'static,
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            ) -> Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'c>>
            + Send,
    {
        self.in_transaction(f).await.map_err(TxError::into_domain)
    }
}
