use sea_orm::sea_query::{Alias, Expr, Query, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait};
use uuid::Uuid;

use crate::secure::error::ScopeError;
use crate::secure::relation_graph::{RelationGraph, RelationLink, ResolvedPath};
use crate::secure::{AccessScope, ScopableEntity};

fn deny_all() -> Condition {
    Condition::all().add(Expr::value(false))
}

/// Resolve the tenant path declared by `E`, if any.
///
/// # Errors
/// Returns `ScopeError::UnresolvedPath` when the declared path does not
/// resolve against `graph`.
pub(crate) fn resolve_tenant_path<E>(graph: &RelationGraph) -> Result<Option<ResolvedPath>, ScopeError>
where
    E: ScopableEntity + EntityTrait,
{
    match E::tenant_path() {
        Some(path) => graph.resolve(E::default().table_name(), path).map(Some),
        None => Ok(None),
    }
}

/// `source.from_col IN (..)` for the last hop, nested `IN (SELECT ..)`
/// sub-queries for every hop before it.
fn tenant_predicate(source: &str, hops: &[RelationLink], tenant_ids: &[Uuid]) -> SimpleExpr {
    match hops.split_first() {
        Some((hop, [])) => Expr::col((Alias::new(source), Alias::new(hop.from_col)))
            .is_in(tenant_ids.iter().copied()),
        Some((hop, rest)) => {
            let mut sub = Query::select();
            sub.column((Alias::new(hop.to_table), Alias::new(hop.to_col)))
                .from(Alias::new(hop.to_table))
                .and_where(tenant_predicate(hop.to_table, rest, tenant_ids));
            Expr::col((Alias::new(source), Alias::new(hop.from_col))).in_subquery(sub)
        }
        None => Expr::value(false),
    }
}

/// Builds a `SeaORM` `Condition` from an access scope.
///
/// # Policy Rules
/// 1. Empty scope: deny all (`false`).
/// 2. Root scope: no tenant predicate; the path is still resolved so schema
///    drift fails loudly in global mode too.
/// 3. Tenants: predicate along the resolved tenant path. A restricted entity
///    without a path is denied.
/// 4. Resources: `resource_col IN resource_ids`, denied without a resource column.
/// 5. Parts are AND-combined.
///
/// # Errors
/// Returns `ScopeError::UnresolvedPath` if the entity's tenant path does not
/// resolve.
pub fn build_scope_condition<E>(
    scope: &AccessScope,
    graph: &RelationGraph,
) -> Result<Condition, ScopeError>
where
    E: ScopableEntity + EntityTrait,
    E::Column: ColumnTrait + Copy,
{
    let path = resolve_tenant_path::<E>(graph)?;

    if scope.is_empty() {
        return Ok(deny_all());
    }

    let mut cond = Condition::all();

    if !scope.is_root() && !E::IS_UNRESTRICTED && scope.has_tenants() {
        let Some(path) = path else {
            return Ok(deny_all());
        };
        cond = cond.add(tenant_predicate(&path.root, &path.hops, scope.tenant_ids()));
    }

    if scope.has_resources() {
        let Some(resource_col) = E::resource_col() else {
            return Ok(deny_all());
        };
        cond = cond.add(Expr::col(resource_col).is_in(scope.resource_ids().to_vec()));
    }

    Ok(cond)
}
