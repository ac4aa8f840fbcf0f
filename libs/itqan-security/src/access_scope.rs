use uuid::Uuid;

/// Access scope defining which tenants and resources a request can access.
///
/// An empty scope (no tenants, no resources, not root) is a "deny all" scope.
/// A root scope carries no tenant filter and is only produced for global mode.
#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AccessScope {
    pub(crate) is_root: bool,
    pub(crate) tenant_ids: Vec<Uuid>,
    pub(crate) resource_ids: Vec<Uuid>,
}

impl AccessScope {
    #[inline]
    #[must_use]
    pub fn tenant_ids(&self) -> &[Uuid] {
        &self.tenant_ids
    }

    #[inline]
    #[must_use]
    pub fn resource_ids(&self) -> &[Uuid] {
        &self.resource_ids
    }

    /// Returns true if this is a root scope (cross-tenant access).
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Returns true if this scope is empty (no tenants, no resources, not root).
    /// An empty scope results in a "deny all" condition in queries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        if self.is_root {
            return false;
        }
        self.tenant_ids.is_empty() && self.resource_ids.is_empty()
    }

    #[must_use]
    pub fn has_tenants(&self) -> bool {
        !self.tenant_ids.is_empty()
    }

    #[must_use]
    pub fn has_resources(&self) -> bool {
        !self.resource_ids.is_empty()
    }

    #[must_use]
    pub fn deny_all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tenants_only(tenant_ids: Vec<Uuid>) -> Self {
        Self {
            is_root: false,
            tenant_ids,
            resource_ids: vec![],
        }
    }

    #[must_use]
    pub fn resources_only(resource_ids: Vec<Uuid>) -> Self {
        Self {
            is_root: false,
            tenant_ids: vec![],
            resource_ids,
        }
    }

    #[must_use]
    pub fn tenant(tenant_id: Uuid) -> Self {
        Self::tenants_only(vec![tenant_id])
    }

    /// Create a scope with both tenant and resource constraints (AND).
    #[must_use]
    pub fn both(tenant_ids: Vec<Uuid>, resource_ids: Vec<Uuid>) -> Self {
        Self {
            is_root: false,
            tenant_ids,
            resource_ids,
        }
    }

    /// Root scope for cross-tenant (global) access.
    /// Bypasses tenant filtering; resource filters can still be added with
    /// [`AccessScope::with_resources`].
    #[must_use]
    pub fn root_tenant() -> Self {
        Self {
            is_root: true,
            tenant_ids: Vec::new(),
            resource_ids: Vec::new(),
        }
    }

    /// Narrow this scope to the given resource ids, keeping its tenant part.
    #[must_use]
    pub fn with_resources(mut self, resource_ids: Vec<Uuid>) -> Self {
        self.resource_ids = resource_ids;
        self
    }
}
