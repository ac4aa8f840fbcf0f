use uuid::Uuid;

use crate::AccessScope;

/// Identifier of an academy (the isolation boundary).
pub type TenantId = Uuid;

/// Resolved tenant context for one request.
///
/// `Global` is the cross-academy view and is only ever produced for super
/// admins. It is threaded explicitly through every call; nothing reads it from
/// ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", content = "tenant_id", rename_all = "snake_case")]
pub enum TenantContext {
    Scoped(TenantId),
    Global,
}

impl TenantContext {
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        match self {
            TenantContext::Scoped(id) => Some(*id),
            TenantContext::Global => None,
        }
    }

    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, TenantContext::Global)
    }

    /// Access scope used by the secure query layer.
    #[must_use]
    pub fn to_scope(&self) -> AccessScope {
        match self {
            TenantContext::Scoped(id) => AccessScope::tenant(*id),
            TenantContext::Global => AccessScope::root_tenant(),
        }
    }
}

impl From<Option<TenantId>> for TenantContext {
    fn from(value: Option<TenantId>) -> Self {
        value.map_or(TenantContext::Global, TenantContext::Scoped)
    }
}
