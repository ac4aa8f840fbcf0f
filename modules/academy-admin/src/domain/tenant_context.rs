//! Which academy an admin request operates on.
//!
//! Session state is the explicit [`TenantSelection`] value; the resolver
//! never reads ambient state. Only super admins can switch academies or use
//! the global view. Every other role is pinned to its assigned academy,
//! whatever the session says.

use std::sync::Arc;

use async_trait::async_trait;
use itqan_security::{Actor, TenantContext, TenantId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::resource::AcademyRef;

/// Per-session tenant selection, owned by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantSelection {
    pub selected_academy: Option<TenantId>,
    pub global_view: bool,
}

impl TenantSelection {
    /// Enter global view. The selected academy is dropped, so leaving global
    /// view lands on the default academy again.
    ///
    /// # Errors
    /// `Forbidden` for non-super-admins.
    pub fn enable_global_view(self, actor: &Actor) -> Result<Self, DomainError> {
        ensure_can_switch(actor)?;
        Ok(Self {
            selected_academy: None,
            global_view: true,
        })
    }

    /// # Errors
    /// `Forbidden` for non-super-admins.
    pub fn disable_global_view(self, actor: &Actor) -> Result<Self, DomainError> {
        ensure_can_switch(actor)?;
        Ok(Self {
            global_view: false,
            ..self
        })
    }

    /// Forget the selection; the next request resolves to the default academy.
    ///
    /// # Errors
    /// `Forbidden` for non-super-admins.
    pub fn clear(actor: &Actor) -> Result<Self, DomainError> {
        ensure_can_switch(actor)?;
        Ok(Self::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademySummary {
    pub id: TenantId,
    pub name: String,
    pub subdomain: String,
    pub is_active: bool,
    pub maintenance_mode: bool,
}

impl From<AcademySummary> for AcademyRef {
    fn from(a: AcademySummary) -> Self {
        Self {
            id: a.id,
            name: a.name,
        }
    }
}

/// Academy lookup used by the resolver.
#[async_trait]
pub trait AcademyDirectory: Send + Sync {
    async fn find(&self, id: TenantId) -> Result<Option<AcademySummary>, DomainError>;

    /// Every academy ordered by name, inactive and maintenance ones included.
    async fn list_all(&self) -> Result<Vec<AcademySummary>, DomainError>;

    /// Active, non-maintenance academy with `preferred_subdomain`, else the
    /// oldest active non-maintenance academy.
    async fn default_academy(
        &self,
        preferred_subdomain: &str,
    ) -> Result<Option<AcademySummary>, DomainError>;
}

/// What the panel header shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextInfo {
    pub academy: Option<AcademyRef>,
    pub global_view: bool,
    pub can_switch: bool,
}

pub struct TenantContextResolver<D: AcademyDirectory> {
    directory: Arc<D>,
    default_subdomain: String,
}

impl<D: AcademyDirectory> TenantContextResolver<D> {
    pub fn new(directory: Arc<D>, default_subdomain: impl Into<String>) -> Self {
        Self {
            directory,
            default_subdomain: default_subdomain.into(),
        }
    }

    /// Resolve the tenant context for one request.
    ///
    /// # Errors
    /// `DomainError::Configuration` if a non-super-admin has no assigned
    /// academy or the assigned academy does not exist.
    #[instrument(skip(self, actor), fields(actor_id = %actor.id(), role = %actor.role()))]
    pub async fn resolve(
        &self,
        actor: &Actor,
        selection: &TenantSelection,
    ) -> Result<TenantContext, DomainError> {
        if !actor.role().can_manage_multiple_academies() {
            return self.resolve_assigned(actor, selection).await;
        }

        if selection.global_view {
            debug!("Super admin in global view");
            return Ok(TenantContext::Global);
        }

        if let Some(selected) = selection.selected_academy {
            if self.directory.find(selected).await?.is_some() {
                return Ok(TenantContext::Scoped(selected));
            }
            warn!(academy_id = %selected, "Selected academy no longer exists, falling back to default");
        }

        match self.directory.default_academy(&self.default_subdomain).await? {
            Some(academy) => {
                debug!(academy_id = %academy.id, "Using default academy");
                Ok(TenantContext::Scoped(academy.id))
            }
            None => {
                debug!("No default academy available, using global view");
                Ok(TenantContext::Global)
            }
        }
    }

    async fn resolve_assigned(
        &self,
        actor: &Actor,
        selection: &TenantSelection,
    ) -> Result<TenantContext, DomainError> {
        let Some(own) = actor.academy_id() else {
            return Err(DomainError::configuration(format!(
                "{} {} has no assigned academy",
                actor.role(),
                actor.id()
            )));
        };

        if self.directory.find(own).await?.is_none() {
            return Err(DomainError::configuration(format!(
                "academy {own} assigned to {} {} does not exist",
                actor.role(),
                actor.id()
            )));
        }

        let asked_elsewhere = selection.selected_academy.is_some_and(|id| id != own);
        if selection.global_view || asked_elsewhere {
            warn!(
                academy_id = %own,
                requested = ?selection.selected_academy,
                global_view = selection.global_view,
                "Scoped actor requested another academy or global view; keeping own academy"
            );
        }

        Ok(TenantContext::Scoped(own))
    }

    /// `None` means global mode.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub async fn resolve_tenant_context(
        &self,
        actor: &Actor,
        selection: &TenantSelection,
    ) -> Result<Option<TenantId>, DomainError> {
        Ok(self.resolve(actor, selection).await?.tenant_id())
    }

    /// Switch the session to one academy, leaving global view.
    ///
    /// # Errors
    /// `Forbidden` for non-super-admins, `NotFound` for an unknown academy.
    #[instrument(skip_all, fields(actor_id = %actor.id(), academy_id = %academy_id))]
    pub async fn select_academy(
        &self,
        actor: &Actor,
        selection: &TenantSelection,
        academy_id: TenantId,
    ) -> Result<TenantSelection, DomainError> {
        ensure_can_switch(actor)?;
        if self.directory.find(academy_id).await?.is_none() {
            return Err(DomainError::not_found("academy", academy_id));
        }
        let mut next = *selection;
        next.selected_academy = Some(academy_id);
        next.global_view = false;
        Ok(next)
    }

    /// Academies a super admin can switch to.
    ///
    /// # Errors
    /// `Forbidden` for non-super-admins; storage errors.
    pub async fn available_academies(
        &self,
        actor: &Actor,
    ) -> Result<Vec<AcademySummary>, DomainError> {
        ensure_can_switch(actor)?;
        self.directory.list_all().await
    }

    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub async fn context_info(
        &self,
        actor: &Actor,
        selection: &TenantSelection,
    ) -> Result<ContextInfo, DomainError> {
        let ctx = self.resolve(actor, selection).await?;
        let academy = match ctx.tenant_id() {
            Some(id) => self.directory.find(id).await?.map(AcademyRef::from),
            None => None,
        };
        Ok(ContextInfo {
            academy,
            global_view: ctx.is_global(),
            can_switch: actor.role().can_manage_multiple_academies(),
        })
    }
}

fn ensure_can_switch(actor: &Actor) -> Result<(), DomainError> {
    if actor.role().can_manage_multiple_academies() {
        Ok(())
    } else {
        Err(DomainError::forbidden(format!(
            "{} cannot switch academies",
            actor.role()
        )))
    }
}
