use async_trait::async_trait;
use itqan_security::TenantId;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter, QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::tenant_context::{AcademyDirectory, AcademySummary};
use crate::infra::storage::entity::academy;

/// Reads the tenant table directly; academies themselves are not tenant scoped.
pub struct SeaOrmAcademyDirectory {
    conn: DatabaseConnection,
}

impl SeaOrmAcademyDirectory {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

impl From<academy::Model> for AcademySummary {
    fn from(m: academy::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            subdomain: m.subdomain,
            is_active: m.is_active,
            maintenance_mode: m.maintenance_mode,
        }
    }
}

#[async_trait]
impl AcademyDirectory for SeaOrmAcademyDirectory {
    async fn find(&self, id: TenantId) -> Result<Option<AcademySummary>, DomainError> {
        let found = academy::Entity::find_by_id(id).one(&self.conn).await?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<AcademySummary>, DomainError> {
        let all = academy::Entity::find()
            .order_by(academy::Column::Name, Order::Asc)
            .order_by(academy::Column::Id, Order::Asc)
            .all(&self.conn)
            .await?;
        Ok(all.into_iter().map(Into::into).collect())
    }

    async fn default_academy(
        &self,
        preferred_subdomain: &str,
    ) -> Result<Option<AcademySummary>, DomainError> {
        let usable = || {
            academy::Entity::find()
                .filter(academy::Column::IsActive.eq(true))
                .filter(academy::Column::MaintenanceMode.eq(false))
        };

        if let Some(preferred) = usable()
            .filter(academy::Column::Subdomain.eq(preferred_subdomain))
            .one(&self.conn)
            .await?
        {
            return Ok(Some(preferred.into()));
        }

        let first = usable()
            .order_by(academy::Column::CreatedAt, Order::Asc)
            .order_by(academy::Column::Id, Order::Asc)
            .one(&self.conn)
            .await?;
        Ok(first.map(Into::into))
    }
}
