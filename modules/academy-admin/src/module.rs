//! Composition root: wires the sea-orm adapters into the domain services.

use std::sync::Arc;

use itqan_db::secure::SecureConn;
use itqan_db::{DatabaseConnection, connect};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::AdminConfig;
use crate::domain::service::{ResourceService, ServiceConfig};
use crate::domain::tenant_context::TenantContextResolver;
use crate::infra::storage::admin_entity::AdminEntity;
use crate::infra::storage::entity::{
    course_review, grade_level, interactive_course, lesson, package, student_profile,
    subscription, teacher_payout, teacher_profile,
};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::relations::relation_graph;
use crate::infra::storage::{OrmResourceRepository, SeaOrmAcademyDirectory};

/// Service over the sea-orm repository for entity `E`.
pub type OrmResourceService<E> = ResourceService<OrmResourceRepository<E>>;

pub type GradeLevels = OrmResourceService<grade_level::Entity>;
pub type StudentProfiles = OrmResourceService<student_profile::Entity>;
pub type TeacherProfiles = OrmResourceService<teacher_profile::Entity>;
pub type InteractiveCourses = OrmResourceService<interactive_course::Entity>;
pub type Lessons = OrmResourceService<lesson::Entity>;
pub type Packages = OrmResourceService<package::Entity>;
pub type Subscriptions = OrmResourceService<subscription::Entity>;
pub type CourseReviews = OrmResourceService<course_review::Entity>;
pub type TeacherPayouts = OrmResourceService<teacher_payout::Entity>;

pub type AcademyResolver = TenantContextResolver<SeaOrmAcademyDirectory>;

/// Entry point for embedders: one tenant resolver plus a service per resource.
#[derive(Clone)]
pub struct AcademyAdmin {
    db: SecureConn,
    tenants: Arc<AcademyResolver>,
    service_cfg: ServiceConfig,
}

impl AcademyAdmin {
    #[must_use]
    pub fn new(conn: DatabaseConnection, cfg: &AdminConfig) -> Self {
        let directory = Arc::new(SeaOrmAcademyDirectory::new(conn.clone()));
        Self {
            db: SecureConn::new(conn, relation_graph()),
            tenants: Arc::new(TenantContextResolver::new(
                directory,
                cfg.default_academy_subdomain.clone(),
            )),
            service_cfg: cfg.service(),
        }
    }

    /// Connect using `cfg.database` and bring the schema up to date.
    ///
    /// # Errors
    /// Connection or migration failures.
    pub async fn connect(cfg: &AdminConfig) -> anyhow::Result<Self> {
        let conn = connect(&cfg.database).await?;
        Migrator::up(&conn, None).await?;
        let admin = Self::new(conn, cfg);
        info!(engine = admin.db.db_engine(), "Academy admin ready");
        Ok(admin)
    }

    #[must_use]
    pub fn tenants(&self) -> &AcademyResolver {
        &self.tenants
    }

    #[must_use]
    pub fn db(&self) -> &SecureConn {
        &self.db
    }

    /// Service for one resource type.
    #[must_use]
    pub fn resource<E>(&self) -> OrmResourceService<E>
    where
        E: AdminEntity + Send + Sync,
        E::Model: Sync,
    {
        ResourceService::new(
            Arc::new(OrmResourceRepository::new(self.db.clone())),
            self.service_cfg.clone(),
        )
    }

    #[must_use]
    pub fn grade_levels(&self) -> GradeLevels {
        self.resource()
    }

    #[must_use]
    pub fn student_profiles(&self) -> StudentProfiles {
        self.resource()
    }

    #[must_use]
    pub fn teacher_profiles(&self) -> TeacherProfiles {
        self.resource()
    }

    #[must_use]
    pub fn interactive_courses(&self) -> InteractiveCourses {
        self.resource()
    }

    #[must_use]
    pub fn lessons(&self) -> Lessons {
        self.resource()
    }

    #[must_use]
    pub fn packages(&self) -> Packages {
        self.resource()
    }

    #[must_use]
    pub fn subscriptions(&self) -> Subscriptions {
        self.resource()
    }

    #[must_use]
    pub fn course_reviews(&self) -> CourseReviews {
        self.resource()
    }

    #[must_use]
    pub fn teacher_payouts(&self) -> TeacherPayouts {
        self.resource()
    }
}
