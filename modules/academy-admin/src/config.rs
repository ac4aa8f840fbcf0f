use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use itqan_db::DbConfig;
use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Environment variable prefix; `__` separates nested keys, e.g.
/// `ITQAN__DATABASE__DSN` or `ITQAN__LOGGING__JSON`.
pub const ENV_PREFIX: &str = "ITQAN__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Academy a super admin lands on when nothing is selected.
    pub default_academy_subdomain: String,
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub max_bulk_selection: usize,
    /// Reject a payout only with a non-blank reason.
    pub require_rejection_reason: bool,
    pub logging: LoggingConfig,
    pub database: DbConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        let service = ServiceConfig::default();
        Self {
            default_academy_subdomain: "itqan-academy".to_owned(),
            default_page_size: service.default_page_size,
            max_page_size: service.max_page_size,
            max_bulk_selection: service.max_bulk_selection,
            require_rejection_reason: service.require_rejection_reason,
            logging: LoggingConfig::default(),
            database: DbConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `academy_admin=debug,sqlx=warn`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AdminConfig {
    /// Defaults, then the YAML file (if any), then `ITQAN__*` variables.
    ///
    /// # Errors
    /// Fails on a missing file, malformed YAML, unknown keys or values of the
    /// wrong type.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file {} does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let cfg: Self = figment
            .extract()
            .context("failed to load academy admin configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.max_page_size > 0, "max_page_size must be positive");
        anyhow::ensure!(
            (1..=self.max_page_size).contains(&self.default_page_size),
            "default_page_size must be between 1 and max_page_size ({})",
            self.max_page_size
        );
        anyhow::ensure!(
            self.max_bulk_selection > 0,
            "max_bulk_selection must be positive"
        );
        Ok(())
    }

    #[must_use]
    pub fn service(&self) -> ServiceConfig {
        ServiceConfig {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
            max_bulk_selection: self.max_bulk_selection,
            require_rejection_reason: self.require_rejection_reason,
        }
    }
}
